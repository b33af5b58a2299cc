//! Admin session gate.
//!
//! A single shared password unlocks the back-office for the rest of the
//! session. There are no accounts and nothing is persisted; restarting the
//! app logs the admin out.

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AdminSession {
    password: String,
    logged_in: bool,
}

impl AdminSession {
    pub fn new(password: impl Into<String>) -> Self {
        AdminSession {
            password: password.into(),
            logged_in: false,
        }
    }

    /// Returns whether the password matched. A wrong password leaves an
    /// existing session as it was.
    pub fn login(&mut self, attempt: &str) -> bool {
        if attempt == self.password {
            self.logged_in = true;
            info!("Admin logged in");
            true
        } else {
            warn!("Admin login failed");
            false
        }
    }

    pub fn logout(&mut self) {
        if self.logged_in {
            info!("Admin logged out");
        }
        self.logged_in = false;
    }

    pub fn is_admin(&self) -> bool {
        self.logged_in
    }
}
