//! # Scoop
//!
//! Runs the storefront as an interactive shell on stdin/stdout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin ──► shell::parse ──► commands::* ──► Store ──► FileStorage      │
//! │                                   │                                     │
//! │  stdout ◄── rendered reply + toast┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use tokio::io::BufReader;
use tracing::{error, info};

use scoop_storefront::config::ShopConfig;
use scoop_storefront::{boot, init_tracing, shell};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    info!("Starting Scoop storefront...");

    let config = ShopConfig::from_env();
    info!(
        shop = %config.shop_name,
        whatsapp = %config.whatsapp_number,
        "Configuration loaded"
    );

    eprintln!("Loading Flavors...");
    let mut app = match boot(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to start storefront");
            return ExitCode::FAILURE;
        }
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Err(e) = shell::run(&mut app, stdin, &mut stdout).await {
        error!(error = %e, "Shell I/O failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
