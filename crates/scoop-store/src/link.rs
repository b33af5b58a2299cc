//! Outbound order link.
//!
//! Checkout ends by handing the composed order message to whatever can
//! open a messaging conversation with the shop. The store only knows this
//! trait; the storefront app supplies the WhatsApp deep link.

use crate::error::StoreResult;

pub trait OrderLink {
    /// Opens a conversation with the shop, pre-filled with `message`.
    fn open(&mut self, message: &str) -> StoreResult<()>;
}

impl<F> OrderLink for F
where
    F: FnMut(&str) -> StoreResult<()>,
{
    fn open(&mut self, message: &str) -> StoreResult<()> {
        self(message)
    }
}
