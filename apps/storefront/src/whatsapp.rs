//! # WhatsApp Order Link
//!
//! Orders leave the storefront as a WhatsApp "click to chat" link with the
//! order message pre-filled:
//!
//! ```text
//! https://wa.me/918218377572?text=%2ANew%20Order%20from%20...
//!              └── shop number ─┘     └── percent-encoded message ──┘
//! ```
//!
//! Opening the URL is someone else's job (a browser, the OS, or the shell
//! printing it), so the link hands the finished URL to an opener callback.

use scoop_store::{OrderLink, StoreError, StoreResult};
use tracing::info;

/// Builds the click-to-chat URL for `number` with `message` pre-filled.
pub fn order_url(number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        number,
        urlencoding::encode(message)
    )
}

pub struct WhatsAppLink<F> {
    number: String,
    opener: F,
}

impl<F> WhatsAppLink<F>
where
    F: FnMut(&str) -> Result<(), String>,
{
    pub fn new(number: impl Into<String>, opener: F) -> Self {
        WhatsAppLink {
            number: number.into(),
            opener,
        }
    }
}

impl<F> OrderLink for WhatsAppLink<F>
where
    F: FnMut(&str) -> Result<(), String>,
{
    fn open(&mut self, message: &str) -> StoreResult<()> {
        let url = order_url(&self.number, message);
        info!(number = %self.number, "Opening WhatsApp order link");
        (self.opener)(&url).map_err(StoreError::Link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_url_encodes_message() {
        let url = order_url("918218377572", "*Total: ₹140*\nPlease confirm my order.");
        assert_eq!(
            url,
            "https://wa.me/918218377572?text=%2ATotal%3A%20%E2%82%B9140%2A%0APlease%20confirm%20my%20order."
        );
    }

    #[test]
    fn test_link_hands_url_to_opener() {
        let mut opened = Vec::new();
        let mut link = WhatsAppLink::new("918218377572", |url: &str| {
            opened.push(url.to_string());
            Ok(())
        });

        link.open("hi • there").unwrap();
        drop(link);
        assert_eq!(opened, ["https://wa.me/918218377572?text=hi%20%E2%80%A2%20there"]);
    }

    #[test]
    fn test_opener_failure_becomes_link_error() {
        let mut link = WhatsAppLink::new("1", |_: &str| Err("no browser".to_string()));
        let err = link.open("order").unwrap_err();
        assert!(matches!(err, StoreError::Link(reason) if reason == "no browser"));
    }
}
