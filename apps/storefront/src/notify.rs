//! # Notices
//!
//! Short-lived messages shown to the shopper or admin: the toast at the
//! bottom of the screen and the inline message under the coupon box.
//!
//! Nothing here runs a timer. A notice carries when it was raised and how
//! long it lives; whoever renders asks whether it has expired yet.
//!
//! ```text
//!  raised_at ──────── ttl ────────► expires
//!      │    visible                 │   hidden
//!  ────┴────────────────────────────┴──────────►  now
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub raised_at: DateTime<Utc>,
    /// `None` stays until replaced.
    #[serde(skip)]
    pub ttl: Option<Duration>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Notice {
            message: message.into(),
            level,
            raised_at,
            ttl: None,
        }
    }

    pub fn success(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Notice::new(NoticeLevel::Success, message, raised_at)
    }

    pub fn error(message: impl Into<String>, raised_at: DateTime<Utc>) -> Self {
        Notice::new(NoticeLevel::Error, message, raised_at)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now >= self.raised_at + ttl,
            // too long to represent: never expires in practice
            Err(_) => false,
        }
    }
}

/// The two notice slots the storefront shows.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    toast: Option<Notice>,
    coupon: Option<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current toast.
    pub fn toast(&mut self, notice: Notice) {
        self.toast = Some(notice);
    }

    /// Replaces the coupon box message.
    pub fn coupon(&mut self, notice: Notice) {
        self.coupon = Some(notice);
    }

    pub fn clear_coupon(&mut self) {
        self.coupon = None;
    }

    /// The toast, unless it has expired.
    pub fn current_toast(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.toast.as_ref().filter(|n| !n.is_expired(now))
    }

    /// The coupon box message, unless it has expired.
    pub fn coupon_message(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.coupon.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Removes the toast and returns it if it was still showing.
    pub fn take_toast(&mut self, now: DateTime<Utc>) -> Option<Notice> {
        self.toast.take().filter(|n| !n.is_expired(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_notice_without_ttl_never_expires() {
        let notice = Notice::success("Coupon \"SWEET10\" applied!", at(0));
        assert!(!notice.is_expired(at(i64::from(i32::MAX))));
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let notice = Notice::error("Invalid coupon code", at(1_000)).with_ttl(Duration::from_secs(2));
        assert!(!notice.is_expired(at(2_999)));
        assert!(notice.is_expired(at(3_000)));
    }

    #[test]
    fn test_slots_filter_expired() {
        let mut notices = Notices::new();
        notices.coupon(Notice::error("Invalid coupon code", at(0)).with_ttl(Duration::from_secs(2)));
        notices.toast(Notice::success("Welcome Admin!", at(0)).with_ttl(Duration::from_secs(3)));

        assert!(notices.coupon_message(at(1_000)).is_some());
        assert!(notices.coupon_message(at(2_500)).is_none());
        assert!(notices.current_toast(at(2_500)).is_some());

        assert!(notices.take_toast(at(2_500)).is_some());
        assert!(notices.current_toast(at(2_500)).is_none());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(Notice::error("Shop is closed", at(0))).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "Shop is closed");
    }
}
