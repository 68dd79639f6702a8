//! Outbound notification delivery.
//!
//! Delivery is best-effort and at-most-once: a [`Notifier`] never returns an
//! error and never retries. Callers get a [`Delivery`] status they can log or
//! ignore.

pub mod telegram;

use async_trait::async_trait;

pub use telegram::TelegramNotifier;

/// Result of one notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No destination or credential configured.
    Disabled,
    /// Transport failure; already logged by the notifier.
    Failed,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Delivery;
}
