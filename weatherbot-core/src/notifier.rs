use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::NotifyError;

pub mod telegram;

pub use telegram::TelegramClient;

/// Delivers plain text to a single recipient.
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, recipient_id: i64, text: &str) -> Result<(), NotifyError>;
}
