//! Delivery backends behind [`EmailProvider`]

pub mod mock;
pub mod smtp;

pub use mock::MockSmtpProvider;
pub use smtp::{SmtpConfig, SmtpProvider};

use crate::models::Email;
use async_trait::async_trait;
use eyre::Result;

/// Returned once the backend has accepted a message
#[derive(Debug, Clone)]
pub struct SendResult {
    pub message_id: String,
}

/// Something that can deliver an [`Email`].
///
/// Services hold it as `Arc<dyn EmailProvider>` so tests can swap in
/// [`MockSmtpProvider`].
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &Email) -> Result<SendResult>;

    /// Checked once at startup; a failure is logged, not fatal
    async fn health_check(&self) -> Result<()>;

    /// Short backend name for log fields
    fn name(&self) -> &'static str;
}
