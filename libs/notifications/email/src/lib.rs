//! Transactional email for the inventory services.
//!
//! ## Components
//!
//! - **Models**: [`Email`], a single outgoing message
//! - **Providers**: [`SmtpProvider`] (lettre) and [`MockSmtpProvider`] for tests,
//!   both behind the [`EmailProvider`] trait
//! - **Templates**: Handlebars-based [`TemplateEngine`] with the built-in
//!   `verification` template
//!
//! ```ignore
//! use email::{Email, EmailProvider, SmtpConfig, SmtpProvider, TemplateEngine};
//! use core_config::FromEnv;
//!
//! let provider = SmtpProvider::new(SmtpConfig::from_env()?)?;
//! let rendered = TemplateEngine::new()?.render("verification", &data)?;
//! provider.send(&Email::from_rendered("user@example.com", rendered)).await?;
//! ```

pub mod models;
pub mod provider;
pub mod templates;

pub use models::Email;
pub use provider::{EmailProvider, MockSmtpProvider, SendResult, SmtpConfig, SmtpProvider};
pub use templates::{EmailTemplate, RenderedTemplate, TemplateEngine, VERIFICATION_TEMPLATE};
