//! SMTP email provider using lettre

use super::{EmailProvider, SendResult};
use crate::models::Email;
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse_or};
use eyre::{Result, WrapErr};
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

/// SMTP provider configuration
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub use_tls: bool,
}

impl Default for SmtpConfig {
    /// Mailpit/Mailhog on localhost:1025 without auth.
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1025,
            username: String::new(),
            password: String::new(),
            from_email: "noreply@localhost".to_string(),
            from_name: "Inventory".to_string(),
            use_tls: false,
        }
    }
}

impl FromEnv for SmtpConfig {
    /// - SMTP_HOST (localhost), SMTP_PORT (1025)
    /// - SMTP_USERNAME / SMTP_PASSWORD (empty: no auth)
    /// - SMTP_USE_TLS (false)
    /// - EMAIL_FROM_ADDRESS (noreply@localhost), EMAIL_FROM_NAME (Inventory)
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or_default("SMTP_HOST", &defaults.host),
            port: env_parse_or("SMTP_PORT", defaults.port)?,
            username: env_or_default("SMTP_USERNAME", ""),
            password: env_or_default("SMTP_PASSWORD", ""),
            from_email: env_or_default("EMAIL_FROM_ADDRESS", &defaults.from_email),
            from_name: env_or_default("EMAIL_FROM_NAME", &defaults.from_name),
            use_tls: env_flag("SMTP_USE_TLS", defaults.use_tls),
        })
    }
}

pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: Arc<SmtpConfig>,
}

impl SmtpProvider {
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let credentials = (!config.username.is_empty())
            .then(|| Credentials::new(config.username.clone(), config.password.clone()));

        let mut builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .wrap_err("Failed to create SMTP relay")?
        } else {
            // Plaintext, for Mailpit/Mailhog
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);
        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
            config: Arc::new(config),
        })
    }

    fn build_message(&self, email: &Email) -> Result<Message> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .wrap_err("Invalid from address")?;

        let to: Mailbox = email.to.parse().wrap_err("Invalid to address")?;

        let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let reply_to_mailbox: Mailbox =
                reply_to.parse().wrap_err("Invalid reply-to address")?;
            builder = builder.reply_to(reply_to_mailbox);
        }

        let message = match (&email.body_text, &email.body_html) {
            (Some(text), Some(html)) => builder
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(text.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_HTML)
                                .body(html.clone()),
                        ),
                )
                .wrap_err("Failed to build multipart message")?,
            (Some(text), None) => builder
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone())
                .wrap_err("Failed to build text message")?,
            (None, Some(html)) => builder
                .header(ContentType::TEXT_HTML)
                .body(html.clone())
                .wrap_err("Failed to build HTML message")?,
            (None, None) => {
                return Err(eyre::eyre!("Email must have either text or HTML body"));
            }
        };

        Ok(message)
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .wrap_err("Failed to send email via SMTP")?;

        let message_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_else(|| email.id.clone());

        tracing::info!(email_id = %email.id, subject = %email.subject, "Email sent");

        Ok(SendResult { message_id })
    }

    async fn health_check(&self) -> Result<()> {
        self.transport
            .test_connection()
            .await
            .wrap_err("SMTP health check failed")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_defaults() {
        temp_env::with_vars(
            [
                ("SMTP_HOST", None::<&str>),
                ("SMTP_PORT", None::<&str>),
                ("SMTP_USE_TLS", None::<&str>),
                ("EMAIL_FROM_ADDRESS", None::<&str>),
                ("EMAIL_FROM_NAME", None::<&str>),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 1025);
                assert!(!config.use_tls);
                assert_eq!(config.from_email, "noreply@localhost");
                assert_eq!(config.from_name, "Inventory");
            },
        );
    }

    #[test]
    fn test_smtp_config_from_env() {
        temp_env::with_vars(
            [
                ("SMTP_HOST", Some("smtp.example.com")),
                ("SMTP_PORT", Some("587")),
                ("SMTP_USE_TLS", Some("true")),
                ("SMTP_USERNAME", Some("mailer")),
            ],
            || {
                let config = SmtpConfig::from_env().unwrap();
                assert_eq!(config.host, "smtp.example.com");
                assert_eq!(config.port, 587);
                assert!(config.use_tls);
                assert_eq!(config.username, "mailer");
            },
        );
    }

    #[tokio::test]
    async fn test_build_message_requires_body() {
        let provider = SmtpProvider::new(SmtpConfig::default()).unwrap();
        let email = Email::new("user@example.com", "Subject");
        assert!(provider.build_message(&email).is_err());
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let provider = SmtpProvider::new(SmtpConfig::default()).unwrap();
        let email = Email::new("not an address", "Subject").with_text("body");
        assert!(provider.build_message(&email).is_err());
    }

    #[tokio::test]
    async fn test_build_message_multipart() {
        let provider = SmtpProvider::new(SmtpConfig::default()).unwrap();
        let email = Email::new("user@example.com", "Subject")
            .with_text("text")
            .with_html("<p>html</p>");
        assert!(provider.build_message(&email).is_ok());
    }
}
