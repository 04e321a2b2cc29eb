use crate::templates::RenderedTemplate;
use serde::{Deserialize, Serialize};

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub to: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
    pub reply_to: Option<String>,
}

impl Email {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            to: to.into(),
            subject: subject.into(),
            body_text: None,
            body_html: None,
            reply_to: None,
        }
    }

    /// Build a message from a rendered template.
    pub fn from_rendered(to: impl Into<String>, rendered: RenderedTemplate) -> Self {
        Self {
            body_text: rendered.body_text,
            body_html: rendered.body_html,
            ..Self::new(to, rendered.subject)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = Some(text.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.body_html = Some(html.into());
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}
