//! Email templates rendered with Handlebars
//!
//! Supports variables (`{{name}}`), conditionals and loops; values are
//! HTML-escaped unless written as `{{{raw}}}`.

use eyre::{eyre, Result};
use handlebars::Handlebars;
use serde_json::Value;
use std::collections::HashMap;

/// Name of the built-in email verification template.
///
/// Expects `username`, `app_name` and `verification_link`.
pub const VERIFICATION_TEMPLATE: &str = "verification";

#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EmailTemplate {
    pub name: String,
    pub subject: String,
    pub body_text: Option<String>,
    pub body_html: Option<String>,
}

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    /// Engine with the built-in templates registered.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        let mut engine = Self {
            handlebars,
            templates: HashMap::new(),
        };
        engine.register(verification_template())?;

        Ok(engine)
    }

    pub fn register(&mut self, template: EmailTemplate) -> Result<()> {
        self.handlebars
            .register_template_string(&format!("{}_subject", template.name), &template.subject)
            .map_err(|e| eyre!("Failed to register subject template: {}", e))?;

        if let Some(text) = &template.body_text {
            self.handlebars
                .register_template_string(&format!("{}_text", template.name), text)
                .map_err(|e| eyre!("Failed to register text template: {}", e))?;
        }

        if let Some(html) = &template.body_html {
            self.handlebars
                .register_template_string(&format!("{}_html", template.name), html)
                .map_err(|e| eyre!("Failed to register HTML template: {}", e))?;
        }

        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    pub fn render(&self, name: &str, data: &Value) -> Result<RenderedTemplate> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| eyre!("Template not found: {}", name))?;

        let render_part = |part: &str| {
            self.handlebars
                .render(&format!("{}_{}", name, part), data)
                .map_err(|e| eyre!("Failed to render {} of {}: {}", part, name, e))
        };

        Ok(RenderedTemplate {
            subject: render_part("subject")?,
            body_text: template.body_text.as_ref().map(|_| render_part("text")).transpose()?,
            body_html: template.body_html.as_ref().map(|_| render_part("html")).transpose()?,
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

fn verification_template() -> EmailTemplate {
    EmailTemplate {
        name: VERIFICATION_TEMPLATE.to_string(),
        subject: "Verify your email for {{app_name}}".to_string(),
        body_text: Some(
            r#"Hello {{username}},

Please verify your email address by opening the link below:

{{{verification_link}}}

If you didn't create an account, you can safely ignore this email.

The {{app_name}} Team"#
                .to_string(),
        ),
        body_html: Some(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <h1 style="color: #2563eb;">Verify Your Email</h1>
    <p>Hello {{username}},</p>
    <p>Please verify your email address by clicking the button below:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{{{verification_link}}}"
           style="background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">
            Verify Email
        </a>
    </p>
    <p style="color: #666; font-size: 14px;">If you didn't create an account, you can safely ignore this email.</p>
    <p>The {{app_name}} Team</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
