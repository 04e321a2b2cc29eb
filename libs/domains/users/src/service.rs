use email::{Email, EmailProvider, TemplateEngine, VERIFICATION_TEMPLATE};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::config::VerificationConfig;
use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, SignupRequest, User, UserResponse};
use crate::password::{generate_token, hash_password, verify_password};
use crate::repository::UserRepository;

const APP_NAME: &str = "Inventory";

/// Sign-up, email verification and credential checks.
///
/// Session handling stays in the handlers; the service only decides who the
/// user is.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    mailer: Arc<dyn EmailProvider>,
    templates: Arc<TemplateEngine>,
    verification: VerificationConfig,
}

/// Trimmed value, or `None` when absent or blank
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<R: UserRepository> UserService<R> {
    pub fn new(
        repository: R,
        mailer: Arc<dyn EmailProvider>,
        templates: TemplateEngine,
        verification: VerificationConfig,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            mailer,
            templates: Arc::new(templates),
            verification,
        }
    }

    pub fn verification(&self) -> &VerificationConfig {
        &self.verification
    }

    /// Create an unverified user and email them a verification link.
    ///
    /// The password is not trimmed; surrounding whitespace is part of it.
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<UserResponse> {
        let (Some(username), Some(email), Some(password)) = (
            required(input.username),
            required(input.email),
            input.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(UserError::MissingSignupFields);
        };

        if !email.validate_email() {
            return Err(UserError::InvalidEmail);
        }
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let password_hash = hash_password(&password)?;
        let token = generate_token();
        let user = self
            .repository
            .create(User::new(username, email, password_hash, token.clone()))
            .await?;
        tracing::info!(user_id = %user.id, "User signed up");

        if let Err(err) = self.send_verification(&user, &token).await {
            self.repository.delete(user.id).await?;
            tracing::warn!(user_id = %user.id, "Signup rolled back");
            return Err(err);
        }
        Ok(UserResponse::public(user))
    }

    async fn send_verification(&self, user: &User, token: &str) -> UserResult<()> {
        let data = json!({
            "username": user.username,
            "app_name": APP_NAME,
            "verification_link": self.verification.verification_link(token),
        });
        let rendered = self
            .templates
            .render(VERIFICATION_TEMPLATE, &data)
            .map_err(|e| UserError::Email(e.to_string()))?;

        let message = Email::from_rendered(user.email.clone(), rendered);
        match self.mailer.send(&message).await {
            Ok(result) => {
                tracing::info!(
                    user_id = %user.id,
                    message_id = %result.message_id,
                    provider = self.mailer.name(),
                    "Verification email sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, error = ?e, "Failed to send verification email");
                Err(UserError::Email(e.to_string()))
            }
        }
    }

    /// Redeem a verification token.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: Option<&str>) -> UserResult<()> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(UserError::InvalidVerificationToken)?;

        let mut user = self
            .repository
            .find_by_verification_token(token)
            .await?
            .ok_or(UserError::InvalidVerificationToken)?;

        user.mark_verified();
        let user = self.repository.update(user).await?;
        tracing::info!(user_id = %user.id, "Email verified");
        Ok(())
    }

    /// Check credentials; only verified users may log in.
    #[instrument(skip(self, input))]
    pub async fn authenticate(&self, input: LoginRequest) -> UserResult<User> {
        let (Some(username), Some(password)) = (
            required(input.username),
            input.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(UserError::MissingCredentials);
        };

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }
        if !user.email_verified {
            return Err(UserError::EmailNotVerified);
        }
        Ok(user)
    }

    /// The session's user with email, if they still exist.
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Option<Uuid>) -> UserResult<Option<UserResponse>> {
        let Some(id) = user_id else {
            return Ok(None);
        };
        Ok(self
            .repository
            .find_by_id(id)
            .await?
            .map(UserResponse::with_email))
    }
}
