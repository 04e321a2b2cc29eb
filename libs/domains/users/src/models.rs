use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// User entity as stored in MongoDB; never serialized to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub email_verified: bool,
    /// Absent once redeemed so the sparse unique index ignores it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A new, unverified user waiting for `verification_token` to be redeemed.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        verification_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            email_verified: false,
            email_verification_token: Some(verification_token),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.email_verification_token = None;
        self.updated_at = Utc::now();
    }
}

/// User as returned to clients.
///
/// `email` is only included when the caller asks for their own profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    /// Profile without the email address
    pub fn public(user: User) -> Self {
        Self {
            email: None,
            ..Self::with_email(user)
        }
    }

    pub fn with_email(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: Some(user.email),
            email_verified: user.email_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Sign-up payload; every field is required but checked by the service
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Token from the verification email
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$argon2id$stub".to_string(),
            "ab".repeat(32),
        )
    }

    #[test]
    fn test_public_response_hides_email_and_hash() {
        let value = serde_json::to_value(UserResponse::public(user())).unwrap();
        assert!(value.get("email").is_none());
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["emailVerified"], false);
        assert_eq!(value["username"], "alice");
    }

    #[test]
    fn test_mark_verified_clears_token() {
        let mut user = user();
        user.mark_verified();
        assert!(user.email_verified);
        assert!(user.email_verification_token.is_none());

        let stored = serde_json::to_value(&user).unwrap();
        assert!(stored.get("emailVerificationToken").is_none());
    }
}
