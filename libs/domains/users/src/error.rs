use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username, email, and password are required")]
    MissingSignupFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not yet verified")]
    EmailNotVerified,

    #[error("Invalid verification token")]
    InvalidVerificationToken,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Email delivery error: {0}")]
    Email(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::MissingSignupFields
            | UserError::InvalidEmail
            | UserError::MissingCredentials
            | UserError::InvalidVerificationToken => AppError::BadRequest(message),
            UserError::UsernameTaken | UserError::EmailTaken => AppError::Conflict(message),
            UserError::NotFound => AppError::NotFound(message),
            UserError::InvalidCredentials | UserError::EmailNotVerified => {
                AppError::Unauthorized(message)
            }
            UserError::PasswordHash(_) | UserError::Email(_) | UserError::Database(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::MissingSignupFields, StatusCode::BAD_REQUEST),
            (UserError::InvalidEmail, StatusCode::BAD_REQUEST),
            (UserError::UsernameTaken, StatusCode::CONFLICT),
            (UserError::EmailTaken, StatusCode::CONFLICT),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::EmailNotVerified, StatusCode::UNAUTHORIZED),
            (UserError::NotFound, StatusCode::NOT_FOUND),
            (UserError::Email("smtp down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
