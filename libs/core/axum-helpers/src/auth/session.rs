use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "userId";

/// Handle to the caller's session.
#[derive(Clone, Debug)]
pub struct AuthSession(Session);

impl AuthSession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Id of the logged-in user, if any.
    pub async fn user_id(&self) -> Result<Option<Uuid>, AppError> {
        self.0
            .get::<Uuid>(SESSION_USER_KEY)
            .await
            .map_err(session_error)
    }

    /// Bind the session to `user_id`, issuing a fresh session id.
    pub async fn login(&self, user_id: Uuid) -> Result<(), AppError> {
        self.0.cycle_id().await.map_err(session_error)?;
        self.0
            .insert(SESSION_USER_KEY, user_id)
            .await
            .map_err(session_error)?;
        tracing::debug!(%user_id, "Session bound to user");
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.0.flush().await.map_err(session_error)
    }
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::InternalServerError(format!("Session store error: {}", e))
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalServerError(msg.to_string()))?;
        Ok(Self(session))
    }
}
