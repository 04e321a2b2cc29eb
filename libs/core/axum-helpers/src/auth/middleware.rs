use super::{AuthSession, AuthUser};
use crate::errors::AppError;
use axum::{extract::Request, middleware::Next, response::Response};

/// Reject requests without a logged-in session user.
///
/// On success the caller is available to handlers as [`AuthUser`].
pub async fn require_auth(
    session: AuthSession,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = session.user_id().await? else {
        tracing::debug!(path = %request.uri().path(), "Request without session user");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    request.extensions_mut().insert(AuthUser::new(user_id));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionConfig, create_session_layer};
    use tower_sessions::MemoryStore;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        middleware,
        routing::{get, post},
    };
    use core_config::Environment;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(user_id: Uuid) -> Router {
        let guarded = Router::new()
            .route("/me", get(|user: AuthUser| async move { user.id.to_string() }))
            .route_layer(middleware::from_fn(require_auth));

        Router::new()
            .route(
                "/login",
                post(move |session: AuthSession| async move {
                    session.login(user_id).await.map(|_| StatusCode::CREATED)
                }),
            )
            .route(
                "/logout",
                post(|session: AuthSession| async move {
                    session.logout().await.map(|_| StatusCode::NO_CONTENT)
                }),
            )
            .route("/open", get(|user: AuthUser| async move { user.id.to_string() }))
            .merge(guarded)
            .layer(create_session_layer(
                MemoryStore::default(),
                &SessionConfig::default(),
                &Environment::Development,
            ))
    }

    fn session_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_guard_rejects_without_session() {
        let response = app(Uuid::now_v7())
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_extractor_without_guard_is_unauthorized() {
        let response = app(Uuid::now_v7())
            .oneshot(Request::get("/open").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_then_guarded_route_sees_user() {
        let user_id = Uuid::now_v7();
        let app = app(user_id);

        let login = app
            .clone()
            .oneshot(Request::post("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::CREATED);
        let cookie = session_cookie(&login);
        assert!(cookie.starts_with("inventory.sid="));

        let me = app
            .oneshot(
                Request::get("/me")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::OK);
        let bytes = me.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, user_id.to_string());
    }

    #[tokio::test]
    async fn test_logout_ends_session() {
        let app = app(Uuid::now_v7());

        let login = app
            .clone()
            .oneshot(Request::post("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let cookie = session_cookie(&login);

        let logout = app
            .clone()
            .oneshot(
                Request::post("/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(logout.status(), StatusCode::NO_CONTENT);

        let me = app
            .oneshot(
                Request::get("/me")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }
}
