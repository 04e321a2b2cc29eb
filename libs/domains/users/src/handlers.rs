use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_helpers::{
    AppError, AuthSession, JsonBody,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{LoginRequest, SignupRequest, UserResponse, VerifyEmailQuery};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(current_user, signup, login, logout, verify_email),
    components(
        schemas(UserResponse, SignupRequest, LoginRequest),
        responses(
            BadRequestResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Sign-up, email verification and cookie sessions")
    )
)]
pub struct ApiDoc;

type SharedService<R> = State<Arc<UserService<R>>>;

/// Create the users router.
///
/// None of these routes are guarded; the session layer must wrap the router.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/", get(current_user::<R>))
        .route("/signup", post(signup::<R>))
        .route("/login", post(login::<R>))
        .route("/logout", post(logout))
        .route("/verify-email", get(verify_email::<R>))
        .with_state(Arc::new(service))
}

/// The logged-in user, or `null`
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "Current user including email, or null", body = Option<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn current_user<R: UserRepository>(
    State(service): SharedService<R>,
    session: AuthSession,
) -> Result<Json<Option<UserResponse>>, AppError> {
    let user_id = session.user_id().await?;
    Ok(Json(service.current_user(user_id).await?))
}

/// Register a user and send the verification email
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created, email not yet verified", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): SharedService<R>,
    JsonBody(input): JsonBody<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = service.signup(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Start a session for a verified user
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Logged in; the session cookie is set", body = UserResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): SharedService<R>,
    session: AuthSession,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = service.authenticate(input).await?;
    session.login(user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok((StatusCode::CREATED, Json(UserResponse::public(user))))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Users",
    responses(
        (status = 204, description = "Session ended"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn logout(session: AuthSession) -> Result<StatusCode, AppError> {
    session.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Redeem the link from the verification email
#[utoipa::path(
    get,
    path = "/verify-email",
    tag = "Users",
    params(VerifyEmailQuery),
    responses(
        (status = 303, description = "Redirect to the verified or failed page")
    )
)]
async fn verify_email<R: UserRepository>(
    State(service): SharedService<R>,
    Query(query): Query<VerifyEmailQuery>,
) -> Redirect {
    let config = service.verification();
    match service.verify_email(query.token.as_deref()).await {
        Ok(()) => Redirect::to(&config.verified_redirect),
        Err(e) => {
            tracing::info!(error = %e, "Email verification failed");
            Redirect::to(&config.failed_redirect)
        }
    }
}
