// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedAccount,
    models::{AccountResponse, AuthResponse, LoginRequest, RegisterRequest},
};
use crate::AppState;

/// Log in with an email or staff id
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state
        .auth_service
        .login(&request.login_key, &request.password)
        .await?;

    Ok(Json(response))
}

/// Register a new account (admin only; gated at the route layer)
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid input data"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Login key already taken"),
    ),
    security(("bearer_token" = [])),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let account = state.auth_service.register(request).await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Get the calling account
/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The calling account", body = AccountResponse),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_token" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<AccountResponse>, AuthError> {
    let response = state.auth_service.current_account(account.account_id).await?;

    Ok(Json(response))
}
