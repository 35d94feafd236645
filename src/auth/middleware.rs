// Authentication middleware for protected routes

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Authenticated account extractor for protected routes
///
/// Validates the bearer token and exposes the claims; handlers that need
/// the full account resolve it through the service layer.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: i32,
    pub role: Role,
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(parts_headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = parts_headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

/// Build a TokenService from the process-wide secret
fn token_service_from_env() -> Result<TokenService, AuthError> {
    let jwt_secret = std::env::var("JWT_SECRET")
        .map_err(|_| AuthError::ConfigError("JWT_SECRET not configured".to_string()))?;
    Ok(TokenService::new(jwt_secret))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let token_service = token_service_from_env()?;
        let claims = token_service.validate_token(token)?;

        Ok(AuthenticatedAccount {
            account_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Authorization middleware that requires a specific role
///
/// Validates the bearer token and rejects the request with 403 when the
/// token's role does not match.
#[derive(Debug, Clone)]
pub struct RequireRole {
    required_role: Role,
}

impl RequireRole {
    /// Create a new RequireRole middleware with the specified role requirement
    pub fn new(required_role: Role) -> Self {
        Self { required_role }
    }

    /// Create a middleware that requires the Admin role
    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    /// Middleware function that validates role-based access
    pub async fn middleware(
        self,
        request: Request<Body>,
        next: Next,
    ) -> Result<Response, AuthError> {
        let endpoint = request.uri().path().to_string();

        let token = bearer_token(request.headers()).map_err(|e| {
            warn!("Auth header rejected for protected endpoint {}: {}", endpoint, e);
            e
        })?;

        let token_service = token_service_from_env()?;
        let claims = token_service.validate_token(token)?;

        if claims.role != self.required_role {
            warn!(
                "Authorization failed: account_id={}, required_role={}, actual_role={}, endpoint={}",
                claims.sub, self.required_role, claims.role, endpoint
            );
            return Err(AuthError::InsufficientPermissions {
                required: self.required_role,
                actual: claims.role,
            });
        }

        debug!(
            "Authorization successful: account_id={}, role={}, endpoint={}",
            claims.sub, claims.role, endpoint
        );
        Ok(next.run(request).await)
    }
}
