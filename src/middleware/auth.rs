use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the verified token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// JWT verification middleware for protected routes. On success the extracted
/// username is attached to the request for downstream handlers; on failure the
/// handler chain is short-circuited with an unauthorized problem response.
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)?;
    let claims = state.jwt.verify(&token)?;

    request.extensions_mut().insert(AuthUser {
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Extract the bearer token from the authorization header. Any shape problem
/// is the same failure as a missing token.
fn bearer_token(request: &Request) -> Result<String, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::TokenInvalid)?;

    let value = header.to_str().map_err(|_| AuthError::TokenInvalid)?;
    let token = value.strip_prefix("Bearer ").ok_or(AuthError::TokenInvalid)?;

    if token.trim().is_empty() {
        return Err(AuthError::TokenInvalid);
    }

    Ok(token.to_string())
}
