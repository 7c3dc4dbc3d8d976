use axum::extract::State;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /token/generate - issue a token for a generated sample username.
/// Development convenience endpoint; the raw token is the response body.
pub async fn generate_token(State(state): State<AppState>) -> Result<String, ApiError> {
    let token = state.jwt.issue_token(&sample_username())?;

    Ok(token)
}

fn sample_username() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("user-{}", &tag[..8])
}
