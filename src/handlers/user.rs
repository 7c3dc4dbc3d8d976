use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::user::UserEntity;
use crate::state::AppState;

/// POST /user - create a user from the request body.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(mut user): Json<UserEntity>,
) -> Result<Json<UserEntity>, ApiError> {
    validate(&user)?;

    tracing::debug!(by = %auth.username, "creating user");
    state.users.save(&mut user).await?;

    Ok(Json(user))
}

/// GET /users - list all users.
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserEntity>>, ApiError> {
    let users = state.users.get_with_filter(Vec::new()).await?;

    Ok(Json(users))
}

/// GET /user/:id - fetch a single user; 404 when absent.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserEntity>, ApiError> {
    let user = state.users.get_by_id(id).await?;

    Ok(Json(user))
}

/// PUT /user/:id - update a user. The path and body must agree on the
/// identifier before storage is touched.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(auth): Extension<AuthUser>,
    Json(mut user): Json<UserEntity>,
) -> Result<Json<UserEntity>, ApiError> {
    validate(&user)?;

    if user.id != id {
        return Err(ApiError::bad_request(
            "user id in path and in body are not equal",
        ));
    }

    tracing::debug!(by = %auth.username, id, "updating user");
    state.users.save(&mut user).await?;

    Ok(Json(user))
}

/// DELETE /user/:id - delete a user. Deleting an absent id still succeeds.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(by = %auth.username, id, "deleting user");
    state.users.delete_by_id(id).await?;

    Ok(StatusCode::OK)
}

fn validate(user: &UserEntity) -> Result<(), ApiError> {
    if user.name.is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        let user = UserEntity::default();
        assert!(validate(&user).is_err());
    }

    #[test]
    fn accepts_named_user() {
        let user = UserEntity {
            name: "Alice".to_string(),
            ..Default::default()
        };
        assert!(validate(&user).is_ok());
    }
}
