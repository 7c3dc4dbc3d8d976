use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{AuthError, JwtService};
use crate::config::AppConfig;
use crate::services::user::{user_service, UserEntity};
use crate::store::Repository;

/// Shared application state, built once at startup and injected into every
/// handler. Construction fails when the configuration cannot support it
/// (e.g. missing JWT secret).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtService>,
    pub users: Arc<dyn Repository<UserEntity>>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: SqlitePool) -> Result<Self, AuthError> {
        let jwt = JwtService::from_config(&config.web_service.jwt)?;

        Ok(Self {
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            users: Arc::new(user_service(pool)),
        })
    }
}
