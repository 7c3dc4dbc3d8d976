use serde::Deserialize;
use std::{env, fs, io};
use thiserror::Error;

/// Name of the YAML config file, resolved against the working directory.
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub web_service: WebServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebServiceConfig {
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiration_time_in_minutes: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {CONFIG_FILE}: {0}")]
    Read(#[from] io::Error),

    #[error("parsing {CONFIG_FILE}: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "users.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for WebServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt: JwtConfig::default(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_expiration_time_in_minutes: 60,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            web_service: WebServiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.yaml` in the working directory, then
    /// apply `USERAPI_*` environment overrides. A missing file falls back to
    /// defaults; a malformed file is a startup error.
    ///
    /// Env keys follow the config key path with `.` replaced by `_`, e.g.
    /// `webService.jwt.secret` -> `USERAPI_WEBSERVICE_JWT_SECRET`.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = match fs::read_to_string(CONFIG_FILE) {
            Ok(raw) => serde_yaml::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("USERAPI_DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("USERAPI_DATABASE_MAXCONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        // Web service overrides
        if let Ok(v) = env::var("USERAPI_WEBSERVICE_HOST") {
            self.web_service.host = v;
        }
        if let Ok(v) = env::var("USERAPI_WEBSERVICE_PORT") {
            self.web_service.port = v.parse().unwrap_or(self.web_service.port);
        }
        if let Ok(v) = env::var("USERAPI_WEBSERVICE_JWT_SECRET") {
            self.web_service.jwt.secret = v;
        }
        if let Ok(v) = env::var("USERAPI_WEBSERVICE_JWT_TOKENEXPIRATIONTIMEINMINUTES") {
            self.web_service.jwt.token_expiration_time_in_minutes = v
                .parse()
                .unwrap_or(self.web_service.jwt.token_expiration_time_in_minutes);
        }

        self
    }
}
