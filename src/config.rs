//! Server configuration read from the environment.

use crate::tracker::domain::UserId;
use std::env;
use thiserror::Error;
use uuid::Uuid;

/// Environment variable naming the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable naming the listen address.
pub const BIND_ADDR_VAR: &str = "TEAMFLOW_BIND_ADDR";

/// Environment variable naming the default audit actor.
pub const DEFAULT_ACTOR_VAR: &str = "TEAMFLOW_DEFAULT_ACTOR";

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DATABASE_URL` is not set.
    #[error("{DATABASE_URL_VAR} must be set")]
    MissingDatabaseUrl,

    /// The default actor is not a valid UUID.
    #[error("{DEFAULT_ACTOR_VAR} is not a valid UUID: {0}")]
    InvalidDefaultActor(#[source] uuid::Error),
}

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Listen address.
    pub bind_addr: String,
    /// Actor attributed to mutations that carry no explicit user.
    ///
    /// Stands in for unfinished auth integration; audit entries fall back
    /// to this id when the request names no actor.
    pub default_actor: Option<UserId>,
}

impl ServerConfig {
    /// Reads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when `DATABASE_URL` is
    /// unset and [`ConfigError::InvalidDefaultActor`] when the configured
    /// default actor is not a UUID.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let bind_addr =
            env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let default_actor = match env::var(DEFAULT_ACTOR_VAR) {
            Ok(raw) => Some(
                raw.parse::<Uuid>()
                    .map(UserId::from_uuid)
                    .map_err(ConfigError::InvalidDefaultActor)?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            database_url,
            bind_addr,
            default_actor,
        })
    }
}
