use crate::auth::token::SessionConfig;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Credentials of a principal login created at startup when none exists yet
#[derive(Debug, Clone)]
pub struct BootstrapLogin {
    pub username: String,
    pub password: String,
}

/// Server configuration loaded from the environment (and `.env`)
///
/// | Env Var                         | Default   |
/// |---------------------------------|-----------|
/// | `DATABASE_URL`                  | required  |
/// | `SESSION_SECRET`                | required  |
/// | `HOST`                          | `0.0.0.0` |
/// | `PORT`                          | `3001`    |
/// | `SESSION_TTL_MINUTES`           | `480`     |
/// | `BOOTSTRAP_PRINCIPAL_USERNAME`  | unset     |
/// | `BOOTSTRAP_PRINCIPAL_PASSWORD`  | unset     |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
    pub bootstrap: Option<BootstrapLogin>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let ttl_minutes = match lookup("SESSION_TTL_MINUTES") {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SESSION_TTL_MINUTES",
                        value,
                    });
                }
            },
            None => DEFAULT_SESSION_TTL_MINUTES,
        };

        let bootstrap = match (
            lookup("BOOTSTRAP_PRINCIPAL_USERNAME"),
            lookup("BOOTSTRAP_PRINCIPAL_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapLogin { username, password }),
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            session: SessionConfig {
                secret: required("SESSION_SECRET")?,
                ttl_minutes,
            },
            bootstrap,
        })
    }
}
