use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `PORT` defaults to 3000 when unset or empty and must lie in
    /// [1, 65535]; `HOST` defaults to `0.0.0.0`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` if `PORT` is set to a non-numeric
    /// or out-of-range value. Invalid values abort startup rather than
    /// falling back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: resolve_port(env::var("PORT").ok().as_deref())?,
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolve the listening port from a raw `PORT` value.
///
/// Kept separate from `from_env` so the resolution rules can be tested
/// without touching process-wide environment state.
pub fn resolve_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    const DEFAULT_PORT: u16 = 3000;

    let Some(raw) = raw else {
        return Ok(DEFAULT_PORT);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_PORT);
    }

    match raw.parse::<u32>() {
        Ok(port @ 1..=65535) => Ok(port as u16),
        _ => Err(ConfigError::InvalidPort {
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value: '{value}', expected integer in [1,65535]")]
    InvalidPort { value: String },
}
