//! Process configuration read from the environment.
//!
//! DESIGN
//! ======
//! Only `DATABASE_URL` is required. Every other knob has a default, and a
//! malformed value falls back to that default instead of aborting startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use canvas::doc::SizeBounds;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Size range enforced on every note write.
    pub bounds: SizeBounds,
    /// Allowed CORS origin. `None` allows any origin.
    pub cors_origin: Option<String>,
    /// Apply pending migrations at startup.
    pub run_migrations: bool,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let profile = lookup("NOTE_SIZE_PROFILE");
        let bounds = profile
            .as_deref()
            .and_then(SizeBounds::from_profile)
            .unwrap_or_default();
        if let Some(name) = profile.as_deref().filter(|p| SizeBounds::from_profile(p).is_none()) {
            tracing::warn!(profile = name, "unknown NOTE_SIZE_PROFILE; using compact");
        }

        Ok(Self {
            database_url,
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            db_max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS),
            bounds,
            cors_origin: lookup("CORS_ORIGIN").filter(|v| !v.trim().is_empty()),
            run_migrations: lookup("RUN_MIGRATIONS")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(true),
        })
    }
}

fn parse_or<T: FromStr + Copy>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parse a boolean flag, accepting `1/true/yes/on` and `0/false/no/off`.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

