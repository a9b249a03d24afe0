//! Service settings read from environment variables. Binaries load `.env` first via `dotenvy`.

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// `DB_URI`, falling back to `DATABASE_URL`.
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or blank keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        let database_url = lookup("DB_URI")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or(defaults.database_url);
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let body_limit = parse_var(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit)?;

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            body_limit,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_address(), "127.0.0.1:5555");
    }

    #[test]
    fn db_uri_wins_over_database_url() {
        let settings = settings_from(&[
            ("DB_URI", "sqlite://primary.db"),
            ("DATABASE_URL", "sqlite://fallback.db"),
        ])
        .unwrap();
        assert_eq!(settings.database_url, "sqlite://primary.db");

        let settings = settings_from(&[("DATABASE_URL", "sqlite://fallback.db")]).unwrap();
        assert_eq!(settings.database_url, "sqlite://fallback.db");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = settings_from(&[("PORT", "  "), ("DB_URI", "")]).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn numeric_overrides_are_parsed() {
        let settings = settings_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.max_connections, 12);
        assert_eq!(settings.body_limit, 1024);
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let err = settings_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = settings_from(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                ..
            }
        ));
    }
}
