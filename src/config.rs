//! Process configuration, read from the environment (and `.env`, via `dotenv`).

use std::net::SocketAddr;
use thiserror::Error;

pub(crate) const DEFAULT_ADDR: &str = "127.0.0.1:8000";
pub(crate) const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
pub(crate) const DEFAULT_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("ADDR `{value}` is not a socket address: {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("DATABASE_MAX_CONNECTIONS `{0}` must be a positive integer")]
    MaxConnections(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    /// Address the server binds to.
    pub(crate) addr: SocketAddr,
    pub(crate) database_url: String,
    /// Size of the store's connection pool. `1` serializes all store access.
    pub(crate) max_connections: u32,
}

impl Config {
    /// Build the config from the process environment, falling back to defaults.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_value = lookup("ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr_value.parse().map_err(|source| ConfigError::Addr {
            value: addr_value.clone(),
            source,
        })?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::MaxConnections(raw)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            addr,
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_bind_loopback() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:8000".parse().unwrap());
        assert!(config.addr.ip().is_loopback());
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_with(&[
            ("ADDR", "127.0.0.1:9090"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 9090);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn bad_addr_is_rejected() {
        let err = config_with(&[("ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Addr { .. }));
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = config_with(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::MaxConnections(_)));
    }
}
