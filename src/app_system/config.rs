use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "crud-product";
pub const DEFAULT_SERVICE_BUFFER: usize = 100;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `MONGODB_URI`
    pub mongodb_uri: String,
    /// `DATABASE_NAME`
    pub database_name: String,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `SERVICE_BUFFER`, capacity of the product service channel.
    pub service_buffer: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup. Unset and empty values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(uri) = get("MONGODB_URI") {
            config.mongodb_uri = uri;
        }
        if let Some(name) = get("DATABASE_NAME") {
            config.database_name = name;
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: addr.clone(),
            })?;
        }
        if let Some(buffer) = get("SERVICE_BUFFER") {
            config.service_buffer = match buffer.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SERVICE_BUFFER",
                        value: buffer,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            service_buffer: DEFAULT_SERVICE_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "crud-product");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[("MONGODB_URI", ""), ("DATABASE_NAME", "  ")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("DATABASE_NAME", "catalog"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("SERVICE_BUFFER", "8"),
        ]))
        .unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.database_name, "catalog");
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.service_buffer, 8);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue { key: "BIND_ADDR", value: "not-an-addr".to_string() }
        );

        let err = AppConfig::from_lookup(lookup(&[("SERVICE_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SERVICE_BUFFER", .. }));
    }
}
