//! Runtime configuration, read from the environment (and `.env`, which the
//! binary loads first).
//!
//! | Variable       | Default             |
//! |----------------|---------------------|
//! | `TODO_STORE`   | `sqlite`            |
//! | `DATABASE_URL` | `sqlite://todos.db` |
//! | `HOST`         | `127.0.0.1`         |
//! | `PORT`         | `3001`              |
//! | `SEED_EXAMPLE` | `true`              |

use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind { Sqlite, Memory }

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreKind,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Insert an example todo when the store starts out empty.
    pub seed_example: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid value `{value}` for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = parse_var(&lookup, "TODO_STORE", StoreKind::Sqlite, |v| v.parse().ok())?;
        let host = parse_var(&lookup, "HOST", IpAddr::from([127, 0, 0, 1]), |v| v.parse().ok())?;
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT, |v| v.parse().ok())?;
        let seed_example = parse_var(&lookup, "SEED_EXAMPLE", true, parse_bool)?;
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        Ok(Self { store, database_url, bind_addr: SocketAddr::new(host, port), seed_example })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError { key, value }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.store, StoreKind::Sqlite);
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.bind_addr, "127.0.0.1:3001".parse().unwrap());
        assert!(cfg.seed_example);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("TODO_STORE", "Memory"),
            ("DATABASE_URL", "sqlite://data/todos.db"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("SEED_EXAMPLE", "no"),
        ])
        .unwrap();
        assert_eq!(cfg.store, StoreKind::Memory);
        assert_eq!(cfg.database_url, "sqlite://data/todos.db");
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(!cfg.seed_example);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(config(&[("PORT", "http")]).unwrap_err().key, "PORT");
        assert_eq!(config(&[("TODO_STORE", "mongo")]).unwrap_err().key, "TODO_STORE");
        assert_eq!(config(&[("SEED_EXAMPLE", "maybe")]).unwrap_err().key, "SEED_EXAMPLE");
        assert_eq!(config(&[("HOST", "localhost")]).unwrap_err().key, "HOST");
    }
}
