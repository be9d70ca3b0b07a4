use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ServerError;

pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Raw view of the process environment. The string parameters mirror
/// `getenv` semantics: absent means empty, and anything beyond the port is
/// left for the storage connector to reject.
#[derive(Debug, Deserialize)]
struct RawEnv {
    #[serde(default)]
    pg_host: String,
    #[serde(default)]
    pg_port: Option<String>,
    #[serde(default)]
    pg_username: String,
    #[serde(default)]
    pg_password: String,
    #[serde(default)]
    pg_database_name: String,
    #[serde(default)]
    http_port: Option<u16>,
    #[serde(default)]
    shutdown_timeout_secs: Option<u64>,
}

/// Connection parameters for the PostgreSQL backend. `password` is a secret
/// and must never appear in log output.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub http_port: u16,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }

    fn from_figment(figment: Figment) -> Result<Self, ServerError> {
        let raw: RawEnv = figment.extract().map_err(ServerError::Config)?;

        // The database port is the one actively validated value: it must be
        // present, base-10, and in 1..=65535. No default is substituted.
        let port = raw
            .pg_port
            .as_deref()
            .unwrap_or("")
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or(ServerError::InvalidPort)?;

        Ok(Config {
            database: DatabaseConfig {
                host: raw.pg_host,
                port,
                username: raw.pg_username,
                password: raw.pg_password,
                database_name: raw.pg_database_name,
            },
            http_port: raw.http_port.unwrap_or(DEFAULT_HTTP_PORT),
            shutdown_timeout: Duration::from_secs(
                raw.shutdown_timeout_secs
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            ),
        })
    }
}

/// Load the configuration from the process environment.
pub fn load() -> Result<Config, ServerError> {
    Config::from_figment(Figment::new().merge(Env::raw()))
}
