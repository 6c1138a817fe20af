use std::{net::SocketAddr, str::FromStr};

use anyhow::{Context, bail};
use list_dao::DEFAULT_KEY_PREFIX;
use redis_connection::config::RedisDbConfig;
use sql_connection::config::PostgresDbConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8880";
pub const DEFAULT_ROUTE_PREFIX: &str = "/__/list";

/// Where list records and relational rows live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Redis for documents, Postgres for the relational table
    External,
    /// Process-local stores, emptied on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "external" => Ok(Self::External),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown storage backend '{other}'"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Mount point of the list routes; empty means the root.
    pub route_prefix: String,
    pub backend: StorageBackend,
    pub postgres: PostgresDbConfig,
    pub redis: RedisDbConfig,
    pub key_prefix: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let route_prefix = normalize_prefix(
            &var("LIST_ROUTE_PREFIX")
                .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string()),
        );

        let backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::External,
        };

        let mut postgres = PostgresDbConfig::default();
        if let Some(uri) = var("DATABASE_URL") {
            postgres.uri = uri;
        }
        if let Some(max) = var("DB_MAX_CONN") {
            postgres.max_conn =
                Some(max.parse().context("DB_MAX_CONN must be a number")?);
        }
        if let Some(min) = var("DB_MIN_CONN") {
            postgres.min_conn =
                Some(min.parse().context("DB_MIN_CONN must be a number")?);
        }

        let mut redis = RedisDbConfig::default();
        if let Some(host) = var("REDIS_HOST") {
            redis.host = host;
        }
        if let Some(port) = var("REDIS_PORT") {
            redis.port = port.parse().context("REDIS_PORT must be a port")?;
        }
        if let Some(db) = var("REDIS_DB") {
            redis.db = db.parse().context("REDIS_DB must be 0-255")?;
        }
        redis.password = var("REDIS_PASSWORD");

        let key_prefix = var("LIST_KEY_PREFIX")
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());

        Ok(Self {
            bind_addr,
            route_prefix,
            backend,
            postgres,
            redis,
            key_prefix,
        })
    }
}

/// `lists/` and `/lists` both become `/lists`; `/` becomes empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    format!("/{trimmed}")
}
