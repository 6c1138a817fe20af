use deadpool_redis::{Config, Pool, Runtime};
pub use deadpool_redis::{PoolError, redis::FromRedisValue};
pub use redis::{AsyncCommands, RedisError};
use tracing::{info, instrument};
use url::Url;
pub mod config;
pub mod connection;
pub mod json;

fn redis_url<C>(config: &C) -> anyhow::Result<Url>
where
    C: config::DbConnectConfig,
{
    let mut url = Url::parse("redis://")?;

    url.set_host(Some(config.host()))?;
    url.set_port(Some(config.port()))
        .map_err(|_| anyhow::anyhow!("redis url cannot carry a port"))?;
    if let Some(password) = config.password() {
        url.set_password(Some(password))
            .map_err(|_| anyhow::anyhow!("redis url cannot carry a password"))?;
    }
    url.set_path(&config.db().to_string());

    Ok(url)
}

#[instrument(skip_all, name = "connect-redis")]
pub async fn connect_redis_db<C>(config: &C) -> anyhow::Result<Pool>
where
    C: config::DbConnectConfig,
{
    let url = redis_url(config)?;

    info!(
        redis.host = config.host(),
        redis.port = config.port(),
        redis.db = config.db(),
        redis.connect = true
    );

    let cfg = Config {
        url: Some(url.to_string()),
        pool: Some(deadpool_redis::PoolConfig::default()),
        connection: None,
    };

    let pool = cfg.create_pool(Some(Runtime::Tokio1))?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedisDbConfig;

    #[test]
    fn test_url_construction() {
        let config = RedisDbConfig {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
        };

        let url = redis_url(&config).unwrap();
        assert_eq!(url.to_string(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_url_with_password() {
        let config = RedisDbConfig {
            host: "cache.internal".to_string(),
            port: 6380,
            db: 2,
            password: Some("s3cret".to_string()),
        };

        let url = redis_url(&config).unwrap();
        assert_eq!(url.to_string(), "redis://:s3cret@cache.internal:6380/2");
    }

    #[test]
    fn test_redis_db_config_default() {
        let json = r#"{}"#;
        let config: RedisDbConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 0);
        assert!(config.password.is_none());
    }
}
