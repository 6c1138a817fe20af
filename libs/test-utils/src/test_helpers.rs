use anyhow::Result;
use redis_connection::connection::RedisConnectionManager;
use sql_connection::SqlConnect;

use crate::{TestPostgresContainer, TestRedisContainer};

/// Insert a row into the relational `list` table and return its id
pub async fn seed_relational_list(
    container: &TestPostgresContainer, text: &str,
) -> Result<i64> {
    let client = container.pool.get().await?;
    let row = client
        .query_one("INSERT INTO list (text) VALUES ($1) RETURNING id", &[
            &text,
        ])
        .await?;
    Ok(row.get(0))
}

/// Clean all relational test data
pub async fn clean_test_data(container: &TestPostgresContainer) -> Result<()> {
    container.execute_sql("DELETE FROM list").await
}

/// SQL handle over a test container, for DAOs and handlers
pub fn create_sql_connect(container: &TestPostgresContainer) -> SqlConnect {
    SqlConnect::new(container.pool.clone())
}

/// Redis handle over a test container, for DAOs and handlers
pub fn create_redis_connect(
    container: &TestRedisContainer,
) -> RedisConnectionManager {
    RedisConnectionManager::new(container.pool.clone())
}
