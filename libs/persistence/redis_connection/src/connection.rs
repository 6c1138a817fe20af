use deadpool_redis::{Connection, Pool, PoolError};

/// Handle on the document store, cloned into every DAO.
#[derive(Clone)]
pub struct RedisConnectionManager {
    pool: Pool,
}

impl RedisConnectionManager {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    pub async fn get_connection(&self) -> Result<Connection, PoolError> {
        self.pool.get().await
    }

    /// (available, size) of the pool, for health reporting
    pub fn get_pool_status(&self) -> (usize, usize) {
        let status = self.pool.status();
        (status.available, status.size)
    }
}
