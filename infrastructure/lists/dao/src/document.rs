use async_trait::async_trait;
use database_traits::DocumentDao;
use list_errors::ListError;
use list_models::{ListFilter, ListRecord};
use redis::{AsyncCommands, ExistenceCheck, SetOptions};
use redis_connection::{connection::RedisConnectionManager, json::Json};
use tracing::instrument;
use uuid::Uuid;

pub const DEFAULT_KEY_PREFIX: &str = "lists";

/// List records in Redis.
///
/// Each record is a JSON string under `{prefix}:doc:{id}`; the Redis list
/// `{prefix}:ids` holds ids in insertion order and is the storage order for
/// finds and pages.
#[derive(Clone)]
pub struct RedisListDao {
    redis: RedisConnectionManager,
    prefix: String,
}

impl RedisListDao {
    pub fn new(redis: RedisConnectionManager) -> Self {
        Self::with_prefix(redis, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(redis: RedisConnectionManager, prefix: &str) -> Self {
        Self {
            redis,
            prefix: prefix.to_string(),
        }
    }

    fn document_key(&self, id: Uuid) -> String {
        format!("{}:doc:{id}", self.prefix)
    }

    fn index_key(&self) -> String { format!("{}:ids", self.prefix) }

    /// Fetches documents for `ids`, keeping their order. Ids whose document
    /// is gone are skipped.
    async fn load(
        &self, ids: Vec<String>,
    ) -> Result<Vec<ListRecord>, ListError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .iter()
            .map(|id| format!("{}:doc:{id}", self.prefix))
            .collect();

        let mut conn = self.redis.get_connection().await?;
        let documents: Vec<Option<Json<ListRecord>>> = conn.mget(keys).await?;

        Ok(documents.into_iter().flatten().map(Json::inner).collect())
    }
}

#[async_trait]
impl DocumentDao for RedisListDao {
    type Document = ListRecord;
    type Error = ListError;
    type Filter = ListFilter;
    type ID = Uuid;

    #[instrument(skip_all)]
    async fn find(
        &self, filter: &ListFilter,
    ) -> Result<Vec<ListRecord>, ListError> {
        if let Some(id) = filter.id {
            let record = self.find_by_id(id).await?;
            return Ok(record.into_iter().filter(|r| filter.matches(r)).collect());
        }

        let ids: Vec<String> = {
            let mut conn = self.redis.get_connection().await?;
            conn.lrange(self.index_key(), 0, -1).await?
        };

        let records = self.load(ids).await?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    #[instrument(skip(self))]
    async fn find_window(
        &self, skip: u64, limit: u64,
    ) -> Result<Vec<ListRecord>, ListError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let start = isize::try_from(skip).unwrap_or(isize::MAX);
        let stop = isize::try_from(skip.saturating_add(limit - 1))
            .unwrap_or(isize::MAX);

        let ids: Vec<String> = {
            let mut conn = self.redis.get_connection().await?;
            conn.lrange(self.index_key(), start, stop).await?
        };

        self.load(ids).await
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ListError> {
        let mut conn = self.redis.get_connection().await?;
        let count: u64 = conn.llen(self.index_key()).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Uuid,
    ) -> Result<Option<ListRecord>, ListError> {
        let mut conn = self.redis.get_connection().await?;
        let document: Option<Json<ListRecord>> =
            conn.get(self.document_key(id)).await?;
        Ok(document.map(Json::inner))
    }

    #[instrument(skip(self, document))]
    async fn insert(
        &self, id: Uuid, document: &ListRecord,
    ) -> Result<(), ListError> {
        let mut conn = self.redis.get_connection().await?;

        let _: () = redis::pipe()
            .atomic()
            .set(self.document_key(id), Json(document))
            .ignore()
            .rpush(self.index_key(), id.to_string())
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn update(
        &self, id: Uuid, document: &ListRecord,
    ) -> Result<bool, ListError> {
        let mut conn = self.redis.get_connection().await?;

        let options =
            SetOptions::default().conditional_set(ExistenceCheck::XX);
        let reply: Option<String> = conn
            .set_options(self.document_key(id), Json(document), options)
            .await?;

        Ok(reply.is_some())
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_remove(
        &self, id: Uuid,
    ) -> Result<Option<ListRecord>, ListError> {
        let Some(record) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut conn = self.redis.get_connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .del(self.document_key(id))
            .ignore()
            .lrem(self.index_key(), 0, id.to_string())
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(Some(record))
    }
}
