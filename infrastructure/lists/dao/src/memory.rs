use std::sync::Arc;

use async_trait::async_trait;
use database_traits::{DocumentDao, RelationalDao};
use list_errors::ListError;
use list_models::{ListFilter, ListRecord, RelationalList};
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

/// Process-local document store. Records keep insertion order.
#[derive(Clone, Default)]
pub struct MemoryListDao {
    records: Arc<RwLock<Vec<ListRecord>>>,
}

impl MemoryListDao {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl DocumentDao for MemoryListDao {
    type Document = ListRecord;
    type Error = ListError;
    type Filter = ListFilter;
    type ID = Uuid;

    #[instrument(skip_all)]
    async fn find(
        &self, filter: &ListFilter,
    ) -> Result<Vec<ListRecord>, ListError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn find_window(
        &self, skip: u64, limit: u64,
    ) -> Result<Vec<ListRecord>, ListError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        let records = self.records.read().await;
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, ListError> {
        Ok(self.records.read().await.len() as u64)
    }

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Uuid,
    ) -> Result<Option<ListRecord>, ListError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    #[instrument(skip(self, document))]
    async fn insert(
        &self, id: Uuid, document: &ListRecord,
    ) -> Result<(), ListError> {
        let mut record = document.clone();
        record.id = id;
        self.records.write().await.push(record);
        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn update(
        &self, id: Uuid, document: &ListRecord,
    ) -> Result<bool, ListError> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        *slot = document.clone();
        slot.id = id;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_remove(
        &self, id: Uuid,
    ) -> Result<Option<ListRecord>, ListError> {
        let mut records = self.records.write().await;
        let removed = records
            .iter()
            .position(|r| r.id == id)
            .map(|index| records.remove(index));
        Ok(removed)
    }
}

/// Fixed set of relational rows, for running without Postgres.
#[derive(Clone, Default)]
pub struct MemoryRelationalListDao {
    rows: Arc<Vec<RelationalList>>,
}

impl MemoryRelationalListDao {
    pub fn new(rows: Vec<RelationalList>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }
}

#[async_trait]
impl RelationalDao for MemoryRelationalListDao {
    type Error = ListError;
    type Row = RelationalList;

    async fn find_all(&self) -> Result<Vec<RelationalList>, ListError> {
        Ok(self.rows.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::{Value, json};

    use super::*;

    fn record(text: &str) -> ListRecord {
        match json!({ "text": text }) {
            Value::Object(fields) => ListRecord::new(fields),
            _ => unreachable!(),
        }
    }

    async fn seeded(texts: &[&str]) -> (MemoryListDao, Vec<ListRecord>) {
        let dao = MemoryListDao::new();
        let mut records = Vec::new();
        for text in texts {
            let r = record(text);
            dao.insert(r.id, &r).await.unwrap();
            records.push(r);
        }
        (dao, records)
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let (dao, records) = seeded(&["one", "two", "three"]).await;

        let found = dao.find(&ListFilter::default()).await.unwrap();

        assert_eq!(found, records);
        assert_eq!(dao.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_applies_filter() {
        let (dao, records) = seeded(&["Buy MILK", "walk dog"]).await;
        let filter = ListFilter {
            id: None,
            text: Some(ListFilter::text_pattern("milk").unwrap()),
        };

        let found = dao.find(&filter).await.unwrap();

        assert_eq!(found, vec![records[0].clone()]);
    }

    #[tokio::test]
    async fn test_find_window_slices() {
        let (dao, records) = seeded(&["a", "b", "c", "d", "e"]).await;

        assert_eq!(dao.find_window(2, 2).await.unwrap(), records[2..4]);
        assert_eq!(dao.find_window(4, 10).await.unwrap(), records[4..]);
        assert!(dao.find_window(5, 2).await.unwrap().is_empty());
        assert!(dao.find_window(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_existing_only() {
        let (dao, records) = seeded(&["old"]).await;
        let mut changed = records[0].clone();
        changed.fields.insert("text".into(), json!("new"));

        assert!(dao.update(changed.id, &changed).await.unwrap());
        assert_eq!(dao.find_by_id(changed.id).await.unwrap(), Some(changed));

        let stranger = record("nobody");
        assert!(!dao.update(stranger.id, &stranger).await.unwrap());
        assert_eq!(dao.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_returns_record_once() {
        let (dao, records) = seeded(&["a", "b"]).await;
        let id = records[0].id;

        assert_eq!(
            dao.find_by_id_and_remove(id).await.unwrap(),
            Some(records[0].clone())
        );
        assert_eq!(dao.find_by_id_and_remove(id).await.unwrap(), None);
        assert_eq!(dao.find(&ListFilter::default()).await.unwrap(), records[1..]);
    }

    #[tokio::test]
    async fn test_relational_returns_seeded_rows() {
        let now = Utc::now();
        let rows = vec![RelationalList {
            id: 1,
            text: "first".into(),
            created_at: now,
            updated_at: now,
        }];
        let dao = MemoryRelationalListDao::new(rows.clone());

        assert_eq!(dao.find_all().await.unwrap(), rows);
        assert!(
            MemoryRelationalListDao::default()
                .find_all()
                .await
                .unwrap()
                .is_empty()
        );
    }
}
