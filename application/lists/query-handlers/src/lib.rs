use dao_utils::pagination::PageRequest;
use list_dao::{SharedListStore, SharedRelationalListStore};
use list_errors::ListError;
use list_models::{ListFilter, ListRecord};
use list_queries::{FindListsQuery, PaginateListsQuery, RelationalListsQuery};
use list_responses::{ListPages, RelationalListResponse};
use tracing::instrument;

#[derive(Clone)]
pub struct FindListsQueryHandler {
    store: SharedListStore,
}

impl FindListsQueryHandler {
    pub fn new(store: SharedListStore) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: FindListsQuery,
    ) -> Result<Vec<ListRecord>, ListError> {
        let text = query
            .text
            .as_deref()
            .map(ListFilter::text_pattern)
            .transpose()?;

        let filter = ListFilter { id: query.id, text };
        let lists = self.store.find(&filter).await?;

        tracing::debug!(count = lists.len(), "Lists found");
        Ok(lists)
    }
}

#[derive(Clone)]
pub struct PaginateListsQueryHandler {
    store: SharedListStore,
}

impl PaginateListsQueryHandler {
    pub fn new(store: SharedListStore) -> Self { Self { store } }

    /// One page wrapped in an outer array, or an empty array when the page
    /// is out of range.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: PaginateListsQuery,
    ) -> Result<ListPages, ListError> {
        let total = self.store.count().await?;

        let Some(window) = PageRequest::new(query.page, query.row).window(total)
        else {
            tracing::debug!(total, "Page out of range");
            return Ok(Vec::new());
        };

        let page = self.store.find_window(window.skip, window.limit).await?;
        Ok(vec![page])
    }
}

#[derive(Clone)]
pub struct RelationalListsQueryHandler {
    store: SharedRelationalListStore,
}

impl RelationalListsQueryHandler {
    pub fn new(store: SharedRelationalListStore) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, _query: RelationalListsQuery,
    ) -> Result<RelationalListResponse, ListError> {
        let rows = self.store.find_all().await?;
        Ok(rows.into())
    }
}
