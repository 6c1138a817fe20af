use async_trait::async_trait;

#[async_trait]
pub trait DocumentDao: Send + Sync {
    type Document: Send + Sync + 'static;
    type Filter: Send + Sync;
    type ID: Copy + Send + Sync + 'static;
    type Error: Send + 'static;

    /// Every document accepted by `filter`, in storage order.
    async fn find(
        &self, filter: &Self::Filter,
    ) -> Result<Vec<Self::Document>, Self::Error>;

    /// At most `limit` documents after skipping the first `skip`.
    async fn find_window(
        &self, skip: u64, limit: u64,
    ) -> Result<Vec<Self::Document>, Self::Error>;

    async fn count(&self) -> Result<u64, Self::Error>;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Option<Self::Document>, Self::Error>;

    /// Stores a new document at the end of the storage order.
    async fn insert(
        &self, id: Self::ID, document: &Self::Document,
    ) -> Result<(), Self::Error>;

    /// Replaces an existing document. Returns `false` when `id` is unknown.
    async fn update(
        &self, id: Self::ID, document: &Self::Document,
    ) -> Result<bool, Self::Error>;

    /// Removes a document, returning it if it existed.
    async fn find_by_id_and_remove(
        &self, id: Self::ID,
    ) -> Result<Option<Self::Document>, Self::Error>;
}

#[async_trait]
pub trait RelationalDao: Send + Sync {
    type Row: Send + Sync + 'static;
    type Error: Send + 'static;

    async fn find_all(&self) -> Result<Vec<Self::Row>, Self::Error>;
}
