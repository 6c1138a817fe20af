use std::sync::Arc;

use database_traits::{DocumentDao, RelationalDao};
use list_errors::ListError;
use list_models::{ListFilter, ListRecord, RelationalList};
use uuid::Uuid;

mod document;
mod memory;
mod relational;

pub use document::{DEFAULT_KEY_PREFIX, RedisListDao};
pub use memory::{MemoryListDao, MemoryRelationalListDao};
pub use relational::RelationalListDao;

/// Any document store holding list records.
pub type ListStore = dyn DocumentDao<
        Document = ListRecord,
        Filter = ListFilter,
        ID = Uuid,
        Error = ListError,
    >;

/// Any relational store exposing the `list` table.
pub type RelationalListStore =
    dyn RelationalDao<Row = RelationalList, Error = ListError>;

pub type SharedListStore = Arc<ListStore>;
pub type SharedRelationalListStore = Arc<RelationalListStore>;
