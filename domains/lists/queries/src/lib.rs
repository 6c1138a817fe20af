use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FindListsQuery {
    pub id: Option<Uuid>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PaginateListsQuery {
    pub page: u64,
    pub row: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct RelationalListsQuery;
