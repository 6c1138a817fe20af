use list_models::{ListRecord, RelationalList};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const LIST_SAVED: &str = "List saved";
pub const LIST_UPDATED: &str = "List updated";
pub const LIST_DELETED: &str = "List deleted";
pub const MISSING_TEXT: &str = "Please pass text.";

/// `{message}` body returned by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn saved() -> Self { Self::new(LIST_SAVED) }

    pub fn updated() -> Self { Self::new(LIST_UPDATED) }

    pub fn deleted() -> Self { Self::new(LIST_DELETED) }

    pub fn missing_text() -> Self { Self::new(MISSING_TEXT) }
}

/// Pagination keeps the historical shape: an outer array holding the one
/// requested page, or nothing when the page does not exist.
pub type ListPages = Vec<Vec<ListRecord>>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RelationalListResponse {
    pub data: Vec<RelationalList>,
}

impl From<Vec<RelationalList>> for RelationalListResponse {
    fn from(data: Vec<RelationalList>) -> Self { Self { data } }
}
