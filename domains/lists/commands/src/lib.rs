use list_models::ListFields;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of a create request: `text` plus any other properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateListCommand {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: ListFields,
}

/// Body of an update request: the keys to overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateListCommand {
    #[serde(skip)]
    pub list_id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub patch: ListFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteListCommand {
    pub list_id: Uuid,
}
