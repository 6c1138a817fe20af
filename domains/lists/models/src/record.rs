use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

pub const ID_FIELD: &str = "_id";
pub const TEXT_FIELD: &str = "text";

/// Arbitrary JSON properties of a record, keyed by field name.
pub type ListFields = Map<String, Value>;

/// One list item in the document store.
///
/// Only `_id` is fixed. Everything else, `text` included, lives in `fields`
/// and is stored exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: ListFields,
}

impl ListRecord {
    /// A record with a freshly assigned id. A client-supplied `_id` is
    /// dropped.
    pub fn new(fields: ListFields) -> Self {
        Self::with_id(Uuid::now_v7(), fields)
    }

    pub fn with_id(id: Uuid, mut fields: ListFields) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    pub fn text(&self) -> Option<&str> {
        self.fields.get(TEXT_FIELD).and_then(Value::as_str)
    }

    /// Shallow merge: every key in `patch` overwrites the field of the same
    /// name. Omitted fields are left alone and `_id` never changes.
    pub fn apply_patch(&mut self, patch: ListFields) {
        for (key, value) in patch {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// Outcome of checking the `text` field of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextField {
    /// Truthy scalar, normalised to the string that gets stored.
    Usable(String),
    /// Absent or falsy (`null`, `false`, `0`, `""`).
    Missing,
    /// Arrays and objects cannot be stored as text.
    Unsupported,
}

impl TextField {
    pub fn inspect(fields: &ListFields) -> Self {
        match fields.get(TEXT_FIELD) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => {
                Self::Missing
            }
            Some(Value::String(text)) if text.is_empty() => Self::Missing,
            Some(Value::String(text)) => Self::Usable(text.clone()),
            Some(Value::Bool(true)) => Self::Usable("true".to_string()),
            Some(Value::Number(number)) => {
                if number.as_f64().is_some_and(|n| n == 0.0) {
                    Self::Missing
                }
                else {
                    Self::Usable(number.to_string())
                }
            }
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                Self::Unsupported
            }
        }
    }
}
