use list_commands::{CreateListCommand, DeleteListCommand, UpdateListCommand};
use list_dao::SharedListStore;
use list_errors::ListError;
use list_models::{ListRecord, TEXT_FIELD, TextField};
use list_responses::MessageResponse;
use serde_json::Value;
use tracing::instrument;

#[derive(Clone)]
pub struct CreateListHandler {
    store: SharedListStore,
}

impl CreateListHandler {
    pub fn new(store: SharedListStore) -> Self { Self { store } }

    /// Saves a new record. A request without usable `text` is answered with
    /// a message and persists nothing.
    #[instrument(skip_all)]
    pub async fn execute(
        &self, command: CreateListCommand,
    ) -> Result<MessageResponse, ListError> {
        let mut fields = command.fields;

        let text = match TextField::inspect(&fields) {
            TextField::Usable(text) => text,
            TextField::Missing => {
                tracing::debug!("Rejected list without text");
                return Ok(MessageResponse::missing_text());
            }
            TextField::Unsupported => return Err(ListError::UnsupportedText),
        };
        fields.insert(TEXT_FIELD.to_string(), Value::String(text));

        let record = ListRecord::new(fields);
        self.store.insert(record.id, &record).await?;
        tracing::debug!(list_id = %record.id, "List saved");

        Ok(MessageResponse::saved())
    }
}

#[derive(Clone)]
pub struct UpdateListHandler {
    store: SharedListStore,
}

impl UpdateListHandler {
    pub fn new(store: SharedListStore) -> Self { Self { store } }

    #[instrument(skip_all, fields(list_id = %command.list_id))]
    pub async fn execute(
        &self, command: UpdateListCommand,
    ) -> Result<MessageResponse, ListError> {
        let list_id = command.list_id;
        let not_found = move || ListError::NotFound { list_id };

        let mut record = self
            .store
            .find_by_id(list_id)
            .await?
            .ok_or_else(not_found)?;

        record.apply_patch(command.patch);

        // removed between the read and the write
        if !self.store.update(record.id, &record).await? {
            return Err(not_found());
        }

        Ok(MessageResponse::updated())
    }
}

#[derive(Clone)]
pub struct DeleteListHandler {
    store: SharedListStore,
}

impl DeleteListHandler {
    pub fn new(store: SharedListStore) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteListCommand,
    ) -> Result<MessageResponse, ListError> {
        let removed = self.store.find_by_id_and_remove(command.list_id).await?;
        if removed.is_none() {
            tracing::debug!("No list to delete");
        }

        Ok(MessageResponse::deleted())
    }
}
