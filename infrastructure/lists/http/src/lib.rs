use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use common_errors::AppError;
use list_command_handlers::{
    CreateListHandler, DeleteListHandler, UpdateListHandler,
};
use list_commands::{CreateListCommand, DeleteListCommand, UpdateListCommand};
use list_dao::{SharedListStore, SharedRelationalListStore};
use list_errors::ListError;
use list_models::ListRecord;
use list_queries::{FindListsQuery, PaginateListsQuery, RelationalListsQuery};
use list_query_handlers::{
    FindListsQueryHandler, PaginateListsQueryHandler,
    RelationalListsQueryHandler,
};
use list_responses::{ListPages, MessageResponse, RelationalListResponse};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct ListServices {
    pub create_list: CreateListHandler,
    pub update_list: UpdateListHandler,
    pub delete_list: DeleteListHandler,

    pub find_lists: FindListsQueryHandler,
    pub paginate_lists: PaginateListsQueryHandler,
    pub relational_lists: RelationalListsQueryHandler,
}

impl ListServices {
    pub fn new(
        store: SharedListStore, relational: SharedRelationalListStore,
    ) -> Self {
        Self {
            create_list: CreateListHandler::new(store.clone()),
            update_list: UpdateListHandler::new(store.clone()),
            delete_list: DeleteListHandler::new(store.clone()),
            find_lists: FindListsQueryHandler::new(store.clone()),
            paginate_lists: PaginateListsQueryHandler::new(store),
            relational_lists: RelationalListsQueryHandler::new(relational),
        }
    }
}

/// The list resource, relative to wherever it is mounted.
pub fn routes(services: ListServices) -> Router {
    Router::new()
        .route("/", get(find_lists).post(create_list))
        .route("/pagination/{page}/{row}", get(paginate_lists))
        .route("/relational", get(relational_lists))
        .route("/{id}", axum::routing::put(update_list).delete(delete_list))
        .with_state(services)
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListQueryParams {
    /// Exact list id
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Case-insensitive regular expression matched against `text`
    pub text: Option<String>,
}

impl ListQueryParams {
    /// Empty parameters count as absent.
    fn into_query(self) -> Result<FindListsQuery, ListError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .map(|id| ListError::parse_id(&id))
            .transpose()?;
        let text = self.text.filter(|text| !text.is_empty());

        Ok(FindListsQuery { id, text })
    }
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQueryParams),
    responses(
        (status = 200, description = "Matching lists in storage order", body = Vec<ListRecord>),
        (status = 400, description = "Invalid id or text pattern", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn find_lists(
    State(services): State<ListServices>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<Vec<ListRecord>>, AppError> {
    let query = params.into_query()?;
    let lists = services.find_lists.execute(query).await?;

    Ok(Json(lists))
}

/// Page numbers that are not non-negative integers select no page.
fn lenient_u64(value: &str) -> u64 { value.trim().parse().unwrap_or(0) }

#[utoipa::path(
    get,
    path = "/pagination/{page}/{row}",
    params(
        ("page" = u64, Path, description = "1-indexed page number"),
        ("row" = u64, Path, description = "Lists per page")
    ),
    responses(
        (status = 200, description = "The requested page inside an outer array, or an empty array", body = Vec<Vec<ListRecord>>),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn paginate_lists(
    State(services): State<ListServices>,
    Path((page, row)): Path<(String, String)>,
) -> Result<Json<ListPages>, AppError> {
    let query = PaginateListsQuery {
        page: lenient_u64(&page),
        row: lenient_u64(&row),
    };
    let pages = services.paginate_lists.execute(query).await?;

    Ok(Json(pages))
}

/// An empty body is an empty object; anything else must be a JSON object.
fn parse_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        AppError::bad_request_with_details(
            "INVALID_BODY",
            "Request body must be a JSON object",
            &e.to_string(),
        )
    })
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CreateListCommand,
    responses(
        (status = 200, description = "List saved, or the missing text message", body = MessageResponse),
        (status = 400, description = "Body is not an object, or text is an array or object", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn create_list(
    State(services): State<ListServices>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let command: CreateListCommand = parse_body(&body)?;
    let result = services.create_list.execute(command).await?;

    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/{id}",
    request_body = UpdateListCommand,
    params(
        ("id" = String, Path, description = "List ID")
    ),
    responses(
        (status = 200, description = "List updated", body = MessageResponse),
        (status = 400, description = "Invalid list id or body", body = common_errors::ApiErrorResponse),
        (status = 404, description = "List not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn update_list(
    State(services): State<ListServices>, Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let list_id = ListError::parse_id(&id)?;
    let mut command: UpdateListCommand = parse_body(&body)?;
    command.list_id = list_id;

    let result = services.update_list.execute(command).await?;
    tracing::info!("List updated: {}", id);

    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(
        ("id" = String, Path, description = "List ID")
    ),
    responses(
        (status = 200, description = "List deleted, whether or not it existed", body = MessageResponse),
        (status = 400, description = "Invalid list id", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn delete_list(
    State(services): State<ListServices>, Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let command = DeleteListCommand {
        list_id: ListError::parse_id(&id)?,
    };
    let result = services.delete_list.execute(command).await?;

    tracing::info!("List deleted: {}", id);

    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/relational",
    responses(
        (status = 200, description = "Every row of the relational list table", body = RelationalListResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "lists"
)]
#[instrument(skip_all)]
pub async fn relational_lists(
    State(services): State<ListServices>,
) -> Result<Json<RelationalListResponse>, AppError> {
    let response = services
        .relational_lists
        .execute(RelationalListsQuery)
        .await?;

    Ok(Json(response))
}
