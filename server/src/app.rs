use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse,
    routing::get,
};
use list_dao::{
    MemoryListDao, MemoryRelationalListDao, RedisListDao, RelationalListDao,
};
use list_http::ListServices;
use redis_connection::{connect_redis_db, connection::RedisConnectionManager};
use sql_connection::{SqlConnect, connect_postgres_db};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::config::{ServerConfig, StorageBackend};

/// Pools behind the stores, reported by the health check. Both are absent
/// for the in-memory backend.
#[derive(Clone, Default)]
pub struct PoolStatus {
    sql: Option<SqlConnect>,
    redis: Option<RedisConnectionManager>,
}

impl PoolStatus {
    fn describe(&self) -> String {
        match (&self.sql, &self.redis) {
            (Some(sql), Some(redis)) => {
                let (sql_available, sql_size) = sql.get_pool_status();
                let (redis_available, redis_size) = redis.get_pool_status();
                format!(
                    "OK - Postgres Pool: {sql_available}/{sql_size} available, Redis Pool: {redis_available}/{redis_size} available"
                )
            }
            _ => "OK - In-memory storage".to_string(),
        }
    }
}

pub async fn connect_storage(
    config: &ServerConfig,
) -> anyhow::Result<(ListServices, PoolStatus)> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory list storage");
            let services = ListServices::new(
                Arc::new(MemoryListDao::new()),
                Arc::new(MemoryRelationalListDao::default()),
            );
            Ok((services, PoolStatus::default()))
        }
        StorageBackend::External => {
            info!("Initializing connection pools...");

            let pg_pool = connect_postgres_db(&config.postgres)
                .await
                .context("failed to connect to Postgres")?;
            let sql = SqlConnect::new(pg_pool);
            info!("PostgreSQL connection pool initialized");

            let redis_pool = connect_redis_db(&config.redis)
                .await
                .context("failed to create the Redis pool")?;
            let redis = RedisConnectionManager::new(redis_pool);
            info!("Redis connection pool initialized");

            let services = ListServices::new(
                Arc::new(RedisListDao::with_prefix(
                    redis.clone(),
                    &config.key_prefix,
                )),
                Arc::new(RelationalListDao::new(sql.clone())),
            );
            let pools = PoolStatus {
                sql: Some(sql),
                redis: Some(redis),
            };

            Ok((services, pools))
        }
    }
}

pub fn build_app(
    prefix: &str, services: ListServices, pools: PoolStatus,
) -> Router {
    let lists = list_http::routes(services);
    let api_routes = if prefix.is_empty() {
        lists
    }
    else {
        Router::new().nest(prefix, lists)
    };

    let doc = api_doc(prefix);

    Router::new()
        .route("/health", get(health_check))
        .with_state(pools)
        .merge(api_routes)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check),
    tags(
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "List API",
        description = "CRUD endpoints for schema-less lists",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_http::find_lists,
        list_http::paginate_lists,
        list_http::create_list,
        list_http::update_list,
        list_http::delete_list,
        list_http::relational_lists
    ),
    components(
        schemas(
            list_models::ListRecord,
            list_models::RelationalList,
            list_commands::CreateListCommand,
            list_commands::UpdateListCommand,
            list_responses::MessageResponse,
            list_responses::RelationalListResponse,
        )
    ),
    tags(
        (name = "lists", description = "List management endpoints")
    )
)]
struct ListApiDoc;

/// The list paths appear under the prefix they are mounted at.
fn api_doc(prefix: &str) -> utoipa::openapi::OpenApi {
    if prefix.is_empty() {
        ApiDoc::openapi().merge_from(ListApiDoc::openapi())
    }
    else {
        ApiDoc::openapi().nest(prefix, ListApiDoc::openapi())
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with connection pool status", body = String)
    ),
    tag = "health"
)]
async fn health_check(State(pools): State<PoolStatus>) -> impl IntoResponse {
    (StatusCode::OK, pools.describe())
}
