use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::Utc;
use list_dao::{MemoryListDao, MemoryRelationalListDao};
use list_http::{ListServices, routes};
use list_models::RelationalList;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app_with_rows(rows: Vec<RelationalList>) -> Router {
    let services = ListServices::new(
        Arc::new(MemoryListDao::new()),
        Arc::new(MemoryRelationalListDao::new(rows)),
    );
    routes(services)
}

fn app() -> Router { app_with_rows(Vec::new()) }

async fn send(
    app: &Router, method: Method, uri: &str, body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    }
    else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, value) = send(app, Method::POST, "/", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    value
}

async fn all(app: &Router) -> Vec<Value> {
    let (status, value) = send(app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    value.as_array().cloned().unwrap()
}

#[tokio::test]
async fn test_create_find_delete_scenario() {
    let app = app();

    let saved = create(&app, json!({"text": "Buy milk"})).await;
    assert_eq!(saved, json!({"message": "List saved"}));

    let (_, found) = send(&app, Method::GET, "/?text=milk", None).await;
    let found = found.as_array().cloned().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["text"], "Buy milk");
    let id = found[0]["_id"].as_str().unwrap().to_string();

    let (status, deleted) =
        send(&app, Method::DELETE, &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"message": "List deleted"}));

    let (_, after) =
        send(&app, Method::GET, &format!("/?_id={id}"), None).await;
    assert_eq!(after, json!([]));
}

#[tokio::test]
async fn test_create_keeps_extra_fields() {
    let app = app();

    create(&app, json!({"text": "trip", "stops": ["a", "b"], "n": 2})).await;

    let lists = all(&app).await;
    assert_eq!(lists[0]["stops"], json!(["a", "b"]));
    assert_eq!(lists[0]["n"], 2);
    assert!(Uuid::parse_str(lists[0]["_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_create_without_text_is_a_message() {
    let app = app();

    for body in [json!({}), json!({"text": ""}), json!({"other": 1})] {
        let value = create(&app, body).await;
        assert_eq!(value, json!({"message": "Please pass text."}));
    }

    let (status, value) = send(&app, Method::POST, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": "Please pass text."}));

    assert!(all(&app).await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_structured_text_and_bad_body() {
    let app = app();

    let (status, value) =
        send(&app, Method::POST, "/", Some(json!({"text": {"a": 1}}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_TEXT");

    let (status, value) =
        send(&app, Method::POST, "/", Some(json!(["text"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_BODY");

    assert!(all(&app).await.is_empty());
}

#[tokio::test]
async fn test_find_filters() {
    let app = app();
    create(&app, json!({"text": "Walk the DOG"})).await;
    create(&app, json!({"text": "feed cat"})).await;
    create(&app, json!({"text": "dog food"})).await;

    let (_, dogs) = send(&app, Method::GET, "/?text=dog", None).await;
    let texts: Vec<&str> = dogs
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Walk the DOG", "dog food"]);

    let (_, everything) = send(&app, Method::GET, "/?text=&_id=", None).await;
    assert_eq!(everything.as_array().unwrap().len(), 3);

    let (_, anchored) = send(&app, Method::GET, "/?text=%5Edog", None).await;
    assert_eq!(anchored.as_array().unwrap().len(), 1);

    let (_, none) = send(
        &app,
        Method::GET,
        &format!("/?_id={}", Uuid::now_v7()),
        None,
    )
    .await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_find_rejects_bad_id_and_pattern() {
    let app = app();

    let (status, value) = send(&app, Method::GET, "/?_id=nope", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_ID");

    let (status, value) = send(&app, Method::GET, "/?text=%28", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_PATTERN");
}

#[tokio::test]
async fn test_update_merges_present_keys() {
    let app = app();
    create(&app, json!({"text": "draft", "priority": 1})).await;
    let id = all(&app).await[0]["_id"].as_str().unwrap().to_string();

    let (status, value) = send(
        &app,
        Method::PUT,
        &format!("/{id}"),
        Some(json!({"text": "final", "done": true, "_id": "ignored"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": "List updated"}));

    let lists = all(&app).await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0]["_id"], id.as_str());
    assert_eq!(lists[0]["text"], "final");
    assert_eq!(lists[0]["priority"], 1);
    assert_eq!(lists[0]["done"], true);
}

#[tokio::test]
async fn test_update_missing_list_is_not_found() {
    let app = app();

    let (status, value) = send(
        &app,
        Method::PUT,
        &format!("/{}", Uuid::now_v7()),
        Some(json!({"text": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error"]["code"], "LIST_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_path_id_is_bad_request() {
    let app = app();

    let (status, value) =
        send(&app, Method::PUT, "/123", Some(json!({"text": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_ID");

    let (status, value) = send(&app, Method::DELETE, "/123", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"]["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_delete_missing_list_still_answers() {
    let app = app();

    let (status, value) = send(
        &app,
        Method::DELETE,
        &format!("/{}", Uuid::now_v7()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"message": "List deleted"}));
}

#[tokio::test]
async fn test_pagination() {
    let app = app();
    for i in 1..=5 {
        create(&app, json!({ "text": format!("item {i}") })).await;
    }

    let page_texts = |value: &Value| -> Vec<String> {
        value[0]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["text"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, first) =
        send(&app, Method::GET, "/pagination/1/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 1);
    assert_eq!(page_texts(&first), vec!["item 1", "item 2"]);

    let (_, last) = send(&app, Method::GET, "/pagination/3/2", None).await;
    assert_eq!(page_texts(&last), vec!["item 5"]);

    for uri in [
        "/pagination/4/2",
        "/pagination/0/2",
        "/pagination/1/0",
        "/pagination/abc/2",
        "/pagination/1/-3",
    ] {
        let (status, value) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(value, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_relational_lists() {
    let now = Utc::now();
    let app = app_with_rows(vec![RelationalList {
        id: 7,
        text: "from sql".to_string(),
        created_at: now,
        updated_at: now,
    }]);

    let (status, value) = send(&app, Method::GET, "/relational", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["data"][0]["id"], 7);
    assert_eq!(value["data"][0]["text"], "from sql");
}

#[tokio::test]
async fn test_relational_lists_empty() {
    let (_, value) = send(&app(), Method::GET, "/relational", None).await;

    assert_eq!(value, json!({"data": []}));
}
