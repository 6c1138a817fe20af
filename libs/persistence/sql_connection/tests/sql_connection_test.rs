use sql_connection::{PostgresDbConfig, SqlConnect, connect_postgres_db};
use test_utils::TestPostgresContainer;

#[tokio::test]
async fn test_rejects_malformed_uri() {
    let config = PostgresDbConfig {
        uri: "not a postgres uri".to_string(),
        ..Default::default()
    };

    assert!(connect_postgres_db(&config).await.is_err());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_connect_and_query() {
    let container = TestPostgresContainer::new().await.unwrap();
    let config = PostgresDbConfig {
        uri: container.connection_string.clone(),
        max_conn: Some(4),
        min_conn: Some(1),
        logger: false,
    };

    let pool = connect_postgres_db(&config).await.unwrap();
    let db = SqlConnect::new(pool);

    let client = db.get_client().await.unwrap();
    let value: i32 = client.query_one("SELECT 42", &[]).await.unwrap().get(0);
    assert_eq!(value, 42);

    let (_available, size) = db.get_pool_status();
    assert!(size >= 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_migrations_create_list_table() {
    let container = TestPostgresContainer::new().await.unwrap();
    let client = container.pool.get().await.unwrap();

    let count: i64 = client
        .query_one("SELECT COUNT(*) FROM list", &[])
        .await
        .unwrap()
        .get(0);
    assert_eq!(count, 0);
}
