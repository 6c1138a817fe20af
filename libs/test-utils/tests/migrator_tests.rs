use anyhow::Result;
use test_utils::{TestPostgresContainer, seed_relational_list};

#[tokio::test]
#[ignore = "requires docker"]
async fn test_migrator_up_is_idempotent() -> Result<()> {
    let postgres = TestPostgresContainer::new().await?;
    let migrator = postgres.get_migrator();

    let applied = migrator.list_applied_migrations().await?;
    assert_eq!(applied, vec!["001_create_list".to_string()]);

    migrator.run_all_migrations().await?;

    let applied = migrator.list_applied_migrations().await?;
    assert_eq!(applied.len(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_migrator_down_drops_list_table() -> Result<()> {
    let postgres = TestPostgresContainer::new().await?;
    let migrator = postgres.get_migrator();

    seed_relational_list(&postgres, "before rollback").await?;
    migrator.run_down_migrations(&["001_create_list"]).await?;

    assert!(migrator.list_applied_migrations().await?.is_empty());
    assert!(postgres.execute_sql("SELECT 1 FROM list").await.is_err());

    migrator.run_all_migrations().await?;
    assert!(postgres.execute_sql("SELECT 1 FROM list").await.is_ok());

    Ok(())
}
