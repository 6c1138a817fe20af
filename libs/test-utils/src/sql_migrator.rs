use deadpool_postgres::Pool;
use tracing::info;

/// A named pair of SQL scripts.
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

/// Migrations in the order they apply.
pub const MIGRATIONS: &[Migration] = &[Migration {
    name: "001_create_list",
    up: include_str!("../../../domains/lists/migrations/sql/001_create_list.sql"),
    down: include_str!(
        "../../../domains/lists/migrations/sql/001_create_list.down.sql"
    ),
}];

/// Applies the plain SQL migrations, recording each in `_migrations`.
pub struct SqlMigrator {
    pool: Pool,
}

impl SqlMigrator {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    /// Run every migration not yet applied, each in its own transaction
    pub async fn run_all_migrations(&self) -> anyhow::Result<()> {
        self.create_migration_table().await?;

        for migration in MIGRATIONS {
            if self.is_migration_applied(migration.name).await? {
                info!("Migration {} already applied, skipping", migration.name);
                continue;
            }

            info!("Running migration: {}", migration.name);
            let mut client = self.pool.get().await?;
            let tx = client.transaction().await?;

            tx.batch_execute(migration.up).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to run migration {}: {}",
                    migration.name,
                    e
                )
            })?;
            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, NOW())",
                &[&migration.name],
            )
            .await?;

            tx.commit().await?;
            info!("Migration {} completed successfully", migration.name);
        }

        Ok(())
    }

    /// Roll back the named migrations, newest first
    pub async fn run_down_migrations(
        &self, names: &[&str],
    ) -> anyhow::Result<()> {
        for migration in MIGRATIONS.iter().rev() {
            if !names.contains(&migration.name) {
                continue;
            }

            info!("Rolling back migration: {}", migration.name);
            let mut client = self.pool.get().await?;
            let tx = client.transaction().await?;

            tx.batch_execute(migration.down).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to rollback migration {}: {}",
                    migration.name,
                    e
                )
            })?;
            tx.execute(
                "DELETE FROM _migrations WHERE name = $1",
                &[&migration.name],
            )
            .await?;

            tx.commit().await?;
        }

        Ok(())
    }

    pub async fn list_applied_migrations(&self) -> anyhow::Result<Vec<String>> {
        self.create_migration_table().await?;

        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY applied_at, id", &[])
            .await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn create_migration_table(&self) -> anyhow::Result<()> {
        let client = self.pool.get().await?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .await?;
        Ok(())
    }

    async fn is_migration_applied(&self, name: &str) -> anyhow::Result<bool> {
        let client = self.pool.get().await?;
        let row = client
            .query_one("SELECT COUNT(*) FROM _migrations WHERE name = $1", &[
                &name,
            ])
            .await?;
        let count: i64 = row.get(0);
        Ok(count > 0)
    }
}
