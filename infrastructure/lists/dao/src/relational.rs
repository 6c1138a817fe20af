use async_trait::async_trait;
use database_traits::RelationalDao;
use list_errors::ListError;
use list_models::RelationalList;
use sql_connection::SqlConnect;
use tracing::instrument;

#[derive(Clone)]
pub struct RelationalListDao {
    db: SqlConnect,
}

impl RelationalListDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> RelationalList {
        RelationalList {
            id: row.get(0),
            text: row.get(1),
            created_at: row.get(2),
            updated_at: row.get(3),
        }
    }
}

#[async_trait]
impl RelationalDao for RelationalListDao {
    type Error = ListError;
    type Row = RelationalList;

    #[instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<RelationalList>, ListError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, text, created_at, updated_at FROM list ORDER BY id",
            )
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }
}
