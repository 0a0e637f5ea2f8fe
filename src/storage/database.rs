use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use super::{PasteStore, StoreResult};
use crate::models::Paste;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS paste (\"ref\" TEXT PRIMARY KEY NOT NULL, \
                            body TEXT NOT NULL, expire BIGINT NOT NULL)";

#[derive(Clone)]
pub struct DatabaseStore {
    pool: AnyPool,
}

impl DatabaseStore {
    /// Connect to a database by URL, creating the paste table if needed.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

impl PasteStore for DatabaseStore {
    async fn put(&self, paste: &Paste) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO paste (\"ref\", body, expire) VALUES (?, ?, ?) ON CONFLICT (\"ref\") DO \
             UPDATE SET body = excluded.body, expire = excluded.expire",
        )
        .bind(paste.reference.as_str())
        .bind(paste.body.as_str())
        .bind(paste.expire)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, reference: &str) -> StoreResult<Option<Paste>> {
        let paste = sqlx::query_as::<_, Paste>(
            "SELECT \"ref\", body, expire FROM paste WHERE \"ref\" = ?",
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;
        Ok(paste)
    }
}
