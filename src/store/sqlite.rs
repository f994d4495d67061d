use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DB_MAX_CONNECTIONS;
use crate::error::Result;
use crate::store::models::DocumentRow;
use crate::store::DocumentStore;
use crate::types::Document;

/// Documents stored as JSON bodies in a single SQLite table keyed by
/// `(collection, id)`.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens an existing database file and applies the embedded migrations.
    pub async fn connect(db_path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(DB_MAX_CONNECTIONS)
            .connect(&format!("sqlite:{db_path}"))
            .await?;
        Self::from_pool(pool).await
    }

    /// Opens an existing database file read-only. Migrations are not applied,
    /// so a file without a `documents` table fails on the first read.
    pub async fn open_read_only(db_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(DB_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Ok(Self::from_pool_unmigrated(pool))
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn from_pool_unmigrated(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ?
            ORDER BY id
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|row| row.into_document(collection)).collect()
    }

    async fn save(&self, collection: &str, doc: &Document) -> Result<()> {
        let body = serde_json::to_string(&doc.fields)?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES (?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET
                body = excluded.body
            "#,
        )
        .bind(collection)
        .bind(&doc.id)
        .bind(body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
