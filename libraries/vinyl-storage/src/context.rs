use crate::{albums, create_pool, error::Result, run_migrations, StorageError};
use sqlx::SqlitePool;
use vinyl_core::types::{AlbumId, AlbumRecord, NewAlbumRecord};

/// Album catalog backed by `SQLite`
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_albums(&self) -> Result<Vec<AlbumRecord>> {
        albums::get_all(&self.pool).await
    }

    pub async fn get_album(&self, id: AlbumId) -> Result<AlbumRecord> {
        albums::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| StorageError::not_found("Album", id.to_string()))
    }

    pub async fn insert_albums(&self, albums: &[NewAlbumRecord]) -> Result<Vec<AlbumRecord>> {
        albums::insert_batch(&self.pool, albums).await
    }

    pub async fn count_albums(&self) -> Result<i64> {
        albums::count(&self.pool).await
    }
}
