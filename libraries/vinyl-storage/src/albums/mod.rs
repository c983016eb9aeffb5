use crate::error::Result;
use sqlx::SqlitePool;
use vinyl_core::types::{AlbumId, AlbumRecord, NewAlbumRecord};

const SELECT_COLUMNS: &str = "SELECT id, name, artist, year, condition, image, genre,
        external_id, external_uri, external_image_url,
        price_estimate, price_low, price_high
 FROM albums";

/// All albums in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AlbumRecord>> {
    let albums = sqlx::query_as::<_, AlbumRecord>(&format!("{SELECT_COLUMNS} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(albums)
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<AlbumRecord>> {
    let album = sqlx::query_as::<_, AlbumRecord>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(album)
}

/// Insert a batch of albums in one transaction.
///
/// Either every record is stored or none is. Returns the stored records in
/// the order given.
pub async fn insert_batch(pool: &SqlitePool, albums: &[NewAlbumRecord]) -> Result<Vec<AlbumRecord>> {
    let mut tx = pool.begin().await?;
    let mut inserted = Vec::with_capacity(albums.len());

    for album in albums {
        let result = sqlx::query(
            "INSERT INTO albums (
                name, artist, year, condition, image, genre,
                external_id, external_uri, external_image_url,
                price_estimate, price_low, price_high
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&album.name)
        .bind(&album.artist)
        .bind(album.year)
        .bind(&album.condition)
        .bind(&album.image)
        .bind(&album.genre)
        .bind(&album.external_id)
        .bind(&album.external_uri)
        .bind(&album.external_image_url)
        .bind(&album.price_estimate)
        .bind(&album.price_low)
        .bind(&album.price_high)
        .execute(&mut *tx)
        .await?;

        inserted.push(album.clone().into_record(result.last_insert_rowid()));
    }

    tx.commit().await?;

    tracing::debug!(count = inserted.len(), "Inserted album batch");

    Ok(inserted)
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM albums")
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}
