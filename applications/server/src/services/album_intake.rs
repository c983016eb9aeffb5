/// Album intake - turns submitted candidates into stored records
use crate::{
    error::Result,
    services::upload_storage::{StoredUpload, UploadStorage},
};
use vinyl_core::{AlbumRecord, AlbumSubmission, ImagePayload, NewAlbumRecord};
use vinyl_storage::Database;

struct PreparedAlbum<'a> {
    submission: &'a AlbumSubmission,
    image: Option<ImagePayload>,
}

/// Store a batch of submissions as one unit.
///
/// Every item is validated before anything is written. Photos are written
/// next, then all rows are inserted in one transaction. When the insert
/// fails the photos written for this batch are removed again.
pub async fn submit_albums(
    db: &Database,
    uploads: &UploadStorage,
    submissions: &[AlbumSubmission],
    timestamp_ms: i64,
) -> Result<Vec<AlbumRecord>> {
    let prepared = submissions
        .iter()
        .map(|submission| {
            Ok(PreparedAlbum {
                submission,
                image: submission.image_payload()?,
            })
        })
        .collect::<vinyl_core::Result<Vec<_>>>()?;

    let mut written: Vec<StoredUpload> = Vec::new();
    let mut records = Vec::with_capacity(prepared.len());

    for item in &prepared {
        let image = match &item.image {
            Some(payload) => {
                let file_name = item.submission.upload_file_name(timestamp_ms);
                match uploads.store(&file_name, payload.bytes()).await {
                    Ok(stored) => {
                        let public_path = stored.public_path.clone();
                        written.push(stored);
                        public_path
                    }
                    Err(e) => {
                        uploads.remove_all(&written).await;
                        return Err(e);
                    }
                }
            }
            None => String::new(),
        };
        records.push(NewAlbumRecord::from_submission(item.submission, image));
    }

    match db.insert_albums(&records).await {
        Ok(stored) => {
            tracing::info!(
                count = stored.len(),
                images = written.len(),
                "Stored album batch"
            );
            Ok(stored)
        }
        Err(e) => {
            uploads.remove_all(&written).await;
            Err(e.into())
        }
    }
}
