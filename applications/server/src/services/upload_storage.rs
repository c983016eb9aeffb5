/// Upload storage service - manages album photos on disk
use crate::error::{Result, ServerError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use vinyl_core::normalize::UPLOADS_URL_PREFIX;

/// Give up after this many name collisions
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A photo written to the uploads directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// File name inside the uploads directory
    pub file_name: String,
    /// Public path, e.g. `/uploads/1700000000000_can_tagomago.jpg`
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct UploadStorage {
    base_path: PathBuf,
}

impl UploadStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Create the uploads directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Write a photo under `file_name`.
    ///
    /// An existing file is never overwritten; `_2`, `_3`, ... is inserted
    /// before the extension until a free name is found.
    pub async fn store(&self, file_name: &str, data: &[u8]) -> Result<StoredUpload> {
        validate_file_name(file_name)?;
        fs::create_dir_all(&self.base_path).await?;

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = numbered_name(file_name, attempt);
            let path = self.base_path.join(&candidate);

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, data).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }

            tracing::debug!(path = ?path, bytes = data.len(), "Stored upload");
            return Ok(StoredUpload {
                public_path: format!("{}/{}", UPLOADS_URL_PREFIX, candidate),
                file_name: candidate,
            });
        }

        Err(ServerError::Storage(format!(
            "No free file name for {}",
            file_name
        )))
    }

    /// Remove a stored photo; a missing file is not an error
    pub async fn remove(&self, upload: &StoredUpload) -> Result<()> {
        match fs::remove_file(self.base_path.join(&upload.file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of photos written for a failed batch
    pub async fn remove_all(&self, uploads: &[StoredUpload]) {
        for upload in uploads {
            if let Err(e) = self.remove(upload).await {
                tracing::warn!(file = %upload.file_name, error = %e, "Failed to remove upload");
            }
        }
    }
}

async fn write_all(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await
}

/// Names are generated from sanitized components; anything path-like is refused
fn validate_file_name(file_name: &str) -> Result<()> {
    let is_plain = !file_name.is_empty()
        && !file_name.contains(['/', '\\'])
        && !file_name.starts_with('.');

    if is_plain {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!(
            "Invalid upload file name: {}",
            file_name
        )))
    }
}

fn numbered_name(file_name: &str, attempt: u32) -> String {
    if attempt == 1 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}_{}.{}", stem, attempt, ext),
        None => format!("{}_{}", file_name, attempt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("1_a_b.jpg", 1), "1_a_b.jpg");
        assert_eq!(numbered_name("1_a_b.jpg", 2), "1_a_b_2.jpg");
        assert_eq!(numbered_name("noext", 3), "noext_3");
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(temp_dir.path().to_path_buf());

        let stored = storage.store("1_can_tagomago.jpg", b"jpeg").await.unwrap();

        assert_eq!(stored.public_path, "/uploads/1_can_tagomago.jpg");
        assert!(temp_dir.path().join("1_can_tagomago.jpg").exists());

        storage.remove(&stored).await.unwrap();
        assert!(!temp_dir.path().join("1_can_tagomago.jpg").exists());
        storage.remove(&stored).await.unwrap();
    }
}
