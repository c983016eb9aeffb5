/// Server services
pub mod album_intake;
pub mod upload_storage;

pub use album_intake::submit_albums;
pub use upload_storage::{StoredUpload, UploadStorage};
