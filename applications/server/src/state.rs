/// Shared application state
use crate::services::UploadStorage;
use std::sync::Arc;
use vinyl_lookup::{CatalogSearch, PriceSource, RecognitionClient};
use vinyl_storage::Database;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: Arc<UploadStorage>,
    pub catalog: Arc<dyn CatalogSearch>,
    pub prices: Arc<dyn PriceSource>,
    pub recognition: Arc<RecognitionClient>,
}

impl AppState {
    pub fn new(
        db: Database,
        uploads: Arc<UploadStorage>,
        catalog: Arc<dyn CatalogSearch>,
        prices: Arc<dyn PriceSource>,
        recognition: Arc<RecognitionClient>,
    ) -> Self {
        Self {
            db,
            uploads,
            catalog,
            prices,
            recognition,
        }
    }
}
