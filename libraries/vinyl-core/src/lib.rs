//! Vinyl Vault Core
//!
//! Domain types, condition grading and record normalization shared by the
//! storage, lookup and server crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AlbumRecord`, `SearchCandidate`, `RecognitionGuess`, etc.
//! - **Normalization**: mapping submitted candidates into storable records
//! - **Error Handling**: Unified `VinylError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use vinyl_core::{AlbumSubmission, ConditionGrade, NewAlbumRecord};
//!
//! let submission: AlbumSubmission = serde_json::from_value(serde_json::json!({
//!     "artist": "Pink Floyd",
//!     "album": "Animals",
//!     "year": "1977",
//!     "condition": "Near Mint",
//!     "genre": ["Rock"],
//! }))
//! .unwrap();
//!
//! let record = NewAlbumRecord::from_submission(&submission, String::new());
//! assert_eq!(record.year, 1977);
//! assert_eq!(
//!     ConditionGrade::parse(&record.condition).map(|g| g.marketplace_label()),
//!     Some("Near Mint (NM or M-)")
//! );
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod lenient;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VinylError};
pub use normalize::{
    canonical_condition, parse_year, sanitize_component, upload_file_name, ImagePayload,
};
pub use types::{
    AlbumId, AlbumRecord, AlbumSubmission, ConditionGrade, GenreField, NewAlbumRecord,
    RecognitionGuess, SearchCandidate, SearchQuery,
};
