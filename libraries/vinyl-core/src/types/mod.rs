mod album;
mod candidate;
mod condition;
mod recognition;
mod submission;

pub use album::{AlbumId, AlbumRecord, NewAlbumRecord};
pub use candidate::{SearchCandidate, SearchQuery};
pub use condition::ConditionGrade;
pub use recognition::RecognitionGuess;
pub use submission::{AlbumSubmission, GenreField};
