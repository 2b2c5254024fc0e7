//! Kaggle discussion search and resolution
//!
//! Pure pieces of the discussion tools: vocabulary translation, request
//! construction, time-window filtering, resolution planning and text rendering.
//! Remote calls live in the `kaggletools` crate.

pub mod page;
pub mod query;
pub mod render;
pub mod resolve;
pub mod types;
pub mod vocab;
pub mod window;

pub use query::{build, clamp_page_size, ListScope, RemoteRequest, SearchQuery};
pub use resolve::{Resolution, ResolutionRequest};
pub use types::{CommentRecord, DiscussionRecord, RemoteDocument};
pub use vocab::{DocumentType, SortBy, SourceType, WriteUpType};
pub use window::{ReferenceField, TimeWindowFilter};

/// Errors raised by the discussion tools
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscussionError {
    #[error("Unknown {vocabulary} value '{value}'. Valid values: {}", valid.join(", "))]
    UnknownVocabularyValue {
        vocabulary: &'static str,
        value: String,
        valid: Vec<&'static str>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote call failed: {0}")]
    RemoteCallFailed(String),
}
