//! # Learntrack - Personal Learning-Resource Tracker
//!
//! Track learning materials (articles, videos, courses, books), tag them,
//! extract key concepts, and browse a derived graph of concept co-occurrence.
//!
//! Learntrack provides:
//! - A resource store backed by a single JSON file
//! - Case-insensitive search with kind/tag/status filters
//! - A concept co-occurrence graph rebuilt on demand from the collection
//! - Collection statistics (counts by kind/status, most-used tags)

pub mod config;
pub mod graph;
pub mod resource;
pub mod store;
pub mod ui;

// Re-exports for convenient access
pub use graph::{ConceptGraph, ConceptPair};
pub use resource::{Resource, ResourceDraft, ResourceId, ResourceKind, ResourcePatch, Status};
pub use store::{ResourceStore, SearchFilter};

/// Result type alias for Learntrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Learntrack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(ResourceId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data file error: {0}")]
    Json(#[from] serde_json::Error),
}
