//! Error types for publishing operations.

use std::path::PathBuf;

use crate::error::{ConfluenceError, TransformError};

/// Failure to publish a single HTML file.
///
/// The walker logs these and moves on to the next file.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Current page version could not be fetched.
    #[error("failed to fetch page {page_id}: {}", .source.detail())]
    FetchPage {
        /// Target page.
        page_id: String,
        /// Underlying API error.
        source: ConfluenceError,
    },

    /// HTML file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// HTML file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// HTML could not be rewritten.
    #[error("failed to rewrite {}: {source}", .path.display())]
    Transform {
        /// HTML file.
        path: PathBuf,
        /// Underlying tokenizer error.
        source: TransformError,
    },

    /// Page update was rejected.
    #[error("failed to update page {page_id}: {}", .source.detail())]
    UpdatePage {
        /// Target page.
        page_id: String,
        /// Underlying API error.
        source: ConfluenceError,
    },
}

/// Failure that stops a tree walk.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// Page could not be created or looked up.
    #[error("failed to create page '{title}': {}", .source.detail())]
    CreatePage {
        /// Title of the page being created.
        title: String,
        /// Underlying API error.
        source: ConfluenceError,
    },

    /// Directory listing failed.
    #[error("failed to list {}: {source}", .path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
