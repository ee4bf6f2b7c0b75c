//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page with version metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Version information.
    pub version: Version,
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Page identity without expanded metadata.
///
/// Returned by page creation and title search, which do not expand `version`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageRef {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
}

/// Content search response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSearchResponse {
    /// Matching pages, in server order.
    pub results: Vec<PageRef>,
}
