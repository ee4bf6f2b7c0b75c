//! Confluence attachment types.

use serde::Deserialize;

/// Confluence attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
}

/// Attachments API response.
///
/// New uploads come back wrapped in a result list.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
}
