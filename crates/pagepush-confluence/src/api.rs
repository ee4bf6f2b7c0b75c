//! The Confluence operations the publisher depends on.

use crate::error::ConfluenceError;
use crate::types::{Attachment, Page, PageRef};

/// Remote page and attachment operations.
///
/// [`ConfluenceClient`](crate::ConfluenceClient) implements this over HTTP.
/// The walker and publisher only see this trait, so they run against an
/// in-memory double in tests.
pub trait ConfluenceApi {
    /// Server base URL without trailing slash.
    fn base_url(&self) -> &str;

    /// Create an empty page titled `title` under `parent_id` in `space_key`.
    fn create_page(
        &self,
        parent_id: &str,
        space_key: &str,
        title: &str,
    ) -> Result<PageRef, ConfluenceError>;

    /// Look up a page by exact title within a space. Returns the first hit.
    fn find_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageRef>, ConfluenceError>;

    /// Fetch a page with its version metadata.
    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError>;

    /// Replace title and body, bumping `version` by one.
    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError>;

    /// Upload `data` as a new attachment named `filename`.
    fn upload_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError>;

    /// Public download URL of an attachment.
    fn download_url(&self, page_id: &str, filename: &str) -> String {
        format!(
            "{}/download/attachments/{page_id}/{filename}",
            self.base_url()
        )
    }
}
