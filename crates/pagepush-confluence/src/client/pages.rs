//! Page operations for Confluence API.

use serde_json::json;
use tracing::{debug, info};

use super::{ConfluenceClient, checked_body};
use crate::error::ConfluenceError;
use crate::types::{Page, PageRef, PageSearchResponse};

impl ConfluenceClient {
    /// Create an empty page under `parent_id`.
    pub(crate) fn post_page(
        &self,
        parent_id: &str,
        space_key: &str,
        title: &str,
    ) -> Result<PageRef, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        let payload = json!({
            "type": "page",
            "ancestors": [{"id": parent_id}],
            "title": title,
            "space": {"key": space_key},
            "body": {
                "storage": {
                    "value": "",
                    "representation": "storage"
                }
            }
        });

        info!("Creating page '{}' under {}", title, parent_id);

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: PageRef = checked_body(response)?.read_json()?;
        debug!("Created page '{}' with id {}", page.title, page.id);
        Ok(page)
    }

    /// Find a page by title in a space.
    pub(crate) fn search_page(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageRef>, ConfluenceError> {
        let url = format!("{}/content", self.api_url());

        info!("Looking up page '{}' in space {}", title, space_key);

        let response = self
            .agent
            .get(&url)
            .query("title", title)
            .query("spaceKey", space_key)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let search: PageSearchResponse = checked_body(response)?.read_json()?;
        Ok(search.results.into_iter().next())
    }

    /// Get page by ID with optional field expansion.
    pub(crate) fn fetch_page(&self, page_id: &str, expand: &[&str]) -> Result<Page, ConfluenceError> {
        let mut url = format!("{}/content/{}", self.api_url(), page_id);

        if !expand.is_empty() {
            url.push_str("?expand=");
            url.push_str(&expand.join(","));
        }

        debug!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        Ok(checked_body(response)?.read_json()?)
    }

    /// Update existing page (auto-increments version).
    pub(crate) fn put_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        let payload = json!({
            "type": "page",
            "title": title,
            "body": {
                "storage": {
                    "value": body,
                    "representation": "storage"
                }
            },
            "version": {"number": version + 1}
        });

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            version,
            version + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: Page = checked_body(response)?.read_json()?;
        info!(
            "Updated page {} to version {}",
            page_id, page.version.number
        );
        Ok(page)
    }
}
