//! Confluence REST API client.
//!
//! Provides sync HTTP client for Confluence Server/Data Center REST API
//! with personal access token (bearer) authentication.

mod attachments;
mod pages;

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body};

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;
use crate::types::{Attachment, Page, PageRef};

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
///
/// Built once per run; the base URL and authorization header never change
/// afterwards.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client with bearer token authentication.
    ///
    /// # Arguments
    /// * `base_url` - Confluence server base URL
    /// * `token` - Personal access token
    /// * `timeout` - Global timeout applied to every request
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: format!("Bearer {token}"),
        }
    }

    /// Create client from config values with the default timeout.
    pub fn from_config(base_url: &str, token: &str) -> Self {
        Self::new(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }
}

/// Turn an error status into [`ConfluenceError::HttpResponse`].
fn checked_body(response: Response<Body>) -> Result<Body, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body)
}

impl ConfluenceApi for ConfluenceClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_page(
        &self,
        parent_id: &str,
        space_key: &str,
        title: &str,
    ) -> Result<PageRef, ConfluenceError> {
        self.post_page(parent_id, space_key, title)
    }

    fn find_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageRef>, ConfluenceError> {
        self.search_page(space_key, title)
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        self.fetch_page(page_id, &["version"])
    }

    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        self.put_page(page_id, title, body, version)
    }

    fn upload_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        self.post_attachment(page_id, filename, data, content_type)
    }
}
