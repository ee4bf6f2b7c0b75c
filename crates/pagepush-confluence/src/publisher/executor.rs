//! Page publisher implementation.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use super::error::PublishError;
use super::result::PublishReport;
use super::uploader::upload_asset;
use crate::api::ConfluenceApi;
use crate::html::transform_html;

/// Publishes HTML files onto existing pages.
pub struct PagePublisher<'a, A: ConfluenceApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ConfluenceApi + ?Sized> PagePublisher<'a, A> {
    /// Create a new page publisher.
    #[must_use]
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Replace the body of `page_id` with the rewritten contents of `path`.
    ///
    /// This method:
    /// 1. Fetches the current page version
    /// 2. Reads the file and rewrites it (doctype, heading, asset links)
    /// 3. Uploads each distinct asset link once, from the file's directory
    /// 4. Stores the body as the next version, titled after the file stem
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the page cannot be fetched or updated, or
    /// the file cannot be read or tokenized. Asset problems are reported in
    /// [`PublishReport::assets`] instead.
    pub fn publish(&self, path: &Path, page_id: &str) -> Result<PublishReport, PublishError> {
        info!("Uploading {} to {}", path.display(), page_id);

        let current = self
            .api
            .get_page(page_id)
            .map_err(|source| PublishError::FetchPage {
                page_id: page_id.to_owned(),
                source,
            })?;

        let html = std::fs::read_to_string(path).map_err(|source| PublishError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let html_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut resolved: HashMap<String, Option<String>> = HashMap::new();
        let mut assets = Vec::new();

        let transformed = transform_html(&html, |href| {
            if let Some(url) = resolved.get(href) {
                return url.clone();
            }
            let report = upload_asset(self.api, html_dir, page_id, href);
            let url = report.url.clone();
            resolved.insert(href.to_owned(), url.clone());
            assets.push(report);
            url
        })
        .map_err(|source| PublishError::Transform {
            path: path.to_path_buf(),
            source,
        })?;

        let title = page_title(path);
        let page = self
            .api
            .update_page(page_id, &title, &transformed.html, current.version.number)
            .map_err(|source| PublishError::UpdatePage {
                page_id: page_id.to_owned(),
                source,
            })?;

        Ok(PublishReport {
            path: path.to_path_buf(),
            page,
            heading_removed: transformed.heading_removed,
            assets,
        })
    }
}

/// Page title for an HTML file: its name without extension.
pub(crate) fn page_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
