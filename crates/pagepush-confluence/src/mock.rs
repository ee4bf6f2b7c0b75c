//! In-memory Confluence for testing.
//!
//! Provides [`MockConfluence`] so the walker and publisher can be exercised
//! without a server. It mirrors the server behaviour the publisher relies on:
//! unique titles per space, `400` for duplicate titles and attachment names,
//! and version checks on update.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;
use crate::types::{Attachment, Page, PageRef, Version};

const BASE_URL: &str = "https://confluence.test";

/// Stored page.
#[derive(Debug, Clone)]
pub(crate) struct MockPage {
    pub id: String,
    pub title: String,
    pub space_key: String,
    pub parent_id: Option<String>,
    pub version: u32,
    pub body: String,
}

/// Stored attachment.
#[derive(Debug, Clone)]
pub(crate) struct MockAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Recorded page update.
#[derive(Debug, Clone)]
pub(crate) struct MockUpdate {
    pub title: String,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    pages: Vec<MockPage>,
    attachments: HashMap<String, Vec<MockAttachment>>,
    updates: Vec<MockUpdate>,
}

/// Mock Confluence server.
#[derive(Debug, Default)]
pub(crate) struct MockConfluence {
    state: RefCell<State>,
    create_failures: HashMap<String, u16>,
    get_failures: HashSet<String>,
    update_failures: HashSet<String>,
    update_title_failures: HashSet<String>,
    upload_failures: HashMap<String, u16>,
}

fn http_error(status: u16, message: &str) -> ConfluenceError {
    ConfluenceError::HttpResponse {
        status,
        body: format!(r#"{{"statusCode":{status},"message":"{message}"}}"#),
    }
}

impl MockConfluence {
    pub(crate) fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_id: 1000,
                ..State::default()
            }),
            ..Self::default()
        }
    }

    /// Seed an existing top-level page.
    pub(crate) fn with_page(self, id: &str, title: &str, space_key: &str) -> Self {
        self.state.borrow_mut().pages.push(MockPage {
            id: id.to_owned(),
            title: title.to_owned(),
            space_key: space_key.to_owned(),
            parent_id: None,
            version: 1,
            body: String::new(),
        });
        self
    }

    /// Answer creation of `title` with `status`.
    pub(crate) fn fail_create(mut self, title: &str, status: u16) -> Self {
        self.create_failures.insert(title.to_owned(), status);
        self
    }

    /// Answer fetches of `page_id` with `404`.
    pub(crate) fn fail_get_page(mut self, page_id: &str) -> Self {
        self.get_failures.insert(page_id.to_owned());
        self
    }

    /// Answer updates of `page_id` with `409`.
    pub(crate) fn fail_update_page(mut self, page_id: &str) -> Self {
        self.update_failures.insert(page_id.to_owned());
        self
    }

    /// Answer updates that set `title` with `409`.
    pub(crate) fn fail_update_title(mut self, title: &str) -> Self {
        self.update_title_failures.insert(title.to_owned());
        self
    }

    /// Answer uploads named `filename` with `status`.
    pub(crate) fn fail_upload(mut self, filename: &str, status: u16) -> Self {
        self.upload_failures.insert(filename.to_owned(), status);
        self
    }

    pub(crate) fn page(&self, id: &str) -> Option<MockPage> {
        self.state.borrow().pages.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn page_by_title(&self, title: &str) -> Option<MockPage> {
        self.state
            .borrow()
            .pages
            .iter()
            .find(|p| p.title == title)
            .cloned()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.state.borrow().pages.len()
    }

    pub(crate) fn attachments(&self, page_id: &str) -> Vec<MockAttachment> {
        self.state
            .borrow()
            .attachments
            .get(page_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn updates(&self) -> Vec<MockUpdate> {
        self.state.borrow().updates.clone()
    }
}

impl ConfluenceApi for MockConfluence {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn create_page(
        &self,
        parent_id: &str,
        space_key: &str,
        title: &str,
    ) -> Result<PageRef, ConfluenceError> {
        if let Some(status) = self.create_failures.get(title) {
            return Err(http_error(*status, "Rejected"));
        }

        let mut state = self.state.borrow_mut();
        if !state.pages.iter().any(|p| p.id == parent_id) {
            return Err(http_error(404, "Parent page not found"));
        }
        if state
            .pages
            .iter()
            .any(|p| p.space_key == space_key && p.title == title)
        {
            return Err(http_error(
                400,
                "A page with this title already exists in this space",
            ));
        }

        state.next_id += 1;
        let id = state.next_id.to_string();
        state.pages.push(MockPage {
            id: id.clone(),
            title: title.to_owned(),
            space_key: space_key.to_owned(),
            parent_id: Some(parent_id.to_owned()),
            version: 1,
            body: String::new(),
        });
        Ok(PageRef {
            id,
            title: title.to_owned(),
        })
    }

    fn find_page_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Option<PageRef>, ConfluenceError> {
        Ok(self
            .state
            .borrow()
            .pages
            .iter()
            .find(|p| p.space_key == space_key && p.title == title)
            .map(|p| PageRef {
                id: p.id.clone(),
                title: p.title.clone(),
            }))
    }

    fn get_page(&self, page_id: &str) -> Result<Page, ConfluenceError> {
        if self.get_failures.contains(page_id) {
            return Err(http_error(404, "No content found"));
        }
        self.page(page_id)
            .map(|p| Page {
                id: p.id,
                title: p.title,
                version: Version { number: p.version },
            })
            .ok_or_else(|| http_error(404, "No content found"))
    }

    fn update_page(
        &self,
        page_id: &str,
        title: &str,
        body: &str,
        version: u32,
    ) -> Result<Page, ConfluenceError> {
        if self.update_failures.contains(page_id) || self.update_title_failures.contains(title) {
            return Err(http_error(409, "Update rejected"));
        }

        let mut state = self.state.borrow_mut();
        let page = state
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| http_error(404, "No content found"))?;
        if page.version != version {
            return Err(http_error(409, "Version must be incremented"));
        }
        page.version += 1;
        page.title = title.to_owned();
        page.body = body.to_owned();
        let updated = Page {
            id: page.id.clone(),
            title: page.title.clone(),
            version: Version {
                number: page.version,
            },
        };
        state.updates.push(MockUpdate {
            title: title.to_owned(),
        });
        Ok(updated)
    }

    fn upload_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        if let Some(status) = self.upload_failures.get(filename) {
            return Err(http_error(*status, "Upload rejected"));
        }

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = format!("att{}", state.next_id);
        let attachments = state.attachments.entry(page_id.to_owned()).or_default();
        if attachments.iter().any(|a| a.filename == filename) {
            return Err(http_error(
                400,
                "Cannot add a new attachment with same file name as an existing attachment",
            ));
        }
        attachments.push(MockAttachment {
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            data: data.to_vec(),
        });
        Ok(Attachment {
            id,
            title: filename.to_owned(),
        })
    }
}
