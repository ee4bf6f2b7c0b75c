//! Confluence publishing for pagepush.
//!
//! This crate mirrors a local tree of HTML documents into Confluence:
//! - [`ConfluenceClient`]: REST API client with bearer token authentication
//! - [`ConfluenceApi`]: the remote operations the publisher needs
//! - [`html::transform_html`]: pure rewrite of a document body
//! - [`publisher`]: page creation, attachment upload, publishing and the tree walk
//!
//! # API Client
//!
//! ```ignore
//! use pagepush_confluence::{ConfluenceApi, ConfluenceClient};
//!
//! let client = ConfluenceClient::from_config("https://confluence.example.com", "token");
//! let page = client.get_page("123")?;
//! println!("{} is at version {}", page.title, page.version.number);
//! ```

mod api;
pub use api::ConfluenceApi;

// API client
mod client;
pub use client::{ConfluenceClient, DEFAULT_TIMEOUT};

// Document rewriting
pub mod html;

// Publishing workflow
pub mod publisher;

// Types
mod types;
pub use types::{Attachment, Page, PageRef, Version};

// Errors
pub mod error;
pub use error::{ConfluenceError, TransformError};

#[cfg(test)]
mod mock;
