//! Publishing of HTML trees into Confluence.
//!
//! - [`ensure_page`]: create a page, or reuse the one holding its title
//! - [`upload_asset`]: upload one linked file as a page attachment
//! - [`PagePublisher`]: rewrite one HTML file and store it as the next version
//! - [`TreeWalker`]: mirror a directory depth-first, publishing as it goes
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use pagepush_confluence::ConfluenceClient;
//! use pagepush_confluence::publisher::TreeWalker;
//!
//! let client = ConfluenceClient::from_config("https://confluence.example.com", "token");
//! let walker = TreeWalker::new(&client, "DOCS");
//!
//! let summary = walker.walk(Path::new("site/docs"), "123456")?;
//! println!("published {} pages", summary.published);
//! # Ok(())
//! # }
//! ```

mod creator;
mod error;
mod executor;
mod result;
mod uploader;
mod walker;

pub use creator::{EnsuredPage, ensure_page};
pub use error::{PublishError, WalkError};
pub use executor::PagePublisher;
pub use result::{AssetOutcome, AssetReport, PublishReport, SkippedItem, WalkSummary};
pub use uploader::{attachment_name, upload_asset};
pub use walker::TreeWalker;
