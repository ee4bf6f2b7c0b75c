//! Confluence API types.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.

mod attachment;
mod page;

pub use attachment::{Attachment, AttachmentsResponse};
pub use page::{Page, PageRef, PageSearchResponse, Version};
