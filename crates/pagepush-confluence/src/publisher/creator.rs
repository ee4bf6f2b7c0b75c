//! Create-or-reuse for pages.

use tracing::{info, warn};

use crate::api::ConfluenceApi;
use crate::error::ConfluenceError;

/// A page that exists after [`ensure_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredPage {
    /// Page ID.
    pub id: String,
    /// True when the title already existed and the page was looked up.
    pub reused: bool,
}

/// Return a page titled `title` under `parent_id`, creating it if needed.
///
/// Confluence rejects a duplicate title within a space with `400 Bad Request`.
/// In that case the first page with that title in the space is reused, even
/// if it hangs under a different parent.
///
/// # Errors
///
/// Any other creation failure, a failed lookup, or a lookup without results.
pub fn ensure_page<A: ConfluenceApi + ?Sized>(
    api: &A,
    parent_id: &str,
    space_key: &str,
    title: &str,
) -> Result<EnsuredPage, ConfluenceError> {
    match api.create_page(parent_id, space_key, title) {
        Ok(page) => Ok(EnsuredPage {
            id: page.id,
            reused: false,
        }),
        Err(err) if err.is_bad_request() => {
            info!("Page '{}' already exists in {}, reusing it", title, space_key);
            let existing = api.find_page_by_title(space_key, title)?.ok_or_else(|| {
                warn!("Creation of '{}' was rejected: {}", title, err.detail());
                ConfluenceError::PageNotFound {
                    title: title.to_owned(),
                    space_key: space_key.to_owned(),
                }
            })?;
            Ok(EnsuredPage {
                id: existing.id,
                reused: true,
            })
        }
        Err(err) => Err(err),
    }
}
