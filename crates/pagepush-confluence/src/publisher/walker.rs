//! Depth-first mirroring of a directory tree into pages.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::creator::{EnsuredPage, ensure_page};
use super::error::WalkError;
use super::executor::PagePublisher;
use super::result::WalkSummary;
use crate::api::ConfluenceApi;
use crate::html::ASSET_PREFIX;

/// Extension of files published as pages.
const HTML_EXTENSION: &str = ".html";

/// Mirrors directories as pages and publishes the HTML files inside them.
pub struct TreeWalker<'a, A: ConfluenceApi + ?Sized> {
    api: &'a A,
    space_key: &'a str,
    publisher: PagePublisher<'a, A>,
}

impl<'a, A: ConfluenceApi + ?Sized> TreeWalker<'a, A> {
    /// Create a walker that creates pages in `space_key`.
    #[must_use]
    pub fn new(api: &'a A, space_key: &'a str) -> Self {
        Self {
            api,
            space_key,
            publisher: PagePublisher::new(api),
        }
    }

    /// Mirror `dir` under the page `parent_id`.
    ///
    /// `dir` itself becomes a page. Subdirectories recurse, except the asset
    /// directory; `.html` files become child pages and are published. Other
    /// files are only reached through asset links.
    ///
    /// # Errors
    ///
    /// Stops on the first page that can be neither created nor reused, and on
    /// unreadable directories. Publish failures are recorded in
    /// [`WalkSummary::skipped`] and the walk continues.
    pub fn walk(&self, dir: &Path, parent_id: &str) -> Result<WalkSummary, WalkError> {
        let mut summary = WalkSummary::default();
        self.walk_dir(dir, parent_id, &mut summary)?;
        Ok(summary)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        parent_id: &str,
        summary: &mut WalkSummary,
    ) -> Result<(), WalkError> {
        info!("Uploading {}...", dir.display());

        let dir_page = self.ensure(parent_id, &dir_title(dir))?;
        summary.directory_pages += 1;
        summary.reused_pages += usize::from(dir_page.reused);

        for entry in sorted_entries(dir)? {
            let Some(name) = entry.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };

            if entry.is_dir() {
                if name != ASSET_PREFIX {
                    self.walk_dir(&entry, &dir_page.id, summary)?;
                }
            } else if let Some(title) = name.strip_suffix(HTML_EXTENSION) {
                let page = self.ensure(&dir_page.id, title)?;
                summary.file_pages += 1;
                summary.reused_pages += usize::from(page.reused);

                match self.publisher.publish(&entry, &page.id) {
                    Ok(report) => summary.record_publish(&report),
                    Err(err) => {
                        warn!("{}", err);
                        summary.skip(entry, err.to_string());
                    }
                }
            }
        }

        Ok(())
    }

    fn ensure(&self, parent_id: &str, title: &str) -> Result<EnsuredPage, WalkError> {
        ensure_page(self.api, parent_id, self.space_key, title).map_err(|source| {
            WalkError::CreatePage {
                title: title.to_owned(),
                source,
            }
        })
    }
}

/// Page title for a directory: its final path component.
fn dir_title(dir: &Path) -> String {
    let named = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty());
    named
        .or_else(|| {
            dir.canonicalize()
                .ok()?
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| dir.display().to_string())
}

/// Directory entries sorted by name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let read_dir_err = |source| WalkError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = std::fs::read_dir(dir)
        .map_err(read_dir_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    entries.sort();
    Ok(entries)
}
