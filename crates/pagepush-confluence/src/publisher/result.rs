//! Result types for publishing operations.

use std::path::PathBuf;

use crate::types::Page;

/// What happened to one asset link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// Uploaded as a new attachment.
    Uploaded,
    /// The page already had an attachment with this name.
    AlreadyExists,
    /// Upload failed; the link still points at the download URL.
    Failed(String),
    /// No local file; the link was left as written.
    Missing,
}

/// Report for one asset link on a page.
#[derive(Debug, Clone)]
pub struct AssetReport {
    /// Link as found in the document.
    pub href: String,
    /// Attachment name derived from the link.
    pub filename: String,
    /// Local file, when one was found.
    pub path: Option<PathBuf>,
    /// Replacement URL written into the link.
    pub url: Option<String>,
    /// Upload outcome.
    pub outcome: AssetOutcome,
}

/// Result of a successful page publish.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Source HTML file.
    pub path: PathBuf,
    /// Page as returned by the update.
    pub page: Page,
    /// Whether the leading heading was removed.
    pub heading_removed: bool,
    /// One entry per distinct asset link.
    pub assets: Vec<AssetReport>,
}

impl PublishReport {
    /// Assets uploaded as new attachments.
    pub fn uploaded(&self) -> usize {
        self.count(|outcome| matches!(outcome, AssetOutcome::Uploaded))
    }

    /// Assets the page already had.
    pub fn already_present(&self) -> usize {
        self.count(|outcome| matches!(outcome, AssetOutcome::AlreadyExists))
    }

    fn count(&self, pred: impl Fn(&AssetOutcome) -> bool) -> usize {
        self.assets.iter().filter(|a| pred(&a.outcome)).count()
    }
}

/// Item the walk left behind, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// File or link that was skipped.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Totals for a tree walk.
#[derive(Debug, Default)]
pub struct WalkSummary {
    /// Pages created or reused for directories.
    pub directory_pages: usize,
    /// Pages created or reused for HTML files.
    pub file_pages: usize,
    /// Pages that already existed and were reused.
    pub reused_pages: usize,
    /// HTML files published successfully.
    pub published: usize,
    /// Attachments uploaded.
    pub attachments_uploaded: usize,
    /// Attachments the pages already had.
    pub attachments_existing: usize,
    /// Files and assets skipped along the way.
    pub skipped: Vec<SkippedItem>,
}

impl WalkSummary {
    /// Fold one page's report into the totals.
    pub(crate) fn record_publish(&mut self, report: &PublishReport) {
        self.published += 1;
        self.attachments_uploaded += report.uploaded();
        self.attachments_existing += report.already_present();
        for asset in &report.assets {
            let reason = match &asset.outcome {
                AssetOutcome::Missing => "file not found".to_owned(),
                AssetOutcome::Failed(detail) => format!("upload failed: {detail}"),
                AssetOutcome::Uploaded | AssetOutcome::AlreadyExists => continue,
            };
            self.skipped.push(SkippedItem {
                path: asset
                    .path
                    .clone()
                    .unwrap_or_else(|| report.path.with_file_name(&asset.href)),
                reason,
            });
        }
    }

    pub(crate) fn skip(&mut self, path: PathBuf, reason: String) {
        self.skipped.push(SkippedItem { path, reason });
    }
}
