//! Upload of assets referenced from a page.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::{info, warn};

use super::result::{AssetOutcome, AssetReport};
use crate::api::ConfluenceApi;
use crate::html::ASSET_PREFIX;

/// Attachment name for an asset link.
///
/// Strips the `blobs/` prefix, percent-decodes the rest and drops anything
/// from the first `&` on, so `blobs/a%20b.png&v=2` names `a b.png`.
pub fn attachment_name(href: &str) -> String {
    let escaped = href.replace('&', "&amp;");
    let tail = escaped.strip_prefix(ASSET_PREFIX).unwrap_or(&escaped);
    let tail = tail.strip_prefix(['/', '\\']).unwrap_or(tail);
    let decoded = percent_decode_str(tail).decode_utf8_lossy();
    decoded.split('&').next().unwrap_or_default().to_owned()
}

/// Whether `path` stays below the directory it is joined to.
///
/// Absolute paths, drive prefixes and `..` segments are refused.
fn is_relative_below(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Local file an asset link points at, relative to the document's directory.
///
/// The decoded name inside the asset directory is tried first, then the link
/// exactly as written. Candidates that would leave the directory are skipped.
fn resolve_local(html_dir: &Path, href: &str, filename: &str) -> Option<PathBuf> {
    let literal = href.replace('&', "&amp;");
    [
        Path::new(ASSET_PREFIX).join(filename),
        PathBuf::from(literal),
    ]
    .into_iter()
    .filter(|rel| is_relative_below(rel))
    .map(|rel| html_dir.join(rel))
    .find(|p| p.is_file())
}

/// Content type sent with an attachment.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "json" => "application/json",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
}

/// Upload the file behind `href` as an attachment of `page_id`.
///
/// Never fails: a missing file leaves the link alone, a duplicate name counts
/// as done, and other upload errors are logged. The download URL is returned
/// whenever a local file was found.
pub fn upload_asset<A: ConfluenceApi + ?Sized>(
    api: &A,
    html_dir: &Path,
    page_id: &str,
    href: &str,
) -> AssetReport {
    let filename = attachment_name(href);

    if !is_relative_below(Path::new(&filename)) {
        warn!("Asset link {} points outside {}", href, html_dir.display());
        return AssetReport {
            href: href.to_owned(),
            filename,
            path: None,
            url: None,
            outcome: AssetOutcome::Missing,
        };
    }

    let Some(path) = resolve_local(html_dir, href, &filename) else {
        warn!("File not found: {}", html_dir.join(href).display());
        return AssetReport {
            href: href.to_owned(),
            filename,
            path: None,
            url: None,
            outcome: AssetOutcome::Missing,
        };
    };

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            warn!("Cannot read {}: {}", path.display(), err);
            return AssetReport {
                href: href.to_owned(),
                filename,
                path: Some(path),
                url: None,
                outcome: AssetOutcome::Failed(err.to_string()),
            };
        }
    };

    info!("Uploading {} as {}", href, filename);
    let outcome = match api.upload_attachment(page_id, &filename, &data, content_type_for(&path)) {
        Ok(_) => AssetOutcome::Uploaded,
        Err(err) if err.is_bad_request() => {
            info!("Attachment '{}' already on page {}", filename, page_id);
            AssetOutcome::AlreadyExists
        }
        Err(err) => {
            let detail = err.detail();
            warn!("Upload of '{}' to page {} failed: {}", filename, page_id, detail);
            AssetOutcome::Failed(detail)
        }
    };

    AssetReport {
        href: href.to_owned(),
        url: Some(api.download_url(page_id, &filename)),
        filename,
        path: Some(path),
        outcome,
    }
}
