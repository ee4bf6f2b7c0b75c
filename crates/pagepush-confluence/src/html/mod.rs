//! HTML rewriting for publication.
//!
//! [`transform_html`] is a pure function: it takes the document text and a
//! callback that maps asset links to their remote URLs, and returns the body
//! to store. It performs no I/O, so the uploader is plugged in from outside.
//!
//! The document is streamed through `quick-xml` with end-name checks disabled.
//! Markup outside the touched elements is written back byte for byte.

mod entities;

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::Writer;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;

use crate::error::TransformError;

use entities::normalize_entities;

/// Link prefix the document generator uses for embedded assets.
pub const ASSET_PREFIX: &str = "blobs";

/// Document type declarations, matched lazily so each one is removed on its own.
static DOCTYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!DOCTYPE.*?>").expect("invalid doctype regex"));

/// Output of [`transform_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedHtml {
    /// Body in storage format.
    pub html: String,
    /// Whether an `<h1>` was dropped.
    pub heading_removed: bool,
    /// Number of `href` attributes replaced.
    pub links_rewritten: usize,
}

/// Remove every `<!DOCTYPE ...>` declaration.
pub fn strip_doctype(html: &str) -> Cow<'_, str> {
    DOCTYPE_PATTERN.replace_all(html, "")
}

/// Rewrite a document for publication.
///
/// 1. Strips document type declarations.
/// 2. Drops the first `<h1>` element with its content.
/// 3. Calls `resolve_asset` with the decoded `href` of every `<a>` whose link
///    starts with [`ASSET_PREFIX`]; `Some(url)` replaces the `href`, `None`
///    leaves the element untouched.
///
/// # Errors
///
/// Returns [`TransformError`] if the markup cannot be tokenized.
pub fn transform_html<F>(
    html: &str,
    mut resolve_asset: F,
) -> Result<TransformedHtml, TransformError>
where
    F: FnMut(&str) -> Option<String>,
{
    let without_doctype = strip_doctype(html);
    let source = normalize_entities(&without_doctype);

    let mut reader = Reader::from_str(&source);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut writer = Writer::new(Vec::with_capacity(source.len()));
    let mut heading_removed = false;
    // Open <h1> elements while skipping the removed heading.
    let mut skip_depth = 0usize;
    let mut links_rewritten = 0usize;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::DocType(_) => {}
            Event::Start(e) if skip_depth > 0 => {
                if is_tag(&e, b"h1") {
                    skip_depth += 1;
                }
            }
            Event::End(e) if skip_depth > 0 => {
                if e.name().as_ref().eq_ignore_ascii_case(b"h1") {
                    skip_depth -= 1;
                }
            }
            _ if skip_depth > 0 => {}
            Event::Start(e) if !heading_removed && is_tag(&e, b"h1") => {
                heading_removed = true;
                skip_depth = 1;
            }
            Event::Empty(e) if !heading_removed && is_tag(&e, b"h1") => {
                heading_removed = true;
            }
            Event::Start(e) if is_tag(&e, b"a") => {
                let e = rewrite_anchor(e, &mut resolve_asset, &mut links_rewritten)?;
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) if is_tag(&e, b"a") => {
                let e = rewrite_anchor(e, &mut resolve_asset, &mut links_rewritten)?;
                writer.write_event(Event::Empty(e))?;
            }
            event => writer.write_event(event)?,
        }
    }

    Ok(TransformedHtml {
        html: String::from_utf8(writer.into_inner())?,
        heading_removed,
        links_rewritten,
    })
}

fn is_tag(e: &BytesStart<'_>, tag: &[u8]) -> bool {
    e.name().as_ref().eq_ignore_ascii_case(tag)
}

/// Decoded `href` of an element, if present.
fn href_of(e: &BytesStart<'_>) -> Result<Option<String>, TransformError> {
    for attr in e.html_attributes() {
        let attr = attr?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"href") {
            return Ok(Some(decoded_value(&attr.value)));
        }
    }
    Ok(None)
}

/// Attribute value with references resolved, or as written if they do not parse.
fn decoded_value(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    unescape(&raw).map_or_else(|_| raw.to_string(), Cow::into_owned)
}

/// Replace the `href` of an asset link with the URL `resolve` returns.
fn rewrite_anchor<'a, F>(
    e: BytesStart<'a>,
    resolve: &mut F,
    rewritten: &mut usize,
) -> Result<BytesStart<'a>, TransformError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(href) = href_of(&e)? else {
        return Ok(e);
    };
    if !href.starts_with(ASSET_PREFIX) {
        return Ok(e);
    }
    let Some(url) = resolve(&href) else {
        return Ok(e);
    };

    let mut anchor = BytesStart::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.html_attributes() {
        let attr = attr?;
        if attr.key.as_ref().eq_ignore_ascii_case(b"href") {
            anchor.push_attribute(("href", url.as_str()));
        } else {
            // Decoded here, escaped again by push_attribute.
            let key = String::from_utf8_lossy(attr.key.as_ref());
            let value = decoded_value(&attr.value);
            anchor.push_attribute((key.as_ref(), value.as_str()));
        }
    }
    *rewritten += 1;
    Ok(anchor)
}
