//! Entity normalization ahead of tokenizing.
//!
//! Generated HTML is not XML: it carries named entities such as `&nbsp;` and
//! sometimes bare `&` characters. Both are rewritten so the event reader and
//! the Confluence storage format accept the markup.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// An ampersand, optionally followed by a complete entity reference.
static AMPERSAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:([a-zA-Z][a-zA-Z0-9]*);|#[0-9]+;|#[xX][0-9a-fA-F]+;)?")
        .expect("invalid ampersand regex")
});

/// Replace known named entities with Unicode and escape bare ampersands.
///
/// XML entities (`amp`, `lt`, `gt`, `quot`, `apos`), numeric references and
/// unknown names are kept as written.
pub(crate) fn normalize_entities(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }

    AMPERSAND_PATTERN.replace_all(html, |caps: &Captures| {
        let whole = &caps[0];
        if whole == "&" {
            return "&amp;".to_owned();
        }
        caps.get(1)
            .and_then(|name| entity_to_unicode(name.as_str()))
            .map_or_else(|| whole.to_owned(), str::to_owned)
    })
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "hellip" => "\u{2026}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "deg" => "\u{00b0}",
        "micro" => "\u{00b5}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "sect" => "\u{00a7}",
        "para" => "\u{00b6}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",
        "frac12" => "\u{00bd}",
        "frac14" => "\u{00bc}",
        "frac34" => "\u{00be}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nbsp_becomes_unicode() {
        assert_eq!(normalize_entities("a&nbsp;b"), "a\u{00a0}b");
    }

    #[test]
    fn test_xml_entities_preserved() {
        assert_eq!(normalize_entities("&amp;&lt;&gt;&quot;"), "&amp;&lt;&gt;&quot;");
    }

    #[test]
    fn test_numeric_references_preserved() {
        assert_eq!(normalize_entities("&#169; &#x2014;"), "&#169; &#x2014;");
    }

    #[test]
    fn test_bare_ampersand_escaped() {
        assert_eq!(normalize_entities("Q&A and R & D"), "Q&amp;A and R &amp; D");
    }

    #[test]
    fn test_ampersand_in_query_string_escaped() {
        assert_eq!(
            normalize_entities(r#"<a href="blobs/x.png?a=1&b=2">"#),
            r#"<a href="blobs/x.png?a=1&amp;b=2">"#
        );
    }

    #[test]
    fn test_unknown_entity_preserved() {
        assert_eq!(normalize_entities("&zwnj;"), "&zwnj;");
    }

    #[test]
    fn test_no_ampersand_borrows() {
        assert!(matches!(normalize_entities("plain"), Cow::Borrowed(_)));
    }
}
