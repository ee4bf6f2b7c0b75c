//! Error types for Confluence publishing.

use std::string::FromUtf8Error;

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Title lookup after a creation conflict returned no page.
    #[error("no page titled '{title}' found in space {space_key}")]
    PageNotFound {
        /// Page title that was searched for.
        title: String,
        /// Space the search was scoped to.
        space_key: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfluenceError {
    /// HTTP status of an error response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the request with `400 Bad Request`.
    ///
    /// Confluence answers page title collisions and duplicate attachment
    /// names this way.
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    /// Human-readable detail for logs.
    ///
    /// For error responses this is the JSON `message` field when the body
    /// carries one, otherwise the raw body text.
    pub fn detail(&self) -> String {
        match self {
            Self::HttpResponse { status, body } => {
                let message = serde_json::from_str::<serde_json::Value>(body)
                    .ok()
                    .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned));
                format!("{status}: {}", message.as_deref().unwrap_or(body))
            }
            other => other.to_string(),
        }
    }
}

/// Error while rewriting an HTML document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Markup could not be tokenized.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Malformed element attribute.
    #[error("HTML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Writing the rewritten markup failed.
    #[error("serialization error: {0}")]
    Write(#[from] std::io::Error),

    /// Rewritten markup is not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
}
