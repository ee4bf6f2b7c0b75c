//! Attachment operations for Confluence API.

use rand::RngExt;
use tracing::info;

use super::{ConfluenceClient, checked_body};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse};

impl ConfluenceClient {
    /// Upload a new attachment.
    ///
    /// Confluence rejects a filename that already exists on the page with
    /// `400 Bad Request`; callers decide whether that matters.
    pub(crate) fn post_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        let url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);

        info!(
            "Uploading attachment '{}' to page {}",
            filename, page_id
        );

        let boundary = format!(
            "----PagepushFormBoundary{:016x}",
            rand::rng().random::<u64>()
        );
        let body = multipart_body(&boundary, filename, data, content_type);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let response: AttachmentsResponse = checked_body(response)?.read_json()?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ConfluenceError::HttpResponse {
                status: 200,
                body: "Empty attachment response".to_owned(),
            })
    }
}

/// Build a single-part `multipart/form-data` body with field name `file`.
fn multipart_body(boundary: &str, filename: &str, data: &[u8], content_type: &str) -> Vec<u8> {
    let filename = filename.replace('"', "%22");
    let mut body = Vec::with_capacity(data.len() + 256);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("XYZ", "img.png", b"\x89PNG", "image/png");
        let expected = b"--XYZ\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"img.png\"\r\n\
Content-Type: image/png\r\n\r\n\
\x89PNG\r\n\
--XYZ--\r\n";
        assert_eq!(body, expected.to_vec());
    }

    #[test]
    fn test_multipart_body_escapes_quotes_in_filename() {
        let body = multipart_body("B", "say \"hi\".txt", b"", "text/plain");
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains(r#"filename="say %22hi%22.txt""#));
    }
}
