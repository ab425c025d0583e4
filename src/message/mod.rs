//! HTTP message model: [`Request`] and [`Response`] value objects plus their
//! CRLF wire codec.
//!
//! Wire form (textual HTTP/1.1-style):
//!
//! ```text
//! <start line>\r\n
//! <Name: value>\r\n ...
//! \r\n
//! <optional body bytes>
//! ```
//!
//! Messages are created once per dispatch and stay mutable for its lifetime;
//! middleware may amend headers and body on the way in and out. Bodies are
//! either absent or non-empty; the empty in-between state is rejected at the
//! setter.

mod request;
mod response;

pub use request::Request;
pub use response::Response;

use crate::error::{Error, Result};
use crate::headers::Headers;

/// Protocol version spoken by freshly constructed messages.
pub const HTTP_VERSION: &str = "1.1";

/// Split raw wire bytes at the first blank line into the UTF-8 head and the
/// raw body bytes.
pub(crate) fn split_head_and_body(bytes: &[u8]) -> Result<(&str, &[u8])> {
    let pos = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| Error::MalformedMessage {
            reason: "missing blank-line separator".to_string(),
        })?;
    let head = std::str::from_utf8(&bytes[..pos]).map_err(|_| Error::MalformedMessage {
        reason: "start line and headers are not valid UTF-8".to_string(),
    })?;
    Ok((head, &bytes[pos + 4..]))
}

/// Parse the interior header lines of a message head.
///
/// Each line splits on the first colon with both sides trimmed. A name seen a
/// second time is promoted to multi-value, keeping every occurrence in wire
/// order.
pub(crate) fn parse_header_block(lines: &[&str]) -> Result<Headers> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(lines.len());
    for line in lines {
        let (name, value) = line.split_once(':').ok_or_else(|| Error::MalformedMessage {
            reason: format!("header line without a colon: {line:?}"),
        })?;
        pairs.push((name.trim().to_string(), value.trim().to_string()));
    }

    let mut headers = Headers::new();
    for (name, value) in &pairs {
        let repeated = pairs.iter().filter(|(n, _)| n == name).count() > 1;
        if repeated {
            headers.add_multi(name, value)?;
        } else {
            headers.set_single(name, value)?;
        }
    }
    Ok(headers)
}

/// Strip the `HTTP/` prefix off a start-line version token.
pub(crate) fn parse_version_token(token: &str) -> Result<&str> {
    token
        .strip_prefix("HTTP/")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MalformedMessage {
            reason: format!("expected an HTTP/<version> token, got {token:?}"),
        })
}

/// Validate a body assignment: bodies are absent or non-empty, never empty.
pub(crate) fn validate_body(body: Vec<u8>) -> Result<Vec<u8>> {
    if body.is_empty() {
        return Err(Error::BodyEmpty);
    }
    Ok(body)
}
