use std::fmt;

use super::{parse_header_block, parse_version_token, split_head_and_body, validate_body};
use crate::error::{Error, Result};
use crate::headers::Headers;

/// A response produced by a route function (or fabricated by middleware) and
/// unwound back through the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status_code: u16,
    status_text: String,
    version: String,
    headers: Headers,
    body: Option<Vec<u8>>,
}

impl Response {
    /// Create a response speaking [`HTTP_VERSION`](super::HTTP_VERSION), with
    /// no headers and no body.
    #[must_use]
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            version: super::HTTP_VERSION.to_string(),
            headers: Headers::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, code: u16) -> &mut Self {
        self.status_code = code;
        self
    }

    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn set_status_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.status_text = text.into();
        self
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Set (or replace) the body. Empty bodies are rejected with `BodyEmpty`.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) -> Result<&mut Self> {
        self.body = Some(validate_body(body.into())?);
        Ok(self)
    }

    /// Drop the body. Fails with `BodyAbsent` if none was set.
    pub fn clear_body(&mut self) -> Result<&mut Self> {
        if self.body.take().is_none() {
            return Err(Error::BodyAbsent);
        }
        Ok(self)
    }

    /// Render the response in wire form:
    /// `HTTP/version CODE TEXT\r\n` + headers + `\r\n` + body.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut text = format!(
            "HTTP/{} {} {}\r\n",
            self.version, self.status_code, self.status_text
        );
        text.push_str(&self.headers.serialize());
        text.push_str("\r\n");
        let mut out = text.into_bytes();
        if let Some(body) = &self.body {
            out.extend_from_slice(body);
        }
        out
    }

    /// Parse a response from wire bytes.
    ///
    /// The status line tokenizes into `HTTP/<version>`, a numeric code, and
    /// the status text, which keeps any interior spaces.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let (head, body) = split_head_and_body(bytes)?;
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or("");

        let mut tokens = status_line.splitn(3, ' ');
        let (version_token, code, text) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(v), Some(c), Some(t)) => (v, c, t),
            _ => {
                return Err(Error::MalformedMessage {
                    reason: format!("status line must have three tokens: {status_line:?}"),
                })
            }
        };
        let version = parse_version_token(version_token)?;
        let status_code = code.parse::<u16>().map_err(|_| Error::MalformedMessage {
            reason: format!("invalid status code token: {code:?}"),
        })?;

        let header_lines: Vec<&str> = lines.collect();
        let mut response = Response::new(status_code, text);
        response.version = version.to_string();
        response.headers = parse_header_block(&header_lines)?;
        if !body.is_empty() {
            response.set_body(body.to_vec())?;
        }
        Ok(response)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.serialize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_keeps_interior_spaces() {
        let wire = b"HTTP/1.1 404 NOT FOUND\r\n\r\n";
        let resp = Response::deserialize(wire).unwrap();
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.status_text(), "NOT FOUND");
        assert_eq!(resp.serialize(), wire);
    }

    #[test]
    fn serializes_with_headers_and_body() {
        let mut resp = Response::new(200, "OK");
        resp.headers_mut()
            .set_single("Content-Type", "text/plain")
            .unwrap();
        resp.set_body("hi").unwrap();
        assert_eq!(
            resp.serialize(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhi"
        );
    }

    #[test]
    fn rejects_bad_status_lines() {
        assert!(Response::deserialize(b"HTTP/1.1 200\r\n\r\n").is_err());
        assert!(Response::deserialize(b"HTTP/1.1 abc OK\r\n\r\n").is_err());
        assert!(Response::deserialize(b"1.1 200 OK\r\n\r\n").is_err());
    }
}
