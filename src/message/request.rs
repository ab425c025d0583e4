use std::fmt;

use http::Method;

use super::{parse_header_block, parse_version_token, split_head_and_body, validate_body};
use crate::error::{Error, Result};
use crate::headers::Headers;

/// An incoming request being threaded through the dispatch engine.
///
/// Branch dispatch rewrites `path` as it strips matched prefixes, so a route
/// function deep inside nested branches observes only the path remainder
/// addressed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: Headers,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request speaking [`HTTP_VERSION`](super::HTTP_VERSION), with
    /// no headers and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: super::HTTP_VERSION.to_string(),
            headers: Headers::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
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

    /// Render the request in wire form:
    /// `METHOD PATH HTTP/version\r\n` + headers + `\r\n` + body.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut text = format!("{} {} HTTP/{}\r\n", self.method, self.path, self.version);
        text.push_str(&self.headers.serialize());
        text.push_str("\r\n");
        let mut out = text.into_bytes();
        if let Some(body) = &self.body {
            out.extend_from_slice(body);
        }
        out
    }

    /// Parse a request from wire bytes.
    ///
    /// The request line must tokenize on single spaces into exactly
    /// method, path, and `HTTP/<version>`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let (head, body) = split_head_and_body(bytes)?;
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or("");

        let tokens: Vec<&str> = request_line.split(' ').collect();
        let &[method, path, version_token] = tokens.as_slice() else {
            return Err(Error::MalformedMessage {
                reason: format!("request line must have exactly three tokens: {request_line:?}"),
            });
        };
        let method = Method::from_bytes(method.as_bytes()).map_err(|_| Error::MalformedMessage {
            reason: format!("invalid method token: {method:?}"),
        })?;
        let version = parse_version_token(version_token)?;

        let header_lines: Vec<&str> = lines.collect();
        let mut request = Request::new(method, path);
        request.version = version.to_string();
        request.headers = parse_header_block(&header_lines)?;
        if !body.is_empty() {
            request.set_body(body.to_vec())?;
        }
        Ok(request)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.serialize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_request_line_headers_and_body() {
        let mut req = Request::new(Method::POST, "/users/42");
        req.headers_mut()
            .set_single("Host", "example.test")
            .unwrap();
        req.set_body("payload").unwrap();

        assert_eq!(
            req.serialize(),
            b"POST /users/42 HTTP/1.1\r\nHost: example.test\r\n\r\npayload"
        );
    }

    #[test]
    fn deserializes_and_round_trips() {
        let wire = b"GET /a/b HTTP/1.1\r\nHost: h\r\nAccept: x\r\nAccept: y\r\n\r\n";
        let req = Request::deserialize(wire).unwrap();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/a/b");
        assert_eq!(req.version(), "1.1");
        assert_eq!(req.body(), None);
        assert_eq!(req.serialize(), wire);
    }

    #[test]
    fn rejects_bad_request_lines() {
        assert!(Request::deserialize(b"GET /a\r\n\r\n").is_err());
        assert!(Request::deserialize(b"GET /a HTTP/1.1 extra\r\n\r\n").is_err());
        assert!(Request::deserialize(b"GET  /a HTTP/1.1\r\n\r\n").is_err());
    }

    #[test]
    fn body_validation() {
        let mut req = Request::new(Method::GET, "/");
        assert!(matches!(req.set_body(Vec::new()), Err(Error::BodyEmpty)));
        assert!(matches!(req.clear_body(), Err(Error::BodyAbsent)));
        req.set_body("x").unwrap();
        req.clear_body().unwrap();
        assert_eq!(req.body(), None);
    }
}
