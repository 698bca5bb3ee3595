//! Response handling

use crate::{Error, Result};
use bytes::Bytes;
use http::header::CONTENT_LENGTH;
use http::{HeaderMap, StatusCode};

/// HTTP response returned by a transport.
///
/// A plain value: status, headers, and a fully-received body.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create a response from its parts
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get the response status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response status indicates a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if the response status indicates a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get all headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value as text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Get the content length from headers
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    /// Borrow the body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response and return the body as bytes
    pub fn bytes(self) -> Bytes {
        self.body
    }

    /// Consume the response and return the body as text
    pub fn text(self) -> Result<String> {
        String::from_utf8(self.body.into()).map_err(Error::from)
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Split the response into status, headers, and body
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static [u8]) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::from_static(body),
        )
    }

    #[test]
    fn test_status_classes() {
        assert!(response(200, b"").is_success());
        assert!(response(404, b"").is_client_error());
        assert!(response(500, b"").is_server_error());
    }

    #[test]
    fn test_text() {
        assert_eq!(response(200, b"hello").text().unwrap(), "hello");
    }

    #[test]
    fn test_text_invalid_utf8() {
        assert!(response(200, &[0xff, 0xfe]).text().is_err());
    }

    #[test]
    fn test_json() {
        let parsed: serde_json::Value = response(200, br#"{"ok":true}"#).json().unwrap();
        assert_eq!(parsed["ok"], true);
    }

    #[test]
    fn test_content_length() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, "42".parse().unwrap());
        let response = Response::new(StatusCode::OK, headers, Bytes::new());
        assert_eq!(response.content_length(), Some(42));
    }
}
