//! Transport abstraction for request execution

#[cfg(feature = "backend-reqwest")]
pub mod reqwest;

use crate::request::Method;
use crate::response::Response;
use crate::Result;
use bytes::Bytes;
use futures_util::future::BoxFuture;
use http::HeaderMap;
use std::time::Duration;
use url::Url;

/// Caching behavior requested from the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve from the transport's cache when available, hit the network otherwise
    CacheElseLoad,
    /// Always hit the network
    Reload,
}

/// A finalized, transport-ready request.
///
/// Produced by [`HttpRequest::prepare`](crate::HttpRequest::prepare);
/// plain data with no behavior of its own. The timeout, cookie flag, and
/// cache policy are requests to the transport; a backend honors what
/// its networking stack supports.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Fully-resolved request URL, query included
    pub url: Url,
    /// Headers to apply, in map iteration order
    pub headers: HeaderMap,
    /// Body bytes; `None` for GET requests
    pub body: Option<Bytes>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Whether the transport should handle cookies
    pub use_cookies: bool,
    /// Requested caching behavior
    pub cache_policy: CachePolicy,
}

/// The external network-execution layer.
///
/// Implementations send a [`TransportRequest`] and resolve exactly once
/// with a [`Response`] or an error. This crate performs no network I/O
/// of its own; cancellation and connection management belong to the
/// transport.
pub trait Transport: Send + Sync {
    /// Execute the request, resolving exactly once
    fn execute(&self, request: TransportRequest) -> BoxFuture<'_, Result<Response>>;
}
