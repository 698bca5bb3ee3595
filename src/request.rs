//! Request types and two-phase preparation

use crate::Result;
use crate::auth::Authorizer;
use crate::completion::Completion;
use crate::params::{ParamValue, Params, Target};
use crate::transport::{CachePolicy, Transport, TransportRequest};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Fixed timeout handed to the transport with every prepared request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET method
    GET,
    /// POST method
    POST,
    /// PUT method
    PUT,
    /// DELETE method
    DELETE,
    /// PATCH method
    PATCH,
    /// HEAD method
    HEAD,
    /// Custom method
    Custom(String),
}

impl Method {
    /// The method's wire name
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::HEAD => "HEAD",
            Method::Custom(method) => method,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request under construction.
///
/// Collects method, URL, headers, and parameters, together with exactly
/// one [`Completion`] strategy fixed at construction. Headers default to
/// `Content-Type: application/x-www-form-urlencoded` and
/// `Accept: application/json`; both can be overridden any time before
/// [`prepare`](HttpRequest::prepare). Header keys are case-insensitive
/// and last write wins.
///
/// # Examples
///
/// ```rust,no_run
/// use courier::{Completion, HttpRequest, Method, ReqwestTransport};
///
/// # #[tokio::main]
/// # async fn main() -> courier::Result<()> {
/// let transport = ReqwestTransport::new()?;
///
/// HttpRequest::new(
///     Method::GET,
///     "https://api.example.com/search",
///     Completion::raw(|data| println!("{:?}", data)),
/// )
/// .param("q", "a b")
/// .param("page", 2_u32)
/// .send(&transport)
/// .await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpRequest {
    method: Method,
    base_url: String,
    headers: HeaderMap,
    params: Params,
    authorizer: Option<Arc<dyn Authorizer>>,
    completion: Completion,
}

impl HttpRequest {
    /// Create a request with the given method, base URL, and completion
    /// strategy
    pub fn new(method: Method, url: impl Into<String>, completion: Completion) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            method,
            base_url: url.into(),
            headers,
            params: Params::new(),
            authorizer: None,
            completion,
        }
    }

    /// Add or overwrite a header
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Add or overwrite a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Merge a parameter set into the request
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params.iter().map(|(k, v)| (k, v.clone())));
        self
    }

    /// Attach an authorization hook.
    ///
    /// The hook signs the parameter set and applies its header during
    /// [`prepare`](HttpRequest::prepare); the caller keeps its own
    /// handle and manages the hook's lifetime.
    pub fn auth(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// The request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The base URL the request was created with
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// The pending header map
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The current parameter set
    pub fn parameters(&self) -> &Params {
        &self.params
    }

    /// Finalize the request into a transport-ready form.
    ///
    /// If an authorization hook is attached, its signing step is awaited
    /// first (the only suspension point), then its header is applied to
    /// the pending header map. A GET request has the serialized query
    /// appended to its URL and never carries a body; any other method
    /// keeps its URL untouched and gets the form-encoded parameter set
    /// as UTF-8 body bytes. The prepared request carries a fixed
    /// 120-second timeout, cookie handling disabled, and a
    /// cache-else-load policy.
    ///
    /// If finalization fails, the completion strategy is settled on the
    /// failure branch before the error is returned, so every request
    /// notifies exactly once.
    pub async fn prepare(self) -> Result<PreparedRequest> {
        let HttpRequest {
            method,
            base_url,
            headers,
            params,
            authorizer,
            completion,
        } = self;

        match finalize(method, base_url, headers, params, authorizer).await {
            Ok(request) => Ok(PreparedRequest {
                request,
                completion,
            }),
            Err(error) => {
                warn!(%error, "request could not be finalized");
                completion.dispatch(None, None, Some(&error));
                Err(error)
            }
        }
    }

    /// Prepare the request, execute it on `transport`, and dispatch the
    /// completion strategy exactly once.
    ///
    /// The returned error mirrors a finalization failure for the caller;
    /// the strategy has already been notified when it is produced.
    pub async fn send<T: Transport + ?Sized>(self, transport: &T) -> Result<()> {
        self.prepare().await?.send(transport).await;
        Ok(())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

async fn finalize(
    method: Method,
    base_url: String,
    mut headers: HeaderMap,
    params: Params,
    authorizer: Option<Arc<dyn Authorizer>>,
) -> Result<TransportRequest> {
    let params = match &authorizer {
        Some(authorizer) => {
            let base = Url::parse(&base_url)?;
            let signed = authorizer
                .sign_parameters(&base, params, &method)
                .await?;
            authorizer.apply_header(&base, &mut headers)?;
            signed
        }
        None => params,
    };

    let url = if method == Method::GET {
        Url::parse(&format!("{}{}", base_url, params.serialize(Target::Query)))?
    } else {
        Url::parse(&base_url)?
    };

    let body = if method == Method::GET {
        None
    } else {
        Some(Bytes::from(params.serialize(Target::Body)))
    };

    Ok(TransportRequest {
        method,
        url,
        headers,
        body,
        timeout: REQUEST_TIMEOUT,
        use_cookies: false,
        cache_policy: CachePolicy::CacheElseLoad,
    })
}

/// A finalized request coupled with its completion strategy.
///
/// Produced by [`HttpRequest::prepare`]. Either hand it to a transport
/// with [`send`](PreparedRequest::send), or take it apart with
/// [`into_parts`](PreparedRequest::into_parts) to drive a foreign
/// transport; in that case the caller owes the [`Completion`] exactly
/// one dispatch.
#[derive(Debug)]
pub struct PreparedRequest {
    request: TransportRequest,
    completion: Completion,
}

impl PreparedRequest {
    /// Borrow the transport-ready request
    pub fn transport_request(&self) -> &TransportRequest {
        &self.request
    }

    /// Split into the transport request and the completion strategy
    pub fn into_parts(self) -> (TransportRequest, Completion) {
        (self.request, self.completion)
    }

    /// Execute on `transport` and dispatch the completion strategy.
    ///
    /// The strategy fires exactly once: with the response status and
    /// body when the transport delivers, or on the failure branch when
    /// it errors.
    pub async fn send<T: Transport + ?Sized>(self, transport: &T) {
        let PreparedRequest {
            request,
            completion,
        } = self;

        match transport.execute(request).await {
            Ok(response) => {
                let (status, _headers, body) = response.into_parts();
                completion.dispatch(Some(status), Some(body), None);
            }
            Err(error) => completion.dispatch(None, None, Some(&error)),
        }
    }
}
