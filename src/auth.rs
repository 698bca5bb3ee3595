//! Authorization hooks for HTTP requests

use crate::Result;
use crate::params::Params;
use crate::request::Method;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::future::BoxFuture;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use std::fmt;
use url::Url;

/// A hook that signs a request before it is finalized.
///
/// The builder calls [`sign_parameters`](Authorizer::sign_parameters)
/// first (the single asynchronous step in request preparation), then
/// [`apply_header`](Authorizer::apply_header) on the pending header map,
/// and only then assembles the transport request. Implement this trait
/// for signed-request protocols (OAuth-style signatures, HMAC schemes)
/// that need to rewrite the parameter set; for plain header-carrying
/// schemes use [`Auth`].
pub trait Authorizer: Send + Sync {
    /// Sign and rewrite the parameter set for the pending request.
    ///
    /// The returned future must resolve exactly once.
    fn sign_parameters<'a>(
        &'a self,
        url: &'a Url,
        params: Params,
        method: &'a Method,
    ) -> BoxFuture<'a, Result<Params>>;

    /// Apply authorization headers to the pending request.
    fn apply_header(&self, url: &Url, headers: &mut HeaderMap) -> Result<()>;
}

/// Ready-made authorization schemes.
///
/// Each variant generates the appropriate `Authorization` header value;
/// the parameter set passes through unsigned.
///
/// # Examples
///
/// ```rust,no_run
/// use courier::{Auth, Completion, HttpRequest, Method};
/// use std::sync::Arc;
///
/// // Bearer token
/// let _request = HttpRequest::new(
///     Method::GET,
///     "https://api.example.com/protected",
///     Completion::raw(|data| {
///         let _ = data;
///     }),
/// )
/// .auth(Arc::new(Auth::bearer("your-jwt-token")));
///
/// // Basic authentication
/// let _request = HttpRequest::new(
///     Method::GET,
///     "https://api.example.com/private",
///     Completion::raw(|data| {
///         let _ = data;
///     }),
/// )
/// .auth(Arc::new(Auth::basic("user", "pass")));
/// ```
#[derive(Debug, Clone)]
pub enum Auth {
    /// HTTP Basic authentication with username and password.
    ///
    /// This creates an `Authorization: Basic <base64(username:password)>` header.
    Basic {
        /// Username for basic authentication
        username: String,
        /// Password for basic authentication
        password: String,
    },
    /// Bearer token authentication (OAuth, JWT, etc.).
    ///
    /// This creates an `Authorization: Bearer <token>` header.
    Bearer {
        /// Bearer token
        token: String,
    },
    /// Custom authorization header with a custom scheme.
    ///
    /// This creates an `Authorization: <scheme> <credentials>` header.
    Custom {
        /// Authentication scheme (e.g., "ApiKey", "Digest")
        scheme: String,
        /// Credentials for the scheme
        credentials: String,
    },
}

impl Auth {
    /// Create HTTP Basic authentication.
    ///
    /// The credentials are base64-encoded when the header value is
    /// generated.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create Bearer token authentication.
    ///
    /// Commonly used for OAuth 2.0, JWT tokens, and API keys.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Create custom authentication with a custom scheme.
    ///
    /// The Authorization header is formatted as `<scheme> <credentials>`.
    pub fn custom(scheme: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self::Custom {
            scheme: scheme.into(),
            credentials: credentials.into(),
        }
    }

    /// Convert authentication to an Authorization header value.
    ///
    /// ```rust
    /// use courier::Auth;
    ///
    /// assert_eq!(Auth::basic("user", "pass").to_header_value(), "Basic dXNlcjpwYXNz");
    /// assert_eq!(Auth::bearer("token123").to_header_value(), "Bearer token123");
    /// assert_eq!(Auth::custom("ApiKey", "secret").to_header_value(), "ApiKey secret");
    /// ```
    pub fn to_header_value(&self) -> String {
        match self {
            Auth::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password);
                let encoded = BASE64.encode(credentials.as_bytes());
                format!("Basic {}", encoded)
            }
            Auth::Bearer { token } => {
                format!("Bearer {}", token)
            }
            Auth::Custom {
                scheme,
                credentials,
            } => {
                format!("{} {}", scheme, credentials)
            }
        }
    }
}

impl Authorizer for Auth {
    fn sign_parameters<'a>(
        &'a self,
        _url: &'a Url,
        params: Params,
        _method: &'a Method,
    ) -> BoxFuture<'a, Result<Params>> {
        Box::pin(std::future::ready(Ok(params)))
    }

    fn apply_header(&self, _url: &Url, headers: &mut HeaderMap) -> Result<()> {
        let value = HeaderValue::from_str(&self.to_header_value())?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Basic { username, .. } => {
                write!(f, "Basic authentication for user: {}", username)
            }
            Auth::Bearer { .. } => write!(f, "Bearer token authentication"),
            Auth::Custom { scheme, .. } => write!(f, "Custom {} authentication", scheme),
        }
    }
}
