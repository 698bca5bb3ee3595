//! Reqwest transport for cross-platform request execution

use crate::transport::{CachePolicy, Transport, TransportRequest};
use crate::{Error, Response, Result};
use futures_util::future::BoxFuture;
use tracing::debug;

/// Default transport backed by a [`reqwest::Client`].
///
/// Cookie handling stays off unless a cookie store is configured on the
/// client, which matches the `use_cookies = false` default of prepared
/// requests. Reqwest has no HTTP response cache, so the cache policy is
/// advisory only.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new transport with a default client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|error| Error::Internal(format!("failed to create reqwest client: {}", error)))?;

        Ok(Self { client })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: TransportRequest) -> BoxFuture<'_, Result<Response>> {
        Box::pin(async move {
            if request.cache_policy == CachePolicy::CacheElseLoad {
                debug!("cache-else-load is advisory; reqwest has no response cache");
            }

            let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
                .map_err(|_| Error::Internal(format!("unsupported method: {}", request.method)))?;

            let mut builder = self
                .client
                .request(method, request.url)
                .timeout(request.timeout);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(Response::new(status, headers, body))
        })
    }
}
