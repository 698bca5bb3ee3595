//! Completion strategies and outcome dispatch

use crate::Error;
use bytes::Bytes;
use http::StatusCode;
use std::fmt;
use tracing::{debug, warn};

/// Callback invoked with the response body on success, `None` on failure
pub type RawHandler = Box<dyn FnOnce(Option<Bytes>) + Send>;

/// Delegate notified with fetched results.
///
/// Only successful responses are delivered; failures are dropped without
/// a call. Use [`SuccessFailureDelegate`] when failure notification is
/// needed.
pub trait ResultsDelegate: Send {
    /// Called with the response body after a successful request
    fn on_results(&self, data: Option<Bytes>);
}

/// Delegate notified of the request outcome without a payload
pub trait SuccessFailureDelegate: Send {
    /// Called when the request completes with status 200
    fn on_success(&self);
    /// Called on any other status or on a transport error
    fn on_failure(&self);
}

/// The caller-selected mechanism for receiving exactly one completion
/// notification per request.
///
/// Exactly one variant is active per request, fixed at construction.
/// [`dispatch`](Completion::dispatch) consumes the strategy, so a request
/// can never notify twice.
pub enum Completion {
    /// Raw body callback: `Some(body)` on success, `None` on failure
    RawData(RawHandler),
    /// Results delegate: notified on success only
    Results(Box<dyn ResultsDelegate>),
    /// Success/failure delegate: exactly one of the two methods fires
    SuccessFailure(Box<dyn SuccessFailureDelegate>),
}

impl Completion {
    /// Select the raw-data callback strategy
    pub fn raw(handler: impl FnOnce(Option<Bytes>) + Send + 'static) -> Self {
        Completion::RawData(Box::new(handler))
    }

    /// Select the results-delegate strategy
    pub fn results(delegate: impl ResultsDelegate + 'static) -> Self {
        Completion::Results(Box::new(delegate))
    }

    /// Select the success/failure-delegate strategy
    pub fn success_failure(delegate: impl SuccessFailureDelegate + 'static) -> Self {
        Completion::SuccessFailure(Box::new(delegate))
    }

    /// Route a transport outcome to the active strategy.
    ///
    /// A present `error` or an absent `status` is a failure. Status 200
    /// is a success carrying `body`; every other status is a failure and
    /// the body is discarded. Status codes are logged for diagnostics
    /// only and never reach the strategy.
    pub fn dispatch(self, status: Option<StatusCode>, body: Option<Bytes>, error: Option<&Error>) {
        let success = match (error, status) {
            (Some(error), _) => {
                warn!(%error, "transport failure");
                false
            }
            (None, None) => {
                warn!("no response status");
                false
            }
            (None, Some(status)) => {
                if status == StatusCode::OK {
                    debug!("200 success");
                    true
                } else {
                    log_failure_status(status);
                    false
                }
            }
        };

        match self {
            Completion::RawData(handler) => handler(if success { body } else { None }),
            Completion::Results(delegate) => {
                if success {
                    delegate.on_results(body);
                } else {
                    // results delegates are not notified of failures
                    warn!("failure dropped for results-only strategy");
                }
            }
            Completion::SuccessFailure(delegate) => {
                if success {
                    delegate.on_success();
                } else {
                    delegate.on_failure();
                }
            }
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Completion::RawData(_) => "Completion::RawData",
            Completion::Results(_) => "Completion::Results",
            Completion::SuccessFailure(_) => "Completion::SuccessFailure",
        })
    }
}

fn log_failure_status(status: StatusCode) {
    match status.as_u16() {
        401 => warn!("401 unauthorized"),
        403 => warn!("403 resource forbidden"),
        404 => warn!("404 resource not found"),
        408 => warn!("408 network timeout"),
        415 => warn!("415 unsupported media type"),
        500 => warn!("500 server error"),
        code => warn!(code, "request failed"),
    }
}
