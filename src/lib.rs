//! Two-phase HTTP request construction with pluggable authorization and
//! completion handling.
//!
//! An [`HttpRequest`] collects method, URL, headers, and parameters,
//! then [`prepare`](HttpRequest::prepare)s itself into a transport-ready
//! request: an attached [`Authorizer`] may sign the parameter set
//! asynchronously before URL, headers, and body are finalized. The
//! external [`Transport`] executes the finalized request, and the
//! caller's chosen [`Completion`] strategy is notified exactly once,
//! whether the transport delivers a response or fails outright.
//!
//! Parameter serialization is deterministic (keys in ascending order,
//! percent-encoded per target), so identical requests produce identical
//! URLs and bodies.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub use auth::{Auth, Authorizer};
pub use completion::{Completion, RawHandler, ResultsDelegate, SuccessFailureDelegate};
pub use error::{Error, Result};
pub use params::{ParamValue, Params, Target};
pub use request::{HttpRequest, Method, PreparedRequest};
pub use response::Response;
#[cfg(feature = "backend-reqwest")]
pub use transport::reqwest::ReqwestTransport;
pub use transport::{CachePolicy, Transport, TransportRequest};

mod auth;
mod completion;
pub mod encoding;
mod error;
mod params;
pub mod query;
mod request;
mod response;
mod transport;
