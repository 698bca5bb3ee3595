//! Integration tests for the prepare/execute/dispatch lifecycle

use bytes::Bytes;
use courier::{
    Completion, Error, HttpRequest, Method, Response, Result, ResultsDelegate,
    SuccessFailureDelegate, Transport, TransportRequest,
};
use futures_util::future::BoxFuture;
use http::{HeaderMap, StatusCode};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Transport test double: hands out one scripted reply and records what
/// it was asked to execute.
struct MockTransport {
    reply: Mutex<Option<Result<Response>>>,
    executed: AtomicUsize,
    last_request: Mutex<Option<TransportRequest>>,
}

impl MockTransport {
    fn replying(status: u16, body: &'static [u8]) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(Response::new(
                StatusCode::from_u16(status).unwrap(),
                HeaderMap::new(),
                Bytes::from_static(body),
            )))),
            executed: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn failing(error: Error) -> Self {
        Self {
            reply: Mutex::new(Some(Err(error))),
            executed: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: TransportRequest) -> BoxFuture<'_, Result<Response>> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        let reply = self.reply.lock().unwrap().take();

        Box::pin(async move {
            match reply {
                Some(reply) => reply,
                None => Err(Error::Internal("no scripted reply".to_string())),
            }
        })
    }
}

#[derive(Default)]
struct CountingDelegate {
    success: AtomicUsize,
    failure: AtomicUsize,
}

impl SuccessFailureDelegate for Arc<CountingDelegate> {
    fn on_success(&self) {
        self.success.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self) {
        self.failure.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingResults {
    calls: AtomicUsize,
}

impl ResultsDelegate for Arc<RecordingResults> {
    fn on_results(&self, _data: Option<Bytes>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn success_delivers_body_to_raw_handler() {
    let transport = MockTransport::replying(200, b"hello");
    let delivered = Arc::new(Mutex::new(None));
    let captured = delivered.clone();

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/greeting",
        Completion::raw(move |data| {
            *captured.lock().unwrap() = data;
        }),
    )
    .send(&transport)
    .await
    .unwrap();

    assert_eq!(transport.executed.load(Ordering::SeqCst), 1);
    assert_eq!(
        delivered.lock().unwrap().as_deref(),
        Some(b"hello".as_slice())
    );
}

#[tokio::test]
async fn get_request_reaches_transport_with_query() {
    let transport = MockTransport::replying(200, b"");

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/search",
        Completion::raw(|_| {}),
    )
    .param("q", "a b")
    .param("page", "2")
    .send(&transport)
    .await
    .unwrap();

    let guard = transport.last_request.lock().unwrap();
    let request = guard.as_ref().unwrap();
    assert_eq!(
        request.url.as_str(),
        "https://api.example.com/search?page=2&q=a%20b"
    );
    assert!(request.body.is_none());
}

#[tokio::test]
async fn post_request_reaches_transport_with_body() {
    let transport = MockTransport::replying(200, b"");

    HttpRequest::new(
        Method::POST,
        "https://api.example.com/items",
        Completion::raw(|_| {}),
    )
    .param("b", "2")
    .param("a", "1")
    .send(&transport)
    .await
    .unwrap();

    let guard = transport.last_request.lock().unwrap();
    let request = guard.as_ref().unwrap();
    assert_eq!(request.url.as_str(), "https://api.example.com/items");
    assert_eq!(request.body.as_deref(), Some(b"a=1&b=2".as_slice()));
}

#[tokio::test]
async fn http_failure_notifies_failure_exactly_once() {
    for code in [401, 403, 404, 408, 415, 500, 999] {
        let transport = MockTransport::replying(code, b"ignored");
        let delegate = Arc::new(CountingDelegate::default());

        HttpRequest::new(
            Method::GET,
            "https://api.example.com/thing",
            Completion::success_failure(delegate.clone()),
        )
        .send(&transport)
        .await
        .unwrap();

        assert_eq!(delegate.success.load(Ordering::SeqCst), 0, "status {}", code);
        assert_eq!(delegate.failure.load(Ordering::SeqCst), 1, "status {}", code);
    }
}

#[tokio::test]
async fn status_200_notifies_success_exactly_once() {
    let transport = MockTransport::replying(200, b"");
    let delegate = Arc::new(CountingDelegate::default());

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/thing",
        Completion::success_failure(delegate.clone()),
    )
    .send(&transport)
    .await
    .unwrap();

    assert_eq!(delegate.success.load(Ordering::SeqCst), 1);
    assert_eq!(delegate.failure.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_error_notifies_failure_exactly_once() {
    let transport = MockTransport::failing(Error::Network {
        message: "connection refused".to_string(),
    });
    let delegate = Arc::new(CountingDelegate::default());

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/thing",
        Completion::success_failure(delegate.clone()),
    )
    .send(&transport)
    .await
    .unwrap();

    assert_eq!(delegate.success.load(Ordering::SeqCst), 0);
    assert_eq!(delegate.failure.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn results_delegate_is_silent_on_failure() {
    let transport = MockTransport::replying(404, b"ignored");
    let delegate = Arc::new(RecordingResults::default());

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/thing",
        Completion::results(delegate.clone()),
    )
    .send(&transport)
    .await
    .unwrap();

    assert_eq!(delegate.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn results_delegate_fires_on_success() {
    let transport = MockTransport::replying(200, b"data");
    let delegate = Arc::new(RecordingResults::default());

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/thing",
        Completion::results(delegate.clone()),
    )
    .send(&transport)
    .await
    .unwrap();

    assert_eq!(delegate.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prepare_failure_never_reaches_transport() {
    let transport = MockTransport::replying(200, b"");
    let delegate = Arc::new(CountingDelegate::default());

    let result = HttpRequest::new(
        Method::GET,
        "not a url",
        Completion::success_failure(delegate.clone()),
    )
    .send(&transport)
    .await;

    assert!(result.is_err());
    assert_eq!(transport.executed.load(Ordering::SeqCst), 0);
    assert_eq!(delegate.failure.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn into_parts_allows_driving_a_foreign_transport() {
    let delivered = Arc::new(Mutex::new(None));
    let captured = delivered.clone();

    let prepared = HttpRequest::new(
        Method::GET,
        "https://api.example.com/thing",
        Completion::raw(move |data| {
            *captured.lock().unwrap() = data;
        }),
    )
    .prepare()
    .await
    .unwrap();

    let (request, completion) = prepared.into_parts();
    assert_eq!(request.url.as_str(), "https://api.example.com/thing");

    // the caller now owes the strategy exactly one dispatch
    completion.dispatch(
        Some(StatusCode::OK),
        Some(Bytes::from_static(b"external")),
        None,
    );
    assert_eq!(
        delivered.lock().unwrap().as_deref(),
        Some(b"external".as_slice())
    );
}

#[tokio::test]
async fn serialized_query_round_trips_through_parser() {
    let transport = MockTransport::replying(200, b"");

    HttpRequest::new(
        Method::GET,
        "https://api.example.com/search",
        Completion::raw(|_| {}),
    )
    .param("q", "a b")
    .param("lang", "en-US")
    .param("page", "2")
    .send(&transport)
    .await
    .unwrap();

    let guard = transport.last_request.lock().unwrap();
    let url = &guard.as_ref().unwrap().url;
    let fields = courier::query::parse_url(url);

    assert_eq!(fields.len(), 3);
    assert_eq!(fields["q"], "a b");
    assert_eq!(fields["lang"], "en-US");
    assert_eq!(fields["page"], "2");
}
