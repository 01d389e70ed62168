#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vidgrab_api::config::ServerConfig;
use vidgrab_api::relay::ProxyRelay;
use vidgrab_api::router::build_app_router;
use vidgrab_api::state::AppState;
use vidgrab_extractor::{EngineError, ExtractionEngine};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        extract_timeout_secs: 5,
        fetch_timeout_secs: 5,
        ..ServerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Fake extraction engine
// ---------------------------------------------------------------------------

type Responder = Box<dyn Fn(&str) -> Result<Value, EngineError> + Send + Sync>;

/// In-memory engine that answers every URL from a closure and counts calls.
pub struct FakeEngine {
    respond: Responder,
    calls: AtomicUsize,
}

impl FakeEngine {
    pub fn new(respond: impl Fn(&str) -> Result<Value, EngineError> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
        })
    }

    /// Engine that always returns `value`.
    pub fn returning(value: Value) -> Arc<Self> {
        Self::new(move |_| Ok(value.clone()))
    }

    /// Engine that always fails with the error built by `make`.
    pub fn failing(make: fn() -> EngineError) -> Arc<Self> {
        Self::new(move |_| Err(make()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(&self, url: &str) -> Result<Value, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(url)
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router around `engine` with the test config.
pub fn build_test_app(engine: Arc<FakeEngine>) -> Router {
    build_test_app_with(test_config(), engine)
}

/// Build the full application router with an explicit config.
///
/// Uses the same `build_app_router` as `main.rs` so tests exercise the
/// production middleware stack.
pub fn build_test_app_with(config: ServerConfig, engine: Arc<FakeEngine>) -> Router {
    let relay = ProxyRelay::new(
        Duration::from_secs(config.fetch_timeout_secs),
        config.max_download_bytes,
    )
    .expect("relay client");

    let state = AppState {
        engine,
        relay: Arc::new(relay),
    };

    build_app_router(state, &config)
}

/// App whose engine must never be reached.
pub fn build_unreachable_engine_app() -> Router {
    build_test_app(FakeEngine::new(|url| panic!("engine called for {url}")))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Percent-encode a value for use in a query string.
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ---------------------------------------------------------------------------
// Local upstream server
// ---------------------------------------------------------------------------

/// Serve `router` on an ephemeral localhost port and return its address.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}
