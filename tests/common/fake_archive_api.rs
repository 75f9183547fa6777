//! Fake archive proxy for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /api/exoplanets` with whatever the test configured:
//! a JSON array, an error status, a garbage body, or a delayed response.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeArchiveApi::start().await.unwrap();
//! api.respond_json(archive_json());
//! let source = HttpSource::new(api.url(), Duration::from_secs(5));
//! ```

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
pub enum Reply {
    Json(serde_json::Value),
    Status(u16),
    Body(String),
    Delayed(Duration, serde_json::Value),
}

struct ApiState {
    reply: Mutex<Reply>,
    hits: AtomicUsize,
}

/// Handle to the running fake archive server.
pub struct FakeArchiveApi {
    addr: SocketAddr,
    state: Arc<ApiState>,
}

impl FakeArchiveApi {
    /// Start the server on a random port, initially answering with `[]`.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ApiState {
            reply: Mutex::new(Reply::Json(serde_json::json!([]))),
            hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/exoplanets", get(exoplanets))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/exoplanets", self.addr)
    }

    pub fn respond(&self, reply: Reply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    pub fn respond_json(&self, body: serde_json::Value) {
        self.respond(Reply::Json(body));
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn exoplanets(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.reply.lock().unwrap().clone();
    match reply {
        Reply::Json(body) => (StatusCode::OK, axum::Json(body)).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Reply::Body(text) => (StatusCode::OK, text).into_response(),
        Reply::Delayed(delay, body) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, axum::Json(body)).into_response()
        }
    }
}
