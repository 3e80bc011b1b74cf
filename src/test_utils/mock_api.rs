//! A stand-in for the subscription API, served on an ephemeral local port.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// What the mock API answers to `GET /transactions`.
#[derive(Debug, Clone)]
pub(crate) enum MockResponse {
    /// A JSON body with the given status.
    Json(StatusCode, Value),
    /// An empty body with the given status.
    Status(StatusCode),
}

#[derive(Clone)]
struct MockState {
    response: MockResponse,
    authorization_headers: Arc<Mutex<Vec<String>>>,
}

/// A running mock API. The server stops when the test's runtime shuts down.
pub(crate) struct MockApi {
    address: SocketAddr,
    authorization_headers: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub(crate) async fn spawn(response: MockResponse) -> Self {
        let authorization_headers = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            response,
            authorization_headers: authorization_headers.clone(),
        };
        let app = Router::new()
            .route("/transactions", get(get_transactions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock API listener");
        let address = listener
            .local_addr()
            .expect("Could not get mock API address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock API server failed");
        });

        Self {
            address,
            authorization_headers,
        }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// The `Authorization` header of every request received so far.
    pub(crate) fn authorization_headers(&self) -> Vec<String> {
        self.authorization_headers.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.authorization_headers.lock().unwrap().len()
    }
}

async fn get_transactions(State(state): State<MockState>, headers: HeaderMap) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    state.authorization_headers.lock().unwrap().push(authorization);

    match state.response {
        MockResponse::Json(status, body) => (status, Json(body)).into_response(),
        MockResponse::Status(status) => status.into_response(),
    }
}
