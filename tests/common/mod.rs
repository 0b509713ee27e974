//! Mock classification service for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use mailclassify::config::ServerConfig;

/// One multipart field as received by the mock.
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// One request as received by the mock.
#[derive(Debug, Clone)]
pub enum Received {
    Json { path: String, body: Value },
    Multipart { path: String, fields: Vec<ReceivedField> },
    Health,
}

impl Received {
    pub fn path(&self) -> &str {
        match self {
            Self::Json { path, .. } | Self::Multipart { path, .. } => path,
            Self::Health => "/health",
        }
    }
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => (status, Json(body)).into_response(),
            Reply::Text(status, body) => (status, body).into_response(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    received: Arc<Mutex<Vec<Received>>>,
    reply: Reply,
    delay: Option<Duration>,
}

impl MockState {
    async fn answer(&self, request: Received) -> Reply {
        self.received.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

/// A running mock service.
pub struct MockServer {
    pub url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockServer {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            base_url: self.url.clone(),
            ..ServerConfig::default()
        }
    }
}

/// The body a healthy backend sends for a productive email.
pub fn productive_reply() -> Reply {
    Reply::Json(
        StatusCode::OK,
        json!({
            "category": "PRODUTIVO",
            "reasoning": "Pedido de suporte técnico",
            "suggested_response": "Olá! Recebemos sua solicitação e vamos verificar.",
            "original_content": "...",
            "char_count": 1234,
            "word_count": 210,
            "filename": null
        }),
    )
}

pub async fn spawn_mock(reply: Reply) -> MockServer {
    spawn_mock_with_delay(reply, None).await
}

pub async fn spawn_mock_with_delay(reply: Reply, delay: Option<Duration>) -> MockServer {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
    let addr = listener.local_addr().expect("mock addr");
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        received: Arc::clone(&received),
        reply,
        delay,
    };
    let app = Router::new()
        .route("/classify-text", post(handle_json))
        .route("/api/classify", post(handle_json))
        .route("/upload", post(handle_upload))
        .route("/health", get(handle_health))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockServer {
        url: format!("http://{addr}"),
        received,
    }
}

async fn handle_json(State(state): State<MockState>, uri: Uri, Json(body): Json<Value>) -> Reply {
    state
        .answer(Received::Json {
            path: uri.path().to_string(),
            body,
        })
        .await
}

async fn handle_upload(State(state): State<MockState>, mut multipart: Multipart) -> Reply {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(ReceivedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    state
        .answer(Received::Multipart {
            path: "/upload".to_string(),
            fields,
        })
        .await
}

async fn handle_health(State(state): State<MockState>) -> Reply {
    state.received.lock().unwrap().push(Received::Health);
    state.reply.clone()
}
