//! Integration tests for the HTTP classifier against a mock service.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use common::{productive_reply, spawn_mock, spawn_mock_with_delay, Received, Reply};
use mailclassify::client::{Classifier, HttpClassifier, TextContract};
use mailclassify::config::ServerConfig;
use mailclassify::error::RequestError;
use mailclassify::i18n;
use mailclassify::model::input::{FilePayload, PendingInput, TextPayload};
use mailclassify::model::result::Category;

fn text(content: &str) -> PendingInput {
    PendingInput::Text(TextPayload {
        content: content.to_string(),
    })
}

// ─── Text contracts ─────────────────────────────────────────────────

#[tokio::test]
async fn test_text_is_sent_as_json_to_classify_text() {
    let server = spawn_mock(productive_reply()).await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();

    let result = client
        .classify(text("Preciso de ajuda com o sistema"))
        .await
        .unwrap();

    assert_eq!(result.category, Category::Productive);
    assert_eq!(result.char_count, 1234);
    assert_eq!(result.word_count, 210);
    assert_eq!(
        result.suggested_response,
        "Olá! Recebemos sua solicitação e vamos verificar."
    );

    let received = server.received();
    assert_eq!(received.len(), 1, "exactly one request per submission");
    match &received[0] {
        Received::Json { path, body } => {
            assert_eq!(path, "/classify-text");
            assert_eq!(body, &json!({ "content": "Preciso de ajuda com o sistema" }));
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_contract_uses_api_path() {
    let server = spawn_mock(productive_reply()).await;
    let config = ServerConfig {
        text_contract: TextContract::Api,
        ..server.server_config()
    };
    let client = HttpClassifier::new(&config).unwrap();
    client.classify(text("Bom dia, tudo certo?")).await.unwrap();

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path(), "/api/classify");
}

#[tokio::test]
async fn test_upload_form_contract_sends_email_text_field() {
    let server = spawn_mock(productive_reply()).await;
    let config = ServerConfig {
        text_contract: TextContract::UploadForm,
        ..server.server_config()
    };
    let client = HttpClassifier::new(&config).unwrap();
    client
        .classify(text("Segue o relatório do mês"))
        .await
        .unwrap();

    match &server.received()[0] {
        Received::Multipart { path, fields } => {
            assert_eq!(path, "/upload");
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].name, "email_text");
            assert_eq!(fields[0].data, "Segue o relatório do mês".as_bytes());
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

// ─── File upload ────────────────────────────────────────────────────

#[tokio::test]
async fn test_file_is_uploaded_as_multipart_file_part() {
    let server = spawn_mock(productive_reply()).await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();

    let bytes = "Olá equipe,\nobrigado pelo apoio!".as_bytes().to_vec();
    let file = FilePayload::new("obrigado.txt", "text/plain", bytes.clone());
    client.classify(PendingInput::File(file)).await.unwrap();

    match &server.received()[0] {
        Received::Multipart { path, fields } => {
            assert_eq!(path, "/upload");
            assert_eq!(fields.len(), 1);
            let field = &fields[0];
            assert_eq!(field.name, "file");
            assert_eq!(field.file_name.as_deref(), Some("obrigado.txt"));
            assert_eq!(field.content_type.as_deref(), Some("text/plain"));
            assert_eq!(field.data, bytes);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

// ─── Response handling ──────────────────────────────────────────────

#[tokio::test]
async fn test_classification_alias_is_accepted() {
    let server = spawn_mock(Reply::Json(
        StatusCode::OK,
        json!({
            "classification": "IMPRODUTIVO",
            "suggested_response": "Obrigado pela mensagem!",
            "char_count": "87",
        }),
    ))
    .await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let result = client.classify(text("Feliz natal a todos!")).await.unwrap();

    assert_eq!(result.category, Category::Other("IMPRODUTIVO".to_string()));
    assert_eq!(result.char_count, 87);
    assert_eq!(result.word_count, 0);
}

#[tokio::test]
async fn test_error_body_message_is_used() {
    let server = spawn_mock(Reply::Json(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Conteúdo do email é obrigatório" }),
    ))
    .await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();

    match &err {
        RequestError::Server { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Conteúdo do email é obrigatório");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Conteúdo do email é obrigatório");
}

#[tokio::test]
async fn test_error_without_json_body_uses_generic_message() {
    let server = spawn_mock(Reply::Text(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html>Internal Server Error</html>",
    ))
    .await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();

    assert!(matches!(err, RequestError::Server { status: 500, .. }));
    assert_eq!(err.user_message(), i18n::err_server());
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_malformed() {
    let server = spawn_mock(Reply::Json(StatusCode::OK, json!({ "category": "PRODUTIVO" }))).await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();

    assert!(matches!(err, RequestError::Malformed { .. }), "got {err:?}");
    assert_eq!(err.user_message(), i18n::err_processing_email());
}

#[tokio::test]
async fn test_success_with_non_json_body_is_malformed() {
    let server = spawn_mock(Reply::Text(StatusCode::OK, "ok")).await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();
    assert!(matches!(err, RequestError::Malformed { .. }), "got {err:?}");
}

// ─── Transport ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_configured_timeout_is_reported() {
    let server = spawn_mock_with_delay(productive_reply(), Some(Duration::from_secs(5))).await;
    let config = ServerConfig {
        request_timeout_secs: Some(1),
        ..server.server_config()
    };
    let client = HttpClassifier::new(&config).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();

    assert!(matches!(err, RequestError::Timeout), "got {err:?}");
    assert_eq!(err.user_message(), i18n::err_request_timeout());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    // Grab a free port, then close it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ServerConfig {
        base_url: format!("http://{addr}"),
        ..ServerConfig::default()
    };
    let client = HttpClassifier::new(&config).unwrap();
    let err = client.classify(text("qualquer coisa")).await.unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)), "got {err:?}");
    assert_eq!(err.user_message(), i18n::err_processing_email());
}

// ─── Health ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_check() {
    let server = spawn_mock(Reply::Json(
        StatusCode::OK,
        json!({ "status": "healthy", "service": "AutoU Email Classifier" }),
    ))
    .await;
    let client = HttpClassifier::new(&server.server_config()).unwrap();
    let health = client.health().await.unwrap();

    assert!(health.is_healthy());
    assert_eq!(health.service, "AutoU Email Classifier");
    assert!(matches!(server.received()[0], Received::Health));
}
