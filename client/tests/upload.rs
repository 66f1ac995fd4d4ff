mod common;

use std::time::Duration;

use common::{api_for, init_logging, unreachable_api};
use doc_client::{
    ApiBase, ApiClient, MessageKind, SelectedFile, StatusMessage, UploadController,
    DEFAULT_UPLOAD_FAILURE, UPLOAD_ERROR,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pdf(name: &str, contents: &str) -> Option<SelectedFile> {
    Some(SelectedFile::new(name, contents.as_bytes().to_vec()))
}

#[tokio::test]
async fn successful_ingest_shows_server_message_and_clears_input() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    let message = controller
        .handle_file_selected(pdf("report.pdf", "%PDF-1.4"))
        .await
        .expect("a file was selected");

    assert_eq!(message, StatusMessage::success("ok"));
    let status = controller.status();
    assert!(!status.loading);
    assert_eq!(status.message, Some(StatusMessage::success("ok")));
    assert_eq!(controller.selected_file(), None);
}

#[tokio::test]
async fn upload_is_sent_as_multipart_file_field() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    controller
        .handle_file_selected(pdf("policy.pdf", "%PDF-1.7 body"))
        .await;

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .expect("content type")
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="file""#));
    assert!(body.contains(r#"filename="policy.pdf""#));
    assert!(body.contains("application/pdf"));
    assert!(body.contains("%PDF-1.7 body"));
}

#[tokio::test]
async fn rejected_ingest_shows_server_error_and_keeps_input() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"success": false, "error": "bad pdf"})),
        )
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    controller.handle_file_selected(pdf("broken.pdf", "nope")).await;

    let status = controller.status();
    assert!(!status.loading);
    assert_eq!(status.message, Some(StatusMessage::error("bad pdf")));
    assert_eq!(controller.selected_file().as_deref(), Some("broken.pdf"));
}

#[tokio::test]
async fn rejected_ingest_without_text_uses_default() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    let message = controller
        .handle_file_selected(pdf("a.pdf", "x"))
        .await
        .unwrap();
    assert_eq!(message, StatusMessage::error(DEFAULT_UPLOAD_FAILURE));
}

#[tokio::test]
async fn network_failure_shows_generic_error() {
    init_logging();
    let controller = UploadController::new(unreachable_api());
    let message = controller
        .handle_file_selected(pdf("a.pdf", "x"))
        .await
        .unwrap();

    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, UPLOAD_ERROR);
    assert!(!controller.status().loading);
}

#[tokio::test]
async fn missing_api_base_shows_generic_error() {
    init_logging();
    let api = ApiClient::new(ApiBase::Env("DOC_CLIENT_UPLOAD_TEST_UNSET_BASE"));
    let controller = UploadController::new(api);
    let message = controller
        .handle_file_selected(pdf("a.pdf", "x"))
        .await
        .unwrap();

    assert_eq!(message, StatusMessage::error(UPLOAD_ERROR));
    let status = controller.status();
    assert!(!status.loading);
    assert_eq!(status.message, Some(StatusMessage::error(UPLOAD_ERROR)));
}

#[tokio::test]
async fn undecodable_body_shows_generic_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    controller.handle_file_selected(pdf("a.pdf", "x")).await;

    assert_eq!(
        controller.status().message,
        Some(StatusMessage::error(UPLOAD_ERROR))
    );
    assert!(!controller.status().loading);
}

#[tokio::test]
async fn no_file_selected_sends_nothing() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    assert!(controller.handle_file_selected(None).await.is_none());
    assert_eq!(controller.status().message, None);
}

#[tokio::test]
async fn loading_is_visible_while_request_is_in_flight() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    let job = controller.begin(pdf("a.pdf", "x")).unwrap();
    assert!(controller.status().loading);
    assert_eq!(controller.status().message, None);

    job.run().await;
    assert!(!controller.status().loading);
}

#[tokio::test]
async fn last_response_to_resolve_wins() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .and(body_string_contains("first.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "first done"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ingest-file"))
        .and(body_string_contains("second.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "second done"})),
        )
        .mount(&server)
        .await;

    let controller = UploadController::new(api_for(&server));
    let first = controller.begin(pdf("first.pdf", "one")).unwrap();
    let second = controller.begin(pdf("second.pdf", "two")).unwrap();
    let (first_message, second_message) = tokio::join!(first.run(), second.run());

    assert_eq!(first_message.text, "first done");
    assert_eq!(second_message.text, "second done");
    assert_eq!(
        controller.status().message,
        Some(StatusMessage::success("first done"))
    );
    assert!(!controller.status().loading);
}

#[tokio::test]
async fn selected_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manual.pdf");
    std::fs::write(&path, b"%PDF-1.5").unwrap();

    let file = SelectedFile::from_path(&path).await.unwrap();
    assert_eq!(file.name, "manual.pdf");
    assert_eq!(file.bytes, b"%PDF-1.5");

    assert!(SelectedFile::from_path(dir.path().join("missing.pdf"))
        .await
        .is_err());
}
