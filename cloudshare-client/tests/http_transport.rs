//! Integration tests for the HTTP transport
//!
//! Each test runs a loopback HTTP server with canned responses and checks
//! both the requests the transport sends and how it reads the replies.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::TestServer;
use tempfile::TempDir;
use tokio::sync::mpsc;

use cloudshare_client::auth::StaticToken;
use cloudshare_client::credits::CreditsContext;
use cloudshare_client::dashboard::Dashboard;
use cloudshare_client::transport::{FileTransport, HttpTransport, TransportError};
use cloudshare_client::types::PendingFile;

// ============================================================================
// Helper Functions
// ============================================================================

fn transport(server: &TestServer) -> HttpTransport {
    HttpTransport::new(&server.base_url, Duration::from_secs(5)).expect("create transport")
}

fn ok(body: &str) -> (u16, String) {
    (200, body.to_string())
}

/// Write files into a temp dir and return them as pending entries
async fn write_pending(dir: &TempDir, files: &[(&str, &[u8])]) -> Vec<PendingFile> {
    let mut pending = Vec::new();
    for (name, contents) in files {
        let path = dir.path().join(name);
        tokio::fs::write(&path, contents).await.expect("write file");
        pending.push(PendingFile::from_path(&path).await.expect("pending file"));
    }
    pending
}

// ============================================================================
// Listing and Errors
// ============================================================================

#[tokio::test]
async fn test_list_files_sends_bearer_token() {
    let server = TestServer::spawn(vec![ok(
        r#"[{"id":"1","name":"a.txt","size":3,"type":"text/plain","isPublic":true,"uploadedAt":"2025-01-15T10:30:00"}]"#,
    )]);
    let transport = transport(&server);

    let files = transport.list_files("tok-123").await.expect("list files");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(files[0].content_type.as_deref(), Some("text/plain"));
    assert!(files[0].is_public);

    let requests = server.finish();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/files/my");
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = TestServer::spawn(vec![(400, r#"{"message":"Insufficient credits"}"#.to_string())]);
    let transport = transport(&server);

    let err = transport.list_files("tok").await.expect_err("should fail");
    match err {
        TransportError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Insufficient credits"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.finish();
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let server = TestServer::spawn(vec![(502, "Bad Gateway".to_string())]);
    let transport = transport(&server);

    let err = transport.list_files("tok").await.expect_err("should fail");
    assert!(matches!(
        err,
        TransportError::Status {
            status: 502,
            message: None
        }
    ));
    server.finish();
}

#[tokio::test]
async fn test_malformed_listing_is_decode_error() {
    let server = TestServer::spawn(vec![ok(r#"{"not":"a list"}"#)]);
    let transport = transport(&server);

    let err = transport.list_files("tok").await.expect_err("should fail");
    assert!(matches!(err, TransportError::Decode(_)));
    server.finish();
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_sends_multipart_files_field() {
    let server = TestServer::spawn(vec![ok(
        r#"{"files":[{"id":"9","name":"a.txt","uploadedAt":"2025-01-01T00:00:00"}],"remainingCredits":3}"#,
    )]);
    let transport = transport(&server);
    let dir = TempDir::new().expect("temp dir");
    let pending = write_pending(&dir, &[("a.txt", b"alpha"), ("b.txt", b"bravo!")]).await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let response = transport
        .upload_files("tok", &pending, Some(tx))
        .await
        .expect("upload");
    assert_eq!(response.remaining_credits, Some(3));
    assert_eq!(response.files.len(), 1);

    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        last = Some(event);
    }
    let last = last.expect("progress events");
    assert_eq!(last.loaded, 11);
    assert_eq!(last.total, 11);

    let requests = server.finish();
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/files/upload");
    assert_eq!(request.header("authorization"), Some("Bearer tok"));
    assert!(
        request
            .header("content-type")
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    );

    let body = request.body_text();
    assert_eq!(body.matches("name=\"files\"").count(), 2);
    assert!(body.contains("filename=\"a.txt\""));
    assert!(body.contains("filename=\"b.txt\""));
    assert!(body.contains("alpha"));
    assert!(body.contains("bravo!"));
    assert!(body.to_lowercase().contains("content-type: text/plain"));
}

#[tokio::test]
async fn test_upload_part_content_type_from_extension() {
    let server = TestServer::spawn(vec![ok(r#"{"files":[]}"#)]);
    let transport = transport(&server);
    let dir = TempDir::new().expect("temp dir");
    let pending = write_pending(&dir, &[("clip.mov", b"moov"), ("blob", b"raw")]).await;

    transport
        .upload_files("tok", &pending, None)
        .await
        .expect("upload");

    let requests = server.finish();
    let body = requests[0].body_text().to_lowercase();
    assert!(body.contains("content-type: video/quicktime"));
    assert!(body.contains("content-type: application/octet-stream"));
}

#[tokio::test]
async fn test_upload_success_with_unrecognized_body() {
    let server = TestServer::spawn(vec![ok("uploaded")]);
    let transport = transport(&server);
    let dir = TempDir::new().expect("temp dir");
    let pending = write_pending(&dir, &[("a.bin", b"\x00\x01")]).await;

    let response = transport
        .upload_files("tok", &pending, None)
        .await
        .expect("upload");
    assert!(response.files.is_empty());
    assert_eq!(response.remaining_credits, None);
    server.finish();
}

#[tokio::test]
async fn test_upload_missing_local_file_sends_nothing() {
    let server = TestServer::spawn(Vec::new());
    let transport = transport(&server);
    let missing = PendingFile::new("/nonexistent/cloudshare/file.txt", "file.txt", 1);

    let err = transport
        .upload_files("tok", &[missing], None)
        .await
        .expect_err("should fail");
    assert!(matches!(err, TransportError::Io(_)));
    assert!(server.finish().is_empty());
}

// ============================================================================
// Per-file Operations
// ============================================================================

#[tokio::test]
async fn test_delete_and_toggle_paths() {
    let server = TestServer::spawn(vec![
        ok(""),
        ok(r#"{"id":"abc","name":"a.txt","isPublic":true,"uploadedAt":"2025-01-01T00:00:00"}"#),
    ]);
    let transport = transport(&server);

    transport.delete_file("tok", "abc").await.expect("delete");
    let updated = transport.toggle_public("tok", "abc").await.expect("toggle");
    assert!(updated.is_public);

    let requests = server.finish();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/files/abc");
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].path, "/api/files/abc/toggle-public");
}

#[tokio::test]
async fn test_public_file_is_unauthenticated() {
    let server = TestServer::spawn(vec![ok(
        r#"{"id":"abc","name":"shared.pdf","isPublic":true,"uploadedAt":"2025-01-01T00:00:00"}"#,
    )]);
    let transport = transport(&server);

    let file = transport.public_file("abc").await.expect("public file");
    assert_eq!(file.name, "shared.pdf");

    let requests = server.finish();
    assert_eq!(requests[0].path, "/api/files/public/abc");
    assert!(requests[0].header("authorization").is_none());
}

// ============================================================================
// Download
// ============================================================================

#[tokio::test]
async fn test_download_writes_file() {
    let server = TestServer::spawn(vec![ok("hello download")]);
    let transport = transport(&server);
    let dir = TempDir::new().expect("temp dir");
    let dest = dir.path().join("saved.txt");

    let written = transport
        .download_file("tok", "abc", &dest)
        .await
        .expect("download");
    assert_eq!(written, 14);
    assert_eq!(
        tokio::fs::read_to_string(&dest).await.expect("read"),
        "hello download"
    );

    let requests = server.finish();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/api/files/download/abc");
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn test_download_error_leaves_no_file() {
    let server = TestServer::spawn(vec![(404, r#"{"message":"File not found"}"#.to_string())]);
    let transport = transport(&server);
    let dir = TempDir::new().expect("temp dir");
    let dest = dir.path().join("missing.bin");

    let err = transport
        .download_file("tok", "nope", &dest)
        .await
        .expect_err("should fail");
    match err {
        TransportError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("File not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dest.exists());
    server.finish();
}

// ============================================================================
// Dashboard over HTTP
// ============================================================================

#[tokio::test]
async fn test_dashboard_upload_refreshes_list_and_credits() {
    let server = TestServer::spawn(vec![
        ok(r#"{"files":[],"remainingCredits":2}"#),
        ok(
            r#"[{"id":"1","name":"old.txt","uploadedAt":"2024-05-01T08:00:00"},
                {"id":"2","name":"a.txt","uploadedAt":"2025-05-01T08:00:00Z"}]"#,
        ),
        ok(r#"{"credits":2,"plan":"BASIC"}"#),
    ]);
    let transport: Arc<dyn FileTransport> = Arc::new(transport(&server));
    let tokens = Arc::new(StaticToken::new("tok"));
    let credits = CreditsContext::new(transport.clone(), tokens.clone());
    let mut dashboard = Dashboard::new(transport, tokens, Arc::new(credits.clone()));

    let dir = TempDir::new().expect("temp dir");
    let pending = write_pending(&dir, &[("a.txt", b"hello")]).await;
    dashboard.select_files(pending).expect("select");

    let outcome = dashboard.upload().await;
    assert!(outcome.is_success());
    assert_eq!(
        dashboard.message().map(|m| m.text.as_str()),
        Some("Files uploaded successfully!")
    );
    let names: Vec<&str> = dashboard
        .recent_files()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["a.txt", "old.txt"]);
    assert_eq!(credits.current().map(|c| c.credits), Some(2));

    let requests = server.finish();
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/api/files/upload", "/api/files/my", "/api/users/credits"]
    );
    assert!(
        requests
            .iter()
            .all(|r| r.header("authorization") == Some("Bearer tok"))
    );
}

#[tokio::test]
async fn test_dashboard_upload_failure_shows_server_message() {
    let server = TestServer::spawn(vec![(
        400,
        r#"{"message":"File type not allowed"}"#.to_string(),
    )]);
    let transport: Arc<dyn FileTransport> = Arc::new(transport(&server));
    let tokens = Arc::new(StaticToken::new("tok"));
    let credits = CreditsContext::new(transport.clone(), tokens.clone());
    let mut dashboard = Dashboard::new(transport, tokens, Arc::new(credits.clone()));

    let dir = TempDir::new().expect("temp dir");
    let pending = write_pending(&dir, &[("a.exe", b"MZ")]).await;
    dashboard.select_files(pending).expect("select");

    assert!(!dashboard.upload().await.is_success());
    let message = dashboard.message().expect("message");
    assert!(message.is_error());
    assert_eq!(message.text, "File type not allowed");
    assert_eq!(dashboard.pending_files().len(), 1);
    assert!(credits.current().is_none());

    assert_eq!(server.finish().len(), 1);
}
