//! Shared helpers for integration tests
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use cloudshare_client::transport::{FileTransport, TransportError, UploadProgress};
use cloudshare_client::types::{FileMetadata, PendingFile, UploadResponse, UserCredits};

// ============================================================================
// Loopback HTTP Responder
// ============================================================================

/// One request as received by the test server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP server that answers each connection with the next canned response
///
/// Every response carries `Connection: close`, so each request arrives on
/// its own connection.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn spawn(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let addr = listener.local_addr().expect("test server addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let captured = requests.clone();
        let handle = std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
                let Some(request) = read_request(&mut reader) else {
                    continue;
                };
                captured.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    if status < 400 { "OK" } else { "Error" },
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
            handle: Some(handle),
        }
    }

    /// Wait for every canned response to be served and return the requests
    pub fn finish(mut self) -> Vec<CapturedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("test server thread");
        }
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(reader: &mut BufReader<std::net::TcpStream>) -> Option<CapturedRequest> {
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.trim().splitn(3, ' ');
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() || line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.trim().split_once(':') {
            headers.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let chunked = headers
        .get("transfer-encoding")
        .is_some_and(|v| v.to_lowercase().contains("chunked"));
    let body = if chunked {
        read_chunked_body(reader)?
    } else {
        let length: usize = headers
            .get("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).ok()?;
        body
    };

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn read_chunked_body(reader: &mut BufReader<std::net::TcpStream>) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).ok()?;
        let size_hex = size_line.trim().split(';').next().unwrap_or("0");
        let size = usize::from_str_radix(size_hex, 16).ok()?;
        if size == 0 {
            // Trailers end with an empty line
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).is_err() || line.trim().is_empty() {
                    break;
                }
            }
            return Some(body);
        }
        let mut chunk = vec![0u8; size];
        reader.read_exact(&mut chunk).ok()?;
        body.extend_from_slice(&chunk);
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).ok()?;
    }
}

// ============================================================================
// Scripted Transport
// ============================================================================

/// In-memory transport with scriptable failures
#[derive(Default)]
pub struct ScriptedTransport {
    pub files: Mutex<Vec<FileMetadata>>,
    pub upload_failure: Mutex<Option<TransportError>>,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub tokens_seen: Mutex<Vec<String>>,
    /// When set, uploads announce themselves on `entered` and wait on `gate`
    pub hold_uploads: Mutex<bool>,
    pub entered: Notify,
    pub gate: Notify,
}

impl ScriptedTransport {
    pub fn with_files(files: Vec<FileMetadata>) -> Self {
        Self {
            files: Mutex::new(files),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileTransport for ScriptedTransport {
    async fn list_files(&self, token: &str) -> Result<Vec<FileMetadata>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());
        Ok(self.files.lock().unwrap().clone())
    }

    async fn upload_files(
        &self,
        token: &str,
        files: &[PendingFile],
        _progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    ) -> Result<UploadResponse, TransportError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_seen.lock().unwrap().push(token.to_string());

        let hold = *self.hold_uploads.lock().unwrap();
        if hold {
            self.entered.notify_one();
            self.gate.notified().await;
        }

        if let Some(e) = self.upload_failure.lock().unwrap().take() {
            return Err(e);
        }

        let mut stored = self.files.lock().unwrap();
        let offset = stored.len();
        let mut uploaded = Vec::new();
        for (i, file) in files.iter().enumerate() {
            let record = file_record(
                &format!("f{}", offset + i),
                &file.name,
                &format!("2031-01-01T00:00:{:02}Z", offset + i),
            );
            stored.push(record.clone());
            uploaded.push(record);
        }
        Ok(UploadResponse {
            files: uploaded,
            remaining_credits: None,
        })
    }

    async fn delete_file(&self, _token: &str, id: &str) -> Result<(), TransportError> {
        self.files.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }

    async fn toggle_public(&self, _token: &str, id: &str) -> Result<FileMetadata, TransportError> {
        let mut files = self.files.lock().unwrap();
        let file = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(TransportError::Status {
                status: 404,
                message: None,
            })?;
        file.is_public = !file.is_public;
        Ok(file.clone())
    }

    async fn public_file(&self, id: &str) -> Result<FileMetadata, TransportError> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(TransportError::Status {
                status: 404,
                message: None,
            })
    }

    async fn download_file(
        &self,
        _token: &str,
        _id: &str,
        _dest: &Path,
    ) -> Result<u64, TransportError> {
        Err(TransportError::Status {
            status: 404,
            message: None,
        })
    }

    async fn user_credits(&self, _token: &str) -> Result<UserCredits, TransportError> {
        Ok(UserCredits {
            credits: 5,
            plan: None,
        })
    }
}

pub fn file_record(id: &str, name: &str, uploaded_at: &str) -> FileMetadata {
    FileMetadata {
        id: id.to_string(),
        name: name.to_string(),
        size: 42,
        uploaded_at: uploaded_at.to_string(),
        ..Default::default()
    }
}

pub fn pending(names: &[&str]) -> Vec<PendingFile> {
    names
        .iter()
        .map(|n| PendingFile::new(format!("/tmp/{n}"), *n, 10))
        .collect()
}
