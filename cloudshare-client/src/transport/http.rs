//! reqwest-backed implementation of [`FileTransport`]

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::{self, Stream};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;

use cloudshare_common::protocol::{ErrorBody, FileMetadata, UploadResponse, UserCredits};
use cloudshare_common::{
    DOWNLOAD_TIMEOUT, FETCH_FILES_PATH, UPLOAD_FIELD_NAME, UPLOAD_FILES_PATH, UPLOAD_TIMEOUT,
    USER_CREDITS_PATH, download_path, file_path, public_file_path, toggle_public_path,
};

use super::{FileTransport, TransportError, UploadProgress};
use crate::constants::UPLOAD_CHUNK_SIZE;
use crate::types::PendingFile;

/// HTTP client for the CloudShare REST API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the API rooted at `base_url`
    ///
    /// `request_timeout` applies to every request except uploads, which use
    /// the fixed upload timeout.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("cloudshare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Bearer {token}"))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, TransportError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            message: ErrorBody::message_from(&body),
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FileTransport for HttpTransport {
    async fn list_files(&self, token: &str) -> Result<Vec<FileMetadata>, TransportError> {
        let request = self
            .authorized(self.client.get(self.url(FETCH_FILES_PATH)), token)
            .timeout(self.request_timeout);
        Self::json(Self::send(request).await?).await
    }

    async fn upload_files(
        &self,
        token: &str,
        files: &[PendingFile],
        progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    ) -> Result<UploadResponse, TransportError> {
        let total = files.iter().map(|f| f.size).sum();
        let reporter = ProgressReporter::new(total, progress);

        let mut form = Form::new();
        for file in files {
            form = form.part(UPLOAD_FIELD_NAME, file_part(file, reporter.clone()).await?);
        }

        tracing::debug!(files = files.len(), bytes = total, "sending upload request");
        let request = self
            .authorized(self.client.post(self.url(UPLOAD_FILES_PATH)), token)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT);
        let response = Self::send(request).await?;

        // A success status is enough; the body shape is informational only
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            tracing::debug!("upload response body not recognized: {e}");
            UploadResponse::default()
        }))
    }

    async fn delete_file(&self, token: &str, id: &str) -> Result<(), TransportError> {
        let request = self
            .authorized(self.client.delete(self.url(&file_path(id))), token)
            .timeout(self.request_timeout);
        Self::send(request).await?;
        Ok(())
    }

    async fn toggle_public(&self, token: &str, id: &str) -> Result<FileMetadata, TransportError> {
        let request = self
            .authorized(self.client.patch(self.url(&toggle_public_path(id))), token)
            .timeout(self.request_timeout);
        Self::json(Self::send(request).await?).await
    }

    async fn public_file(&self, id: &str) -> Result<FileMetadata, TransportError> {
        let request = self
            .client
            .get(self.url(&public_file_path(id)))
            .timeout(self.request_timeout);
        Self::json(Self::send(request).await?).await
    }

    async fn download_file(
        &self,
        token: &str,
        id: &str,
        dest: &Path,
    ) -> Result<u64, TransportError> {
        let request = self
            .authorized(self.client.get(self.url(&download_path(id))), token)
            .timeout(DOWNLOAD_TIMEOUT);
        let response = Self::send(request).await?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(TransportError::Io)?;
        match write_body(response, &mut file).await {
            Ok(written) => {
                tracing::debug!(id, bytes = written, "download complete");
                Ok(written)
            }
            Err(e) => {
                drop(file);
                if let Err(remove) = tokio::fs::remove_file(dest).await {
                    tracing::debug!("could not remove partial download: {remove}");
                }
                Err(e)
            }
        }
    }

    async fn user_credits(&self, token: &str) -> Result<UserCredits, TransportError> {
        let request = self
            .authorized(self.client.get(self.url(USER_CREDITS_PATH)), token)
            .timeout(self.request_timeout);
        Self::json(Self::send(request).await?).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::Decode(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

/// Copy a response body to `file` chunk by chunk
async fn write_body(
    response: Response,
    file: &mut tokio::fs::File,
) -> Result<u64, TransportError> {
    let mut body = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        file.write_all(&chunk).await.map_err(TransportError::Io)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(TransportError::Io)?;
    Ok(written)
}

// =============================================================================
// Multipart Body
// =============================================================================

/// Shared byte counter for every part of one upload
#[derive(Clone)]
struct ProgressReporter {
    loaded: Arc<AtomicU64>,
    total: u64,
    tx: Option<mpsc::UnboundedSender<UploadProgress>>,
}

impl ProgressReporter {
    fn new(total: u64, tx: Option<mpsc::UnboundedSender<UploadProgress>>) -> Self {
        Self {
            loaded: Arc::new(AtomicU64::new(0)),
            total,
            tx,
        }
    }

    fn advance(&self, bytes: u64) {
        let loaded = self.loaded.fetch_add(bytes, Ordering::Relaxed) + bytes;
        if let Some(tx) = &self.tx {
            let _ = tx.send(UploadProgress {
                loaded,
                total: self.total,
            });
        }
    }
}

/// Open a pending file and wrap it as a streamed multipart part
async fn file_part(file: &PendingFile, reporter: ProgressReporter) -> Result<Part, TransportError> {
    let handle = tokio::fs::File::open(&file.path)
        .await
        .map_err(TransportError::Io)?;
    let length = handle.metadata().await.map_err(TransportError::Io)?.len();

    let body = Body::wrap_stream(file_chunks(handle, reporter));
    Part::stream_with_length(body, length)
        .file_name(file.name.clone())
        .mime_str(&content_type_for(&file.name))
        .map_err(|e| TransportError::Network(e.to_string()))
}

/// Read a file in fixed-size chunks, reporting each chunk as it is consumed
fn file_chunks(
    file: tokio::fs::File,
    reporter: ProgressReporter,
) -> impl Stream<Item = io::Result<Vec<u8>>> + Send + 'static {
    stream::try_unfold(file, move |mut file| {
        let reporter = reporter.clone();
        async move {
            let mut buf = vec![0u8; UPLOAD_CHUNK_SIZE];
            let n = file.read(&mut buf).await?;
            if n == 0 {
                return Ok(None);
            }
            buf.truncate(n);
            reporter.advance(n as u64);
            Ok::<_, io::Error>(Some((buf, file)))
        }
    })
}

/// Content type sent for a part, guessed from the file extension
fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string()
}
