use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, UPLOAD_BYTES,
};
use crate::types::{ChatRequest, ChatResponse, Conversation, FileUpload, UploadResponse};

const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend operations the chat client depends on.
///
/// [`Backend`] implements this over HTTP.  Tests substitute an in-memory fake.
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/chat`.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// `POST /api/upload` with a single multipart `file` field.
    async fn upload(&self, upload: FileUpload) -> Result<UploadResponse>;

    /// `GET /api/conversation`.
    async fn conversation(&self) -> Result<Conversation>;

    /// `GET /api/conversation/export`, returned as an opaque JSON document.
    async fn export(&self) -> Result<serde_json::Value>;

    /// `POST /api/clear`.  Returns once the backend has acknowledged.
    async fn clear(&self) -> Result<()>;
}

/// HTTP client for the chat backend.
///
/// The backend keys the conversation by a session cookie, so the client keeps
/// a cookie store; one `Backend` is one conversation.
#[derive(Debug, Clone)]
pub struct Backend {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl Backend {
    /// Create a client for the backend at `http://localhost:5000/`.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .cookie_store(true)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a request, mapping transport failures and non-2xx statuses.
    ///
    /// `fallback` is the message used when an error response has no `error`
    /// field to report.
    async fn execute(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<Response> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        tracing::debug!(endpoint, "sending request");

        let result = match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(Self::process_error_response(response, fallback).await),
            Err(e) => Err(self.map_transport_error(e)),
        };

        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::warn!(endpoint, error = %err, "request failed");
        }
        result
    }

    // `Display` on `Error` supplies the category, so messages carry only the cause.
    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(e.to_string(), Some(self.timeout.as_secs_f64()))
        } else if e.is_connect() {
            Error::connection(e.to_string(), Some(Box::new(e)))
        } else {
            Error::http_client(e.to_string(), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response, fallback: &str) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        match status_code {
            400 => Error::bad_request(error_message),
            404 => Error::not_found(error_message),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl ChatApi for Backend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint("api/chat")?;
        let builder = self.client.post(url).json(request);
        let response = self
            .execute("chat", builder, "Failed to send message")
            .await?;
        Self::parse_json(response).await
    }

    async fn upload(&self, upload: FileUpload) -> Result<UploadResponse> {
        let url = self.endpoint("api/upload")?;
        UPLOAD_BYTES.count(upload.len() as u64);
        let part = Part::bytes(upload.bytes).file_name(upload.filename);
        let form = Form::new().part("file", part);
        let builder = self.client.post(url).multipart(form);
        let response = self
            .execute("upload", builder, "Failed to upload file")
            .await?;
        Self::parse_json(response).await
    }

    async fn conversation(&self) -> Result<Conversation> {
        let url = self.endpoint("api/conversation")?;
        let builder = self.client.get(url);
        let response = self
            .execute("conversation", builder, "Failed to load conversation")
            .await?;
        Self::parse_json(response).await
    }

    async fn export(&self) -> Result<serde_json::Value> {
        let url = self.endpoint("api/conversation/export")?;
        let builder = self.client.get(url);
        let response = self
            .execute("export", builder, "Failed to export conversation")
            .await?;
        Self::parse_json(response).await
    }

    async fn clear(&self) -> Result<()> {
        let url = self.endpoint("api/clear")?;
        let builder = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.execute("clear", builder, "Failed to clear conversation")
            .await?;
        Ok(())
    }
}

/// Create and return default headers for API requests.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Parse a base URL, forcing a trailing slash so relative joins keep any path prefix.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::url(
            format!("{base_url} cannot be used as a base URL"),
            None,
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
