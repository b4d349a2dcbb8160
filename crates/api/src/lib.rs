//! Completion API client.
//!
//! This crate provides a lightweight client for the article completion
//! service. It focuses on:
//!
//! - Validating the configured base URL
//! - Posting the composed prompt as `{"message": ...}` to `/completions`
//! - Decoding the first completion's message into an [`Article`]
//!
//! The primary entry point is [`CompletionClient`]. Callers that need to swap
//! the transport (tests, the TUI) depend on the [`CompletionBackend`] trait.
//!
//! # Example
//!
//! ```ignore
//! use quill_api::{CompletionBackend, CompletionClient};
//! use quill_types::{CompletionRequest, FormState};
//!
//! async fn demo() -> anyhow::Result<()> {
//!     let client = CompletionClient::new("http://localhost:3001")?;
//!     let form = FormState { topic: "Cats".into(), ..FormState::default() };
//!     let article = client.complete(&CompletionRequest::from(&form)).await?;
//!     println!("{}", article.text());
//!     Ok(())
//! }
//! ```

use std::env;

use async_trait::async_trait;
use quill_types::{Article, CompletionRequest, CompletionResponse};
use reqwest::{Client, StatusCode, Url, header};
use thiserror::Error;
use tracing::debug;

/// Path of the completion endpoint relative to the base URL.
pub const COMPLETIONS_PATH: &str = "/completions";

/// Failures while requesting or decoding a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The configured base URL is unusable.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// Building the underlying HTTP client failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request never produced a response (connection refused, reset, DNS).
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The body was not the expected `choices` envelope.
    #[error("malformed completion response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The envelope carried no completions.
    #[error("completion response contained no choices")]
    NoChoices,
}

/// Anything that can turn a [`CompletionRequest`] into an [`Article`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Article, CompletionError>;
}

/// Thin wrapper around a configured `reqwest::Client` for the completion
/// service.
///
/// No request timeout is configured: a request waits for the transport to
/// resolve or fail.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    endpoint: Url,
    http: Client,
    user_agent: String,
}

impl CompletionClient {
    /// Construct a client rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, CompletionError> {
        let base = validate_base_url(base_url)?;
        let endpoint = completions_url(&base)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(CompletionError::Client)?;

        Ok(Self {
            endpoint,
            http,
            user_agent: format!("quill/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Absolute URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Article, CompletionError> {
        debug!(url = %self.endpoint, prompt_len = request.message.len(), "posting completion request");

        // `.json` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .json(request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CompletionError::Transport)?;

        // A readable `choices` envelope wins regardless of status; the status
        // only surfaces when the body is unusable.
        match parse_completion_body(&body) {
            Ok(article) => {
                if !status.is_success() {
                    debug!(%status, "completion service returned an article with a non-success status");
                }
                Ok(article)
            }
            Err(_) if !status.is_success() => Err(CompletionError::Status { status, body }),
            Err(error) => Err(error),
        }
    }
}

/// Decode a completion body and take the first choice's message.
pub fn parse_completion_body(body: &str) -> Result<Article, CompletionError> {
    let envelope: CompletionResponse = serde_json::from_str(body).map_err(CompletionError::Decode)?;
    envelope.into_first_article().ok_or(CompletionError::NoChoices)
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - it must parse as an absolute URL
/// - the scheme must be `http` or `https`
/// - it must include a host
pub fn validate_base_url(base: &str) -> Result<Url, CompletionError> {
    let invalid = |reason: String| CompletionError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };

    let parsed = Url::parse(base.trim()).map_err(|error| invalid(error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}://'", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".into()));
    }
    Ok(parsed)
}

/// Append [`COMPLETIONS_PATH`] to the base URL, keeping any base path prefix
/// and dropping any query or fragment.
fn completions_url(base: &Url) -> Result<Url, CompletionError> {
    let mut endpoint = base.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
        .path_segments_mut()
        .map_err(|()| CompletionError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "URL cannot be a base".into(),
        })?
        .pop_if_empty()
        .push(COMPLETIONS_PATH.trim_start_matches('/'));
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use quill_types::FormState;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
        let address = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{address}")
    }

    fn cats_request() -> CompletionRequest {
        CompletionRequest::from(&FormState {
            topic: "Cats".into(),
            audience: "Pet owners".into(),
            goal: "Inform".into(),
            ..FormState::default()
        })
    }

    #[test]
    fn base_url_rules() {
        assert!(validate_base_url("http://localhost:3001").is_ok());
        assert!(validate_base_url("https://articles.example.com/api").is_ok());
        assert!(matches!(
            validate_base_url("ftp://localhost"),
            Err(CompletionError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(validate_base_url("not a url"), Err(CompletionError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = CompletionClient::new("http://localhost:3001").expect("client");
        assert_eq!(client.endpoint().as_str(), "http://localhost:3001/completions");

        let client = CompletionClient::new("https://articles.example.com/api/").expect("client");
        assert_eq!(client.endpoint().as_str(), "https://articles.example.com/api/completions");

        let client = CompletionClient::new("https://articles.example.com/api").expect("client");
        assert_eq!(client.endpoint().as_str(), "https://articles.example.com/api/completions");

        let client = CompletionClient::new("http://localhost:3001/?k=v#top").expect("client");
        assert_eq!(client.endpoint().as_str(), "http://localhost:3001/completions");
    }

    #[tokio::test]
    async fn posts_message_and_reads_first_choice() {
        let seen: Arc<Mutex<Option<(Option<String>, Value)>>> = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/completions",
            post(move |headers: axum::http::HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    let content_type = headers
                        .get(axum::http::header::CONTENT_TYPE)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    *recorder.lock().expect("recorder lock") = Some((content_type, body));
                    Json(json!({"choices": [{"message": {"role": "assistant", "content": "Hello world"}}]}))
                }
            }),
        );
        let base = serve(router).await;

        let client = CompletionClient::new(&base).expect("client");
        let request = cats_request();
        let article = client.complete(&request).await.expect("completion");
        assert_eq!(article.text(), "Hello world");

        let (content_type, body) = seen.lock().expect("recorder lock").take().expect("request recorded");
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "message": request.message }));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/completions",
            post(|| async { (AxumStatus::SERVICE_UNAVAILABLE, "too busy") }),
        );
        let base = serve(router).await;

        let client = CompletionClient::new(&base).expect("client");
        match client.complete(&cats_request()).await {
            Err(CompletionError::Status { status, body }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "too busy");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn article_in_error_status_body_is_accepted() {
        let router = Router::new().route(
            "/completions",
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({"choices": [{"message": {"content": "Hello world"}}]})),
                )
            }),
        );
        let base = serve(router).await;

        let client = CompletionClient::new(&base).expect("client");
        let article = client.complete(&cats_request()).await.expect("completion");
        assert_eq!(article.text(), "Hello world");
    }

    #[tokio::test]
    async fn missing_choices_is_a_decode_error() {
        let router = Router::new().route("/completions", post(|| async { Json(json!({"error": "nope"})) }));
        let base = serve(router).await;

        let client = CompletionClient::new(&base).expect("client");
        let result = client.complete(&cats_request()).await;
        assert!(matches!(result, Err(CompletionError::Decode(_))));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let address = listener.local_addr().expect("local addr");
        drop(listener);

        let client = CompletionClient::new(&format!("http://{address}")).expect("client");
        let result = client.complete(&cats_request()).await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }

    #[test]
    fn empty_choices_are_reported() {
        assert!(matches!(
            parse_completion_body(r#"{"choices":[]}"#),
            Err(CompletionError::NoChoices)
        ));
    }
}
