//! HTTP collaborator for the Thrasybulus backend.
//!
//! The synchronization engine only needs two verbs against one fixed base
//! endpoint, so the seam is a small trait. [`HttpApiClient`] implements it
//! with `reqwest`; tests substitute scripted clients.

use std::future::Future;
use std::time::Duration;

use thrasybulus_shared::errors::{ApiError, ApiResult, FrontendError, FrontendResult};
use thrasybulus_shared::{DEFAULT_HOST, DEFAULT_PORT};
use tracing::{debug, warn};

/// Abstract HTTP client used by the synchronization engine.
///
/// Both verbs return the raw response body on a 2xx status. Non-2xx statuses
/// and transport failures are mapped onto [`ApiError`].
pub trait ApiClient: Clone + Send + Sync + 'static {
    /// Issues `GET <base><path>`.
    fn get(&self, path: &str) -> impl Future<Output = ApiResult<String>> + Send;

    /// Issues `POST <base><path>` with a JSON body.
    fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = ApiResult<String>> + Send;
}

/// Base endpoint of the backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    host: String,
    port: u16,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiEndpoint {
    /// Creates an endpoint, rejecting empty hosts and port 0.
    pub fn new(host: impl Into<String>, port: u16) -> FrontendResult<Self> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
            return Err(FrontendError::InvalidHost { host });
        }
        if port == 0 {
            return Err(FrontendError::InvalidPort { port });
        }
        Ok(Self {
            host: trimmed.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL, e.g. `http://localhost:9901`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full URL for a route path such as `/interfaces`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

/// `reqwest`-backed implementation of [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    endpoint: ApiEndpoint,
}

impl HttpApiClient {
    /// Builds a client with a per-request timeout.
    pub fn new(endpoint: ApiEndpoint, timeout: Duration) -> FrontendResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FrontendError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    async fn read_body(response: reqwest::Response) -> ApiResult<String> {
        let status = response.status();
        if status.is_success() {
            return response.text().await.map_err(classify_transport_error);
        }

        // The status alone decides the classification; a lost body only
        // loses the payload.
        let body = response.text().await.unwrap_or_default();
        let message = format!("Request failed with status code {}", status.as_u16());
        let payload = Some(body).filter(|b| !b.trim().is_empty());
        if status.is_client_error() {
            Err(ApiError::BadRequest {
                status: status.as_u16(),
                message,
                payload,
            })
        } else {
            Err(ApiError::Http {
                status: status.as_u16(),
                message,
                payload,
            })
        }
    }
}

impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> ApiResult<String> {
        let url = self.endpoint.url(path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(classify_transport_error)?;
        Self::read_body(response).await
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> ApiResult<String> {
        let url = self.endpoint.url(path);
        debug!("POST {} {}", url, body);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;
        Self::read_body(response).await
    }
}

/// Maps a `reqwest` failure that produced no usable response.
///
/// Refused connections and timeouts both mean no answer arrived, so both
/// count as an unreachable backend.
fn classify_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_connect() || err.is_timeout() {
        return ApiError::Unreachable {
            message: err.to_string(),
        };
    }

    warn!("HTTP transport failure: {}", err);
    if err.is_decode() || err.is_body() {
        ApiError::Decode {
            message: err.to_string(),
        }
    } else {
        ApiError::Transport {
            message: err.to_string(),
        }
    }
}
