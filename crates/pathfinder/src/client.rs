//! HTTP client for the recommendation service
//!
//! Thin wrapper over `reqwest` that turns transport failures and non-2xx
//! responses into a structured [`ApiError`] instead of free-form strings, so
//! callers can categorize failures without sniffing message text.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

use crate::model::{
  CatalogStats, EmbeddingsStatus, ErrorBody, HealthStatus, InternshipCatalog, RecommendResponse,
  RecomputeSummary,
};
use crate::profile::Profile;

const RECOMMEND_ENDPOINT: &str = "/api/recommend";
const RECOMMEND_VALIDATED_ENDPOINT: &str = "/api/recommend/validated";
const STATS_ENDPOINT: &str = "/api/stats";
const INTERNSHIPS_ENDPOINT: &str = "/api/internships";
const EMBEDDINGS_STATUS_ENDPOINT: &str = "/api/embeddings/status";
const EMBEDDINGS_RECOMPUTE_ENDPOINT: &str = "/api/embeddings/recompute";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const HEALTH_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
  #[error("Could not connect to the recommendation service: {message}")]
  Connectivity { message: String },

  #[error("The recommendation service did not answer within {secs}s")]
  Timeout { secs: u64 },

  #[error("{}", status_text(.status, .detail))]
  Status { status: u16, detail: Option<String> },

  #[error("Failed to parse service response: {message}")]
  Decode { message: String },
}

fn status_text(status: &u16, detail: &Option<String>) -> String {
  match detail {
    Some(detail) => detail.clone(),
    None => format!("Server error: {status}"),
  }
}

impl ApiError {
  pub fn connectivity(message: impl Into<String>) -> Self {
    Self::Connectivity { message: message.into() }
  }

  pub fn status(status: u16, detail: Option<String>) -> Self {
    Self::Status { status, detail }
  }

  pub fn decode(message: impl Into<String>) -> Self {
    Self::Decode { message: message.into() }
  }

  /// HTTP status when the service did answer
  pub fn http_status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// The calls the orchestrator needs from the service
#[async_trait]
pub trait RecommenderApi: Send + Sync {
  async fn recommend(&self, profile: &Profile) -> Result<RecommendResponse, ApiError>;

  async fn health(&self) -> Result<HealthStatus, ApiError>;

  /// Base URL, used in connectivity messages
  fn base_url(&self) -> &str;
}

/// Configuration for the recommendation HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the service (e.g., "http://localhost:8000")
  pub base_url: String,
  /// Request timeout in seconds, applied to every call
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_BASE_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
  }
}

/// HTTP client for the recommendation REST API
pub struct RecommenderClient {
  client: Client,
  config: ClientConfig,
}

impl RecommenderClient {
  pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| ApiError::connectivity(format!("failed to create HTTP client: {e}")))?;

    let base_url = config.base_url.trim_end_matches('/').to_string();
    Ok(Self { client, config: ClientConfig { base_url, ..config } })
  }

  fn url(&self, endpoint: &str) -> String {
    format!("{}{}", self.config.base_url, endpoint)
  }

  /// Recommendation call against the validating endpoint
  pub async fn recommend_validated(
    &self,
    profile: &Profile,
    use_validation: bool,
  ) -> Result<RecommendResponse, ApiError> {
    #[derive(Serialize)]
    struct ValidatedRequest<'a> {
      #[serde(flatten)]
      profile: &'a Profile,
      use_validation: bool,
    }

    let request = ValidatedRequest { profile, use_validation };
    let builder = self.client.post(self.url(RECOMMEND_VALIDATED_ENDPOINT)).json(&request);
    self.send_json(builder, self.config.timeout_secs).await
  }

  pub async fn stats(&self) -> Result<CatalogStats, ApiError> {
    let builder = self.client.get(self.url(STATS_ENDPOINT));
    self.send_json(builder, self.config.timeout_secs).await
  }

  pub async fn internships(&self) -> Result<InternshipCatalog, ApiError> {
    let builder = self.client.get(self.url(INTERNSHIPS_ENDPOINT));
    self.send_json(builder, self.config.timeout_secs).await
  }

  pub async fn embeddings_status(&self) -> Result<EmbeddingsStatus, ApiError> {
    let builder = self.client.get(self.url(EMBEDDINGS_STATUS_ENDPOINT));
    self.send_json(builder, self.config.timeout_secs).await
  }

  pub async fn recompute_embeddings(&self) -> Result<RecomputeSummary, ApiError> {
    let builder = self.client.post(self.url(EMBEDDINGS_RECOMPUTE_ENDPOINT));
    self.send_json(builder, self.config.timeout_secs).await
  }

  async fn send_json<R>(&self, builder: RequestBuilder, timeout_secs: u64) -> Result<R, ApiError>
  where
    R: DeserializeOwned,
  {
    let response = match timeout(Duration::from_secs(timeout_secs), builder.send()).await {
      Err(_) => return Err(ApiError::Timeout { secs: timeout_secs }),
      Ok(Err(e)) if e.is_timeout() => return Err(ApiError::Timeout { secs: timeout_secs }),
      // No response obtained at all
      Ok(Err(e)) => return Err(ApiError::connectivity(e.to_string())),
      Ok(Ok(response)) => response,
    };

    let status = response.status();
    tracing::trace!(%status, url = %response.url(), "service responded");

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(error_from_body(status, &body));
    }

    let body = response.text().await.map_err(|e| ApiError::decode(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
  }
}

/// Build a status error, preferring the service's `detail` text
pub fn error_from_body(status: StatusCode, body: &str) -> ApiError {
  let detail = serde_json::from_str::<ErrorBody>(body).ok().and_then(|parsed| parsed.message());
  ApiError::status(status.as_u16(), detail)
}

#[async_trait]
impl RecommenderApi for RecommenderClient {
  async fn recommend(&self, profile: &Profile) -> Result<RecommendResponse, ApiError> {
    let builder = self.client.post(self.url(RECOMMEND_ENDPOINT)).json(profile);
    self.send_json(builder, self.config.timeout_secs).await
  }

  async fn health(&self) -> Result<HealthStatus, ApiError> {
    let builder = self.client.get(self.url("/"));
    self.send_json(builder, HEALTH_TIMEOUT_SECS.min(self.config.timeout_secs)).await
  }

  fn base_url(&self) -> &str {
    &self.config.base_url
  }
}
