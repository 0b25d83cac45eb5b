//! Async HTTP client wrapping the feedback JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use feedback_api::{FeedbackRequest, FeedbackResponse};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Connection settings for the feedback API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// The four feedback endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
  Status,
  Like,
  Dislike,
  Cancel,
}

impl Endpoint {
  pub fn path(self) -> &'static str {
    match self {
      Self::Status => "/feedback/status",
      Self::Like => "/feedback/like",
      Self::Dislike => "/feedback/dislike",
      Self::Cancel => "/feedback/cancel",
    }
  }
}

/// Body the server sends alongside a 4xx/5xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the feedback API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, endpoint: Endpoint) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint.path())
  }

  /// `POST` `body` to `endpoint` and decode the summary.
  pub async fn send(
    &self,
    endpoint: Endpoint,
    body: &FeedbackRequest,
  ) -> Result<FeedbackResponse> {
    let path = endpoint.path();
    let resp = self
      .client
      .post(self.url(endpoint))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;

    let status = resp.status();
    if status == StatusCode::BAD_REQUEST {
      let body: ErrorBody = resp
        .json()
        .await
        .with_context(|| format!("POST {path} → {status}"))?;
      return Err(anyhow!("server rejected request: {}", body.error));
    }
    if !status.is_success() {
      return Err(anyhow!("POST {path} → {status}"));
    }
    resp.json().await.context("deserialising feedback response")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_base_and_path() {
    let client = ApiClient::new(ApiConfig { base_url: "http://localhost:8080/".into() }).unwrap();
    assert_eq!(client.url(Endpoint::Like), "http://localhost:8080/feedback/like");
    assert_eq!(client.url(Endpoint::Cancel), "http://localhost:8080/feedback/cancel");
  }
}
