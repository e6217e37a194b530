//! Data sources for the four per-user resources
//!
//! A source returns the raw response body (`{ "data": ... }`) untouched;
//! unwrapping and normalization belong to the service layer.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// ---------------------------------------------------------------------------
/// Resources
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
  Profile,
  Activity,
  AverageSessions,
  Performance,
}

impl Resource {
  pub const ALL: [Resource; 4] = [
    Resource::Profile,
    Resource::Activity,
    Resource::AverageSessions,
    Resource::Performance,
  ];

  /// Path relative to the API base, e.g. `/user/12/activity`
  pub fn path(&self, user_id: u64) -> String {
    match self {
      Resource::Profile => format!("/user/{}", user_id),
      Resource::Activity => format!("/user/{}/activity", user_id),
      Resource::AverageSessions => format!("/user/{}/average-sessions", user_id),
      Resource::Performance => format!("/user/{}/performance", user_id),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Resource::Profile => "profile",
      Resource::Activity => "activity",
      Resource::AverageSessions => "average-sessions",
      Resource::Performance => "performance",
    }
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("API error {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Failed to decode response: {0}")]
  Decode(String),
}

impl Serialize for ApiError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Source Abstraction
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait DataSource: Send + Sync {
  /// Fetch the response body for one resource. `Value::Null` means the
  /// resource does not exist for this user.
  async fn fetch(&self, resource: Resource, user_id: u64) -> Result<Value, ApiError>;
}

/// ---------------------------------------------------------------------------
/// Live Backend
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HttpSource {
  client: Client,
  base_url: Url,
}

impl HttpSource {
  pub fn new(base_url: Url) -> Self {
    Self {
      client: Client::new(),
      base_url,
    }
  }

  fn endpoint(&self, resource: Resource, user_id: u64) -> String {
    format!(
      "{}{}",
      self.base_url.as_str().trim_end_matches('/'),
      resource.path(user_id)
    )
  }
}

#[async_trait]
impl DataSource for HttpSource {
  async fn fetch(&self, resource: Resource, user_id: u64) -> Result<Value, ApiError> {
    let url = self.endpoint(resource, user_id);
    debug!(%url, resource = resource.as_str(), "fetching resource");

    let response = self.client.get(&url).send().await?;

    // The backend answers unknown users with a plain-text 404
    if response.status() == StatusCode::NOT_FOUND {
      debug!(%url, "resource not found");
      return Ok(Value::Null);
    }

    if !response.status().is_success() {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      return Err(ApiError::Status { status, body });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
      let preview: String = text.chars().take(500).collect();
      debug!("raw response (first 500 chars): {}", preview);
      ApiError::Decode(e.to_string())
    })
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn source_for(server_url: &str) -> HttpSource {
    HttpSource::new(Url::parse(server_url).expect("mock server url"))
  }

  #[test]
  fn test_resource_paths() {
    assert_eq!(Resource::Profile.path(12), "/user/12");
    assert_eq!(Resource::Activity.path(12), "/user/12/activity");
    assert_eq!(Resource::AverageSessions.path(18), "/user/18/average-sessions");
    assert_eq!(Resource::Performance.path(18), "/user/18/performance");
  }

  #[test]
  fn test_endpoint_tolerates_trailing_slash() {
    let source = HttpSource::new(Url::parse("http://localhost:3000/").unwrap());
    assert_eq!(
      source.endpoint(Resource::Activity, 12),
      "http://localhost:3000/user/12/activity"
    );
  }

  #[tokio::test]
  async fn test_fetch_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/user/12/activity")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(json!({"data": {"userId": 12, "sessions": []}}).to_string())
      .create_async()
      .await;

    let body = source_for(&server.url())
      .fetch(Resource::Activity, 12)
      .await
      .expect("fetch should succeed");

    mock.assert_async().await;
    assert_eq!(body["data"]["userId"], 12);
  }

  #[tokio::test]
  async fn test_fetch_not_found_is_null() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/user/99")
      .with_status(404)
      .with_body("can not get user")
      .create_async()
      .await;

    let body = source_for(&server.url()).fetch(Resource::Profile, 99).await.unwrap();
    assert!(body.is_null());
  }

  #[tokio::test]
  async fn test_fetch_server_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/user/12/performance")
      .with_status(500)
      .with_body("boom")
      .create_async()
      .await;

    let err = source_for(&server.url())
      .fetch(Resource::Performance, 12)
      .await
      .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "API error 500: boom");
  }

  #[tokio::test]
  async fn test_fetch_malformed_json() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/user/12/average-sessions")
      .with_status(200)
      .with_body("{not json")
      .create_async()
      .await;

    let err = source_for(&server.url())
      .fetch(Resource::AverageSessions, 12)
      .await
      .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
  }
}
