use serde::Serialize;
use std::env;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const USE_API_VAR: &str = "SPORTSEE_USE_API";
const API_URL_VAR: &str = "SPORTSEE_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid API url: {0}")]
  InvalidUrl(String),

  #[error("Invalid value for {key}: {value}")]
  InvalidFlag { key: String, value: String },
}

impl Serialize for ConfigError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Data Source Selection
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
  /// Bundled demo data
  Mock,
  /// SportSee backend at `base_url`
  Live { base_url: Url },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
  pub source: SourceConfig,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      source: SourceConfig::Mock,
    }
  }
}

impl DashboardConfig {
  pub fn mock() -> Self {
    Self::default()
  }

  pub fn live(base_url: &str) -> Result<Self, ConfigError> {
    let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    Ok(Self {
      source: SourceConfig::Live { base_url },
    })
  }

  /// Read `SPORTSEE_USE_API` and `SPORTSEE_API_URL`. The API is off unless
  /// explicitly enabled; the URL defaults to a local backend.
  pub fn from_env() -> Result<Self, ConfigError> {
    let use_api = match env::var(USE_API_VAR) {
      Ok(value) => parse_flag(USE_API_VAR, &value)?,
      Err(_) => false,
    };

    if !use_api {
      return Ok(Self::mock());
    }

    let base_url = env::var(API_URL_VAR)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Self::live(base_url.trim())
  }

  pub fn is_mock(&self) -> bool {
    matches!(self.source, SourceConfig::Mock)
  }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "" | "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::InvalidFlag {
      key: key.to_string(),
      value: value.to_string(),
    }),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
