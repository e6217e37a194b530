pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod geometry;
pub mod logging;
pub mod mock;
pub mod models;
pub mod payload;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, DataSource, HttpSource, Resource};
pub use config::{ConfigError, DashboardConfig, SourceConfig};
pub use dashboard::{Dashboard, DashboardView, Page, Route, ViewState};
pub use mock::{MockSource, MOCK_USER_IDS};
pub use service::{ServiceError, UserData, UserService};

use std::sync::Arc;
use tracing::info;

/// Open the page at `path` with the data source chosen by the environment.
pub async fn run(path: &str) -> Result<Page, ConfigError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init();

  let config = DashboardConfig::from_env()?;
  info!(mock = config.is_mock(), "data source selected");

  let service = Arc::new(UserService::from_config(&config));
  Ok(dashboard::open(service, &MOCK_USER_IDS, path).await)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[tokio::test]
  #[serial]
  async fn test_run_defaults_to_mock_data() {
    let page = temp_env::async_with_vars(
      [("SPORTSEE_USE_API", None::<&str>), ("SPORTSEE_API_URL", None)],
      run("/user/12"),
    )
    .await
    .unwrap();

    match page {
      Page::Dashboard {
        view: ViewState::Ready(dashboard),
        ..
      } => assert_eq!(dashboard.first_name.as_deref(), Some("Karl")),
      other => panic!("unexpected page {:?}", other),
    }
  }

  #[tokio::test]
  #[serial]
  async fn test_run_rejects_bad_config() {
    let result = temp_env::async_with_vars(
      [("SPORTSEE_USE_API", Some("sometimes"))],
      run("/"),
    )
    .await;
    assert!(matches!(result, Err(ConfigError::InvalidFlag { .. })));
  }
}
