//! User data service
//!
//! Fetches the four per-user resources, normalizes each payload into its
//! domain model and bundles them. A resource without `data` becomes an empty
//! slot; a transport or decoding failure fails the whole bundle.

use crate::api::{ApiError, DataSource, HttpSource, Resource};
use crate::config::{DashboardConfig, SourceConfig};
use crate::mock::MockSource;
use crate::models::{
  Activity, ActivitySession, KeyData, Performance, PerformanceData, Profile, Session, UserInfo,
  UserSession,
};
use crate::models::performance::PERFORMANCE_LABELS;
use crate::payload::{
  ActivityPayload, AverageSessionsPayload, PerformancePayload, ProfilePayload,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
  #[error(transparent)]
  Source(#[from] ApiError),

  #[error("Malformed {resource} payload: {message}")]
  Payload {
    resource: &'static str,
    message: String,
  },
}

impl Serialize for ServiceError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Aggregate
/// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one user. Each slot is `None` when the
/// backend had no data for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserData {
  pub profile: Option<Profile>,
  pub activity: Option<Activity>,
  pub sessions: Option<UserSession>,
  pub performance: Option<Performance>,
}

impl UserData {
  pub fn is_empty(&self) -> bool {
    self.profile.is_none()
      && self.activity.is_none()
      && self.sessions.is_none()
      && self.performance.is_none()
  }
}

/// ---------------------------------------------------------------------------
/// Service
/// ---------------------------------------------------------------------------

pub struct UserService {
  source: Box<dyn DataSource>,
}

impl UserService {
  pub fn new(source: Box<dyn DataSource>) -> Self {
    Self { source }
  }

  pub fn from_config(config: &DashboardConfig) -> Self {
    match &config.source {
      SourceConfig::Mock => Self::new(Box::new(MockSource::new())),
      SourceConfig::Live { base_url } => Self::new(Box::new(HttpSource::new(base_url.clone()))),
    }
  }

  /// Fetch a resource and parse its `data` member, `None` when absent
  async fn fetch_data<T: DeserializeOwned>(
    &self,
    resource: Resource,
    user_id: u64,
  ) -> Result<Option<T>, ServiceError> {
    let body = self.source.fetch(resource, user_id).await?;
    let data = match body {
      Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
      _ => Value::Null,
    };

    if data.is_null() {
      return Ok(None);
    }

    serde_json::from_value(data)
      .map(Some)
      .map_err(|e| ServiceError::Payload {
        resource: resource.as_str(),
        message: e.to_string(),
      })
  }

  pub async fn get_user_by_id(&self, user_id: u64) -> Result<Option<Profile>, ServiceError> {
    let payload: Option<ProfilePayload> = self.fetch_data(Resource::Profile, user_id).await?;
    Ok(payload.map(normalize_profile))
  }

  pub async fn get_user_activity(&self, user_id: u64) -> Result<Option<Activity>, ServiceError> {
    let payload: Option<ActivityPayload> = self.fetch_data(Resource::Activity, user_id).await?;
    Ok(payload.map(|p| {
      let sessions = p
        .sessions
        .into_iter()
        .map(|s| ActivitySession::new(s.day, s.kilogram, s.calories))
        .collect();
      Activity::new(p.user_id, sessions)
    }))
  }

  pub async fn get_user_session(&self, user_id: u64) -> Result<Option<UserSession>, ServiceError> {
    let payload: Option<AverageSessionsPayload> =
      self.fetch_data(Resource::AverageSessions, user_id).await?;
    Ok(payload.map(|p| {
      let sessions = p
        .sessions
        .into_iter()
        .map(|s| Session::new(s.day, s.session_length))
        .collect();
      UserSession::new(p.user_id, sessions)
    }))
  }

  pub async fn get_user_performance(
    &self,
    user_id: u64,
  ) -> Result<Option<Performance>, ServiceError> {
    let payload: Option<PerformancePayload> =
      self.fetch_data(Resource::Performance, user_id).await?;
    Ok(payload.map(|p| {
      let (_, data) = p.into_parts();
      if data.len() > PERFORMANCE_LABELS.len() {
        warn!(
          user_id,
          count = data.len(),
          "more performance entries than category labels"
        );
      }
      Performance::new(
        data
          .into_iter()
          .map(|d| PerformanceData::new(d.value, d.kind))
          .collect(),
      )
    }))
  }

  /// Fetch all four resources concurrently. Fails as a whole if any single
  /// retrieval fails; missing resources leave their slot empty.
  pub async fn try_fetch_user_data(&self, user_id: u64) -> Result<UserData, ServiceError> {
    let (profile, activity, sessions, performance) = tokio::try_join!(
      self.get_user_by_id(user_id),
      self.get_user_activity(user_id),
      self.get_user_session(user_id),
      self.get_user_performance(user_id)
    )?;

    Ok(UserData {
      profile,
      activity,
      sessions,
      performance,
    })
  }

  /// Like [`try_fetch_user_data`](Self::try_fetch_user_data), with the error
  /// logged and collapsed to `None`.
  pub async fn fetch_user_data(&self, user_id: u64) -> Option<UserData> {
    match self.try_fetch_user_data(user_id).await {
      Ok(data) => Some(data),
      Err(e) => {
        error!(user_id, error = %e, "failed to fetch user data");
        None
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Normalization
/// ---------------------------------------------------------------------------

fn normalize_profile(payload: ProfilePayload) -> Profile {
  // A zero `todayScore` defers to `score`, as the dashboard always did
  let today_score = payload
    .today_score
    .filter(|score| *score != 0.0)
    .or(payload.score)
    .or(payload.today_score);
  match today_score {
    None => warn!(id = ?payload.id, "profile has neither todayScore nor score"),
    Some(score) if !(0.0..=1.0).contains(&score) => {
      warn!(id = ?payload.id, score, "profile score outside [0, 1]")
    }
    Some(_) => {}
  }

  let infos = payload.user_infos.unwrap_or_default();
  let key_data = payload.key_data.unwrap_or_default();

  Profile::new(
    payload.id,
    UserInfo {
      first_name: infos.first_name,
      last_name: infos.last_name,
      age: infos.age,
    },
    KeyData {
      calorie_count: key_data.calorie_count,
      protein_count: key_data.protein_count,
      carbohydrate_count: key_data.carbohydrate_count,
      lipid_count: key_data.lipid_count,
    },
    today_score,
  )
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
