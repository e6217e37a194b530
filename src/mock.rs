//! Bundled stand-in for the backend
//!
//! Serves the same response shapes as the live API for two demo users, so the
//! dashboard runs without a server.

use crate::api::{ApiError, DataSource, Resource};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Users the mock knows about
pub const MOCK_USER_IDS: [u64; 2] = [12, 18];

#[derive(Debug, Clone, Copy, Default)]
pub struct MockSource;

impl MockSource {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl DataSource for MockSource {
  async fn fetch(&self, resource: Resource, user_id: u64) -> Result<Value, ApiError> {
    debug!(resource = resource.as_str(), user_id, "serving mock resource");
    let data = match resource {
      Resource::Profile => profile(user_id),
      Resource::Activity => activity(user_id),
      Resource::AverageSessions => average_sessions(user_id),
      Resource::Performance => performance(user_id),
    };
    Ok(json!({ "data": data }))
  }
}

/// ---------------------------------------------------------------------------
/// Payloads
/// ---------------------------------------------------------------------------

fn profile(user_id: u64) -> Value {
  match user_id {
    12 => json!({
      "id": 12,
      "userInfos": { "firstName": "Karl", "lastName": "Dovineau", "age": 31 },
      "todayScore": 0.12,
      "keyData": {
        "calorieCount": 1930,
        "proteinCount": 155,
        "carbohydrateCount": 290,
        "lipidCount": 50
      }
    }),
    // Older payload version: `score` instead of `todayScore`
    18 => json!({
      "id": 18,
      "userInfos": { "firstName": "Cecilia", "lastName": "Ratorez", "age": 34 },
      "score": 0.3,
      "keyData": {
        "calorieCount": 2500,
        "proteinCount": 90,
        "carbohydrateCount": 150,
        "lipidCount": 120
      }
    }),
    _ => Value::Null,
  }
}

fn activity(user_id: u64) -> Value {
  let days: &[(&str, i64, i64)] = match user_id {
    12 => &[
      ("2020-07-01", 80, 240),
      ("2020-07-02", 80, 220),
      ("2020-07-03", 81, 280),
      ("2020-07-04", 81, 290),
      ("2020-07-05", 80, 160),
      ("2020-07-06", 78, 162),
      ("2020-07-07", 76, 390),
    ],
    18 => &[
      ("2020-07-01", 70, 240),
      ("2020-07-02", 69, 220),
      ("2020-07-03", 70, 280),
      ("2020-07-04", 70, 500),
      ("2020-07-05", 69, 160),
      ("2020-07-06", 69, 162),
      ("2020-07-07", 69, 390),
    ],
    _ => return Value::Null,
  };

  let sessions: Vec<Value> = days
    .iter()
    .map(|(day, kilogram, calories)| {
      json!({ "day": day, "kilogram": kilogram, "calories": calories })
    })
    .collect();

  json!({ "userId": user_id, "sessions": sessions })
}

fn average_sessions(user_id: u64) -> Value {
  let lengths: [u32; 7] = match user_id {
    12 => [30, 23, 45, 50, 0, 0, 60],
    18 => [30, 40, 50, 30, 30, 50, 50],
    _ => return Value::Null,
  };

  let sessions: Vec<Value> = lengths
    .iter()
    .enumerate()
    .map(|(i, length)| json!({ "day": i + 1, "sessionLength": length }))
    .collect();

  json!({ "userId": user_id, "sessions": sessions })
}

fn performance(user_id: u64) -> Value {
  let values: [u32; 6] = match user_id {
    12 => [80, 120, 140, 50, 200, 90],
    18 => [200, 240, 80, 80, 220, 110],
    _ => return Value::Null,
  };

  let data: Vec<Value> = values
    .iter()
    .enumerate()
    .map(|(i, value)| json!({ "value": value, "kind": i + 1 }))
    .collect();

  json!({
    "userId": user_id,
    "kind": {
      "1": "cardio",
      "2": "energy",
      "3": "endurance",
      "4": "strength",
      "5": "speed",
      "6": "intensity"
    },
    "data": data
  })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_every_resource_is_enveloped() {
    let source = MockSource::new();
    for user_id in MOCK_USER_IDS {
      for resource in Resource::ALL {
        let body = source.fetch(resource, user_id).await.unwrap();
        assert!(body["data"].is_object(), "{:?} for {}", resource, user_id);
      }
    }
  }

  #[tokio::test]
  async fn test_unknown_user_has_no_data() {
    let source = MockSource::new();
    for resource in Resource::ALL {
      let body = source.fetch(resource, 7).await.unwrap();
      assert!(body["data"].is_null());
    }
  }

  #[tokio::test]
  async fn test_profile_score_field_drift() {
    let source = MockSource::new();
    let karl = source.fetch(Resource::Profile, 12).await.unwrap();
    let cecilia = source.fetch(Resource::Profile, 18).await.unwrap();
    assert_eq!(karl["data"]["todayScore"], 0.12);
    assert!(cecilia["data"]["todayScore"].is_null());
    assert_eq!(cecilia["data"]["score"], 0.3);
  }

  #[tokio::test]
  async fn test_week_has_seven_sessions() {
    let body = MockSource::new()
      .fetch(Resource::AverageSessions, 18)
      .await
      .unwrap();
    assert_eq!(body["data"]["sessions"].as_array().map(Vec::len), Some(7));
  }
}
