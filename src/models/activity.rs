use crate::payload::Scalar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the daily-activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySession {
  pub day: Option<Scalar>,
  pub kilogram: Option<Scalar>,
  pub calories: Option<Scalar>,
}

impl ActivitySession {
  pub fn new(day: Option<Scalar>, kilogram: Option<Scalar>, calories: Option<Scalar>) -> Self {
    Self {
      day,
      kilogram,
      calories,
    }
  }

  /// Calendar date when the day is an ISO `YYYY-MM-DD` string
  pub fn date(&self) -> Option<NaiveDate> {
    match &self.day {
      Some(Scalar::Text(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
      _ => None,
    }
  }

  pub fn weight(&self) -> Option<i64> {
    self.kilogram.as_ref().and_then(Scalar::parse_int)
  }

  pub fn burned_calories(&self) -> Option<i64> {
    self.calories.as_ref().and_then(Scalar::parse_int)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
  pub user_id: Option<u64>,
  /// Chronological display order
  pub sessions: Vec<ActivitySession>,
}

impl Activity {
  pub fn new(user_id: Option<u64>, sessions: Vec<ActivitySession>) -> Self {
    Self { user_id, sessions }
  }

  pub fn sessions(&self) -> &[ActivitySession] {
    &self.sessions
  }

  /// Weight per session, same length and order as `sessions`
  pub fn weights(&self) -> Vec<Option<i64>> {
    self.sessions.iter().map(ActivitySession::weight).collect()
  }

  /// Burned calories per session, same length and order as `sessions`
  pub fn calories(&self) -> Vec<Option<i64>> {
    self.sessions.iter().map(ActivitySession::burned_calories).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_activity;

  #[test]
  fn test_series_follow_session_order() {
    let activity = mock_activity();
    assert_eq!(
      activity.weights(),
      vec![80, 80, 81, 81, 80, 78, 76].into_iter().map(Some).collect::<Vec<_>>()
    );
    assert_eq!(
      activity.calories(),
      vec![240, 220, 280, 290, 160, 162, 390].into_iter().map(Some).collect::<Vec<_>>()
    );
  }

  #[test]
  fn test_series_parse_string_values() {
    let activity = Activity::new(
      Some(12),
      vec![
        ActivitySession::new(None, Some(Scalar::Text("79.6".into())), Some(Scalar::Text("300".into()))),
        ActivitySession::new(None, Some(Scalar::Text("heavy".into())), None),
      ],
    );
    assert_eq!(activity.weights(), vec![Some(79), None]);
    assert_eq!(activity.calories(), vec![Some(300), None]);
  }

  #[test]
  fn test_empty_activity_has_empty_series() {
    let activity = Activity::new(None, vec![]);
    assert!(activity.weights().is_empty());
    assert!(activity.calories().is_empty());
  }

  #[test]
  fn test_date_parses_iso_days_only() {
    let session = ActivitySession::new(Some(Scalar::Text("2020-07-01".into())), None, None);
    assert_eq!(session.date(), NaiveDate::from_ymd_opt(2020, 7, 1));

    let numeric = ActivitySession::new(Some(Scalar::Int(3)), None, None);
    assert_eq!(numeric.date(), None);
  }
}
