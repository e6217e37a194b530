//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Mock model factories matching the bundled demo user 12
//! - Helper assertions for float geometry

use crate::models::{
  Activity, ActivitySession, KeyData, Performance, PerformanceData, Profile, Session, UserInfo,
  UserSession,
};
use crate::payload::Scalar;
use crate::service::UserData;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Profile of Karl, the first demo user
pub fn mock_profile() -> Profile {
  Profile::new(
    Some(12),
    UserInfo {
      first_name: Some("Karl".to_string()),
      last_name: Some("Dovineau".to_string()),
      age: Some(31),
    },
    KeyData {
      calorie_count: Some(1930),
      protein_count: Some(155),
      carbohydrate_count: Some(290),
      lipid_count: Some(50),
    },
    Some(0.12),
  )
}

/// One week of daily activity, 2020-07-01 through 2020-07-07
pub fn mock_activity() -> Activity {
  let weights = [80, 80, 81, 81, 80, 78, 76];
  let calories = [240, 220, 280, 290, 160, 162, 390];

  let sessions = weights
    .iter()
    .zip(calories.iter())
    .enumerate()
    .map(|(i, (kg, cal))| {
      ActivitySession::new(
        Some(Scalar::Text(format!("2020-07-0{}", i + 1))),
        Some(Scalar::Int(*kg)),
        Some(Scalar::Int(*cal)),
      )
    })
    .collect();

  Activity::new(Some(12), sessions)
}

/// Average session lengths for Monday through Sunday
pub fn mock_user_session() -> UserSession {
  let lengths = [30.0, 23.0, 45.0, 50.0, 0.0, 0.0, 60.0];
  let sessions = lengths
    .iter()
    .enumerate()
    .map(|(i, length)| Session::new(Some(i as u32 + 1), Some(*length)))
    .collect();
  UserSession::new(Some(12), sessions)
}

/// All six performance categories
pub fn mock_performance() -> Performance {
  let values = [80.0, 120.0, 140.0, 50.0, 200.0, 90.0];
  let data = values
    .iter()
    .enumerate()
    .map(|(i, value)| PerformanceData::new(Some(*value), Some(i as u8 + 1)))
    .collect();
  Performance::new(data)
}

/// Aggregate with every slot filled
pub fn mock_user_data() -> UserData {
  UserData {
    profile: Some(mock_profile()),
    activity: Some(mock_activity()),
    sessions: Some(mock_user_session()),
    performance: Some(mock_performance()),
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr) => {
    $crate::assert_approx_eq!($left, $right, 1e-9)
  };
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = (($left) - ($right)).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_user_data_is_complete() {
    let data = mock_user_data();
    assert!(!data.is_empty());
    assert_eq!(data.activity.map(|a| a.sessions.len()), Some(7));
    assert_eq!(data.sessions.map(|s| s.sessions.len()), Some(7));
    assert_eq!(data.performance.map(|p| p.data.len()), Some(6));
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(1.0_f64, 1.0 + 1e-12);
    assert_approx_eq!(1.0_f64, 1.05, 0.1);
  }

  #[test]
  #[should_panic(expected = "Values not approximately equal")]
  fn test_assert_approx_eq_macro_fails() {
    assert_approx_eq!(1.0_f64, 2.0, 0.1);
  }
}
