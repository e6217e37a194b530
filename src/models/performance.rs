use serde::{Deserialize, Serialize};

/// Category labels, attached by position
pub const PERFORMANCE_LABELS: [&str; 6] = [
  "Cardio",
  "Energie",
  "Endurance",
  "Force",
  "Vitesse",
  "Intensité",
];

/// Upper bound of the performance value scale
pub const PERFORMANCE_MAX: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceData {
  /// 0 to 250
  pub value: Option<f64>,
  /// Category index as sent by the backend
  pub kind: Option<u8>,
}

impl PerformanceData {
  pub fn new(value: Option<f64>, kind: Option<u8>) -> Self {
    Self { value, kind }
  }
}

/// A performance value with its display label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceStat {
  pub value: Option<f64>,
  pub kind: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
  pub data: Vec<PerformanceData>,
}

impl Performance {
  pub fn new(data: Vec<PerformanceData>) -> Self {
    Self { data }
  }

  /// Stats labelled in order. Short series label what they have, entries past
  /// the label table come back unlabelled.
  pub fn stats(&self) -> Vec<PerformanceStat> {
    self
      .data
      .iter()
      .enumerate()
      .map(|(i, d)| PerformanceStat {
        value: d.value,
        kind: PERFORMANCE_LABELS.get(i).copied(),
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::mock_performance;

  #[test]
  fn test_labels_attach_by_position() {
    let labels: Vec<_> = mock_performance()
      .stats()
      .iter()
      .map(|s| s.kind.unwrap_or("?"))
      .collect();
    assert_eq!(
      labels,
      vec!["Cardio", "Energie", "Endurance", "Force", "Vitesse", "Intensité"]
    );
  }

  #[test]
  fn test_labels_ignore_stored_kind() {
    let performance = Performance::new(vec![
      PerformanceData::new(Some(10.0), Some(6)),
      PerformanceData::new(Some(20.0), Some(5)),
    ]);
    let stats = performance.stats();
    assert_eq!(stats[0].kind, Some("Cardio"));
    assert_eq!(stats[1].kind, Some("Energie"));
  }

  #[test]
  fn test_short_series_labels_subset() {
    let performance = Performance::new(vec![
      PerformanceData::new(Some(80.0), Some(1)),
      PerformanceData::new(Some(120.0), Some(2)),
      PerformanceData::new(Some(140.0), Some(3)),
    ]);
    let stats = performance.stats();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[2].kind, Some("Endurance"));
    assert_eq!(stats[2].value, Some(140.0));
  }

  #[test]
  fn test_extra_entries_stay_unlabelled() {
    let data = (1..=7).map(|k| PerformanceData::new(Some(50.0), Some(k))).collect();
    let stats = Performance::new(data).stats();
    assert_eq!(stats.len(), 7);
    assert_eq!(stats[6].kind, None);
  }
}
