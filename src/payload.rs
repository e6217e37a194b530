//! Raw response shapes returned by the SportSee backend and the bundled mock
//!
//! Field naming drifted across backend versions, so every field is optional and
//! numbers are accepted either as JSON numbers or as strings. A scalar field
//! holding something unusable reads as absent; only a broken structure (a list
//! that is not a list) fails the payload. Normalization into the domain models
//! happens in the service layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// ---------------------------------------------------------------------------
/// Loose Scalars
/// ---------------------------------------------------------------------------

/// A value that may arrive as a number or as its string form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
  Int(i64),
  Float(f64),
  Text(String),
}

impl Scalar {
  /// Numbers and strings only, anything else is `None`
  pub fn from_json(value: &Value) -> Option<Self> {
    match value {
      Value::Number(n) => n
        .as_i64()
        .map(Scalar::Int)
        .or_else(|| n.as_f64().map(Scalar::Float)),
      Value::String(s) => Some(Scalar::Text(s.clone())),
      _ => None,
    }
  }

  /// Integer prefix of the value, `None` when there is none.
  ///
  /// Follows `parseInt`: leading whitespace and a sign are accepted, parsing
  /// stops at the first non-digit, fractions are truncated toward zero.
  pub fn parse_int(&self) -> Option<i64> {
    match self {
      Scalar::Int(n) => Some(*n),
      Scalar::Float(f) if f.is_finite() => Some(f.trunc() as i64),
      Scalar::Float(_) => None,
      Scalar::Text(s) => parse_int_prefix(s),
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Scalar::Int(n) => Some(*n as f64),
      Scalar::Float(f) => Some(*f),
      Scalar::Text(s) => s.trim().parse().ok(),
    }
  }
}

impl std::fmt::Display for Scalar {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Scalar::Int(n) => write!(f, "{}", n),
      Scalar::Float(x) => write!(f, "{}", x),
      Scalar::Text(s) => f.write_str(s),
    }
  }
}

fn parse_int_prefix(text: &str) -> Option<i64> {
  let trimmed = text.trim_start();
  let (negative, digits) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    _ => (false, trimmed),
  };

  let end = digits
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(digits.len());
  if end == 0 {
    return None;
  }

  let value: i64 = digits[..end].parse().ok()?;
  Some(if negative { -value } else { value })
}

/// ---------------------------------------------------------------------------
/// Lenient Field Readers
/// ---------------------------------------------------------------------------

fn loose_scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Scalar::from_json(&Value::deserialize(deserializer)?))
}

fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(
    loose_scalar(deserializer)?
      .and_then(|s| s.as_f64())
      .filter(|v| v.is_finite()),
  )
}

/// Non-negative whole numbers that fit `T`, `"30"` and `30.0` included
fn loose_whole<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: TryFrom<u64>,
{
  Ok(
    loose_f64(deserializer)?
      .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
      .and_then(|v| T::try_from(v as u64).ok()),
  )
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(loose_scalar(deserializer)?.map(|s| s.to_string()))
}

/// ---------------------------------------------------------------------------
/// Profile (`GET /user/{id}`)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePayload {
  #[serde(deserialize_with = "loose_whole")]
  pub id: Option<u64>,
  pub user_infos: Option<UserInfoPayload>,
  pub key_data: Option<KeyDataPayload>,
  /// Newer payloads
  #[serde(deserialize_with = "loose_f64")]
  pub today_score: Option<f64>,
  /// Older payloads
  #[serde(deserialize_with = "loose_f64")]
  pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfoPayload {
  #[serde(deserialize_with = "loose_text")]
  pub first_name: Option<String>,
  #[serde(deserialize_with = "loose_text")]
  pub last_name: Option<String>,
  #[serde(deserialize_with = "loose_whole")]
  pub age: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyDataPayload {
  #[serde(deserialize_with = "loose_whole")]
  pub calorie_count: Option<u32>,
  #[serde(deserialize_with = "loose_whole")]
  pub protein_count: Option<u32>,
  #[serde(deserialize_with = "loose_whole")]
  pub carbohydrate_count: Option<u32>,
  #[serde(deserialize_with = "loose_whole")]
  pub lipid_count: Option<u32>,
}

/// ---------------------------------------------------------------------------
/// Activity (`GET /user/{id}/activity`)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityPayload {
  #[serde(deserialize_with = "loose_whole")]
  pub user_id: Option<u64>,
  pub sessions: Vec<ActivitySessionPayload>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivitySessionPayload {
  #[serde(deserialize_with = "loose_scalar")]
  pub day: Option<Scalar>,
  #[serde(deserialize_with = "loose_scalar")]
  pub kilogram: Option<Scalar>,
  #[serde(deserialize_with = "loose_scalar")]
  pub calories: Option<Scalar>,
}

/// ---------------------------------------------------------------------------
/// Average Sessions (`GET /user/{id}/average-sessions`)
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AverageSessionsPayload {
  #[serde(deserialize_with = "loose_whole")]
  pub user_id: Option<u64>,
  pub sessions: Vec<SessionPayload>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionPayload {
  #[serde(deserialize_with = "loose_whole")]
  pub day: Option<u32>,
  #[serde(deserialize_with = "loose_f64")]
  pub session_length: Option<f64>,
}

/// ---------------------------------------------------------------------------
/// Performance (`GET /user/{id}/performance`)
/// ---------------------------------------------------------------------------

/// Either the full object (`{userId, kind, data: [...]}`) or the bare list.
/// The list is tried first: every object field is optional, so the object
/// shape would otherwise swallow a short list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PerformancePayload {
  Flat(Vec<PerformanceDataPayload>),
  Nested(PerformanceObject),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceObject {
  #[serde(deserialize_with = "loose_whole")]
  pub user_id: Option<u64>,
  /// Category names keyed by kind index (English, unused for labelling)
  pub kind: Value,
  pub data: Vec<PerformanceDataPayload>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceDataPayload {
  #[serde(deserialize_with = "loose_f64")]
  pub value: Option<f64>,
  #[serde(deserialize_with = "loose_whole")]
  pub kind: Option<u8>,
}

impl PerformancePayload {
  pub fn into_parts(self) -> (Option<u64>, Vec<PerformanceDataPayload>) {
    match self {
      PerformancePayload::Nested(obj) => (obj.user_id, obj.data),
      PerformancePayload::Flat(data) => (None, data),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
