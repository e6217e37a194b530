use serde::{Deserialize, Serialize};

/// Weekday initials, Monday first. Tuesday and Wednesday share "M".
pub const WEEKDAY_LETTERS: [&str; 7] = ["L", "M", "M", "J", "V", "S", "D"];

/// Day marker of the synthetic point placed before the week
pub const LEADING_SYNTHETIC_DAY: u32 = 0;
/// Day marker of the synthetic point placed after the week
pub const TRAILING_SYNTHETIC_DAY: u32 = 10;

/// Average workout duration for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub day: Option<u32>,
  /// Minutes
  pub session_length: Option<f64>,
}

impl Session {
  pub fn new(day: Option<u32>, session_length: Option<f64>) -> Self {
    Self { day, session_length }
  }
}

/// A session decorated with its positional weekday letter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LetteredSession {
  pub day: Option<u32>,
  pub session_length: Option<f64>,
  pub letter: Option<&'static str>,
}

/// Point of the padded series fed to the smoothed curve.
/// Synthetic points only anchor the curve and are never real data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaddedSession {
  pub day: Option<u32>,
  pub session_length: Option<f64>,
  pub letter: Option<&'static str>,
  pub synthetic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
  pub user_id: Option<u64>,
  pub sessions: Vec<Session>,
}

impl UserSession {
  pub fn new(user_id: Option<u64>, sessions: Vec<Session>) -> Self {
    Self { user_id, sessions }
  }

  /// Sessions with letters assigned by position, ignoring the `day` field
  pub fn sessions(&self) -> Vec<LetteredSession> {
    self
      .sessions
      .iter()
      .enumerate()
      .map(|(i, s)| LetteredSession {
        day: s.day,
        session_length: s.session_length,
        letter: WEEKDAY_LETTERS.get(i).copied(),
      })
      .collect()
  }

  pub fn durations(&self) -> Vec<Option<f64>> {
    self.sessions.iter().map(|s| s.session_length).collect()
  }

  /// Real sessions framed by two synthetic points carrying the first
  /// session's length, at days 0 and 10.
  pub fn over_sessions(&self) -> Vec<PaddedSession> {
    let lettered = self.sessions();
    let Some(first) = lettered.first() else {
      return vec![];
    };

    let synthetic = |day: u32| PaddedSession {
      day: Some(day),
      session_length: first.session_length,
      letter: None,
      synthetic: true,
    };

    let mut padded = Vec::with_capacity(lettered.len() + 2);
    padded.push(synthetic(LEADING_SYNTHETIC_DAY));
    padded.extend(lettered.iter().map(|s| PaddedSession {
      day: s.day,
      session_length: s.session_length,
      letter: s.letter,
      synthetic: false,
    }));
    padded.push(synthetic(TRAILING_SYNTHETIC_DAY));
    padded
  }
}
