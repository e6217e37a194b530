//! Average session duration per weekday as a smoothed line
//!
//! The curve runs through the padded series on a wider scale shifted one step
//! to the left, so its visible ends look like they continue off-canvas.

use super::{escape, extent, svg_open, AxisTick};
use crate::geometry::{cardinal_path, LinearScale, Point, PointScale};
use crate::models::UserSession;
use serde::Serialize;
use std::fmt::Write;

pub const WIDTH: f64 = 267.0;
pub const MARGIN: f64 = 60.0;
pub const HEIGHT: f64 = WIDTH - MARGIN;

const POINT_PADDING: f64 = 0.5;
const CURVE_TENSION: f64 = 0.1;
const TOOLTIP_Y: f64 = -40.0;
const TOOLTIP_DX: f64 = 10.0;
const LAST_TOOLTIP_DX: f64 = -50.0;
const LETTER_OFFSET: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPoint {
  pub x: f64,
  pub y: f64,
  pub letter: Option<&'static str>,
  pub tooltip: String,
  pub tooltip_dx: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionChart {
  pub x_scale: PointScale,
  pub over_scale: PointScale,
  pub duration_scale: LinearScale,
  /// Horizontal shift applied to the padded curve
  pub offset: f64,
  pub curve: String,
  pub points: Vec<SessionPoint>,
  /// Weekday letters under every session, known duration or not
  pub letters: Vec<AxisTick>,
}

impl SessionChart {
  /// `None` without sessions or without a single known duration
  pub fn build(user_session: &UserSession) -> Option<Self> {
    let sessions = user_session.sessions();
    if sessions.is_empty() {
      return None;
    }
    let (lo, hi) = extent(user_session.durations())?;

    let count = sessions.len();
    let x_scale = PointScale::new(count, (0.0, WIDTH), POINT_PADDING);
    let duration_scale = LinearScale::new((lo, hi), (HEIGHT / 2.0, 0.0));

    let offset = WIDTH / count as f64;
    let padded = user_session.over_sessions();
    let over_scale = PointScale::new(padded.len(), (0.0, WIDTH + 2.0 * offset), POINT_PADDING);

    let curve_points: Vec<Point> = padded
      .iter()
      .enumerate()
      .filter_map(|(i, s)| {
        let length = s.session_length?;
        Some(Point::new(
          over_scale.position(i) - offset,
          HEIGHT / 2.0 + duration_scale.scale(length),
        ))
      })
      .collect();

    let points = sessions
      .iter()
      .enumerate()
      .filter_map(|(i, s)| {
        let length = s.session_length?;
        Some(SessionPoint {
          x: x_scale.position(i),
          y: HEIGHT / 2.0 + duration_scale.scale(length),
          letter: s.letter,
          tooltip: format!("{} min", length),
          tooltip_dx: if i + 1 == count { LAST_TOOLTIP_DX } else { TOOLTIP_DX },
        })
      })
      .collect();

    let letters = sessions
      .iter()
      .enumerate()
      .filter_map(|(i, s)| {
        s.letter.map(|letter| AxisTick {
          position: x_scale.position(i),
          label: letter.to_string(),
        })
      })
      .collect();

    Some(Self {
      x_scale,
      over_scale,
      duration_scale,
      offset,
      curve: cardinal_path(&curve_points, CURVE_TENSION),
      points,
      letters,
    })
  }

  pub fn to_svg(&self) -> String {
    let mut svg = svg_open(WIDTH, WIDTH);
    svg.push_str(r##"<rect width="100%" height="100%" fill="#FF0000" rx="5"/>"##);
    svg.push_str(
      r#"<text x="30" y="40" fill="rgba(255,255,255,0.5)">Durée moyenne des</text><text x="30" y="64" fill="rgba(255,255,255,0.5)">sessions</text>"#,
    );
    let _ = write!(
      svg,
      r#"<path d="{}" fill="none" stroke="rgba(255,255,255,0.6)" stroke-width="2"/>"#,
      self.curve
    );

    for point in &self.points {
      let _ = write!(
        svg,
        r##"<g class="session" opacity="0"><rect x="{}" y="0" width="{}" height="{}" fill="rgba(0,0,0,0.1)"/><circle cx="{x}" cy="{y}" r="4" fill="#FFF"/><g transform="translate({x},{y})"><rect x="{}" y="{}" width="40" height="25" fill="#FFF"/><text x="{}" y="{}" font-size="8">{}</text></g></g>"##,
        point.x,
        WIDTH,
        WIDTH,
        point.tooltip_dx,
        TOOLTIP_Y,
        point.tooltip_dx + 5.0,
        TOOLTIP_Y + 15.0,
        escape(&point.tooltip),
        x = point.x,
        y = point.y
      );
    }

    for letter in &self.letters {
      let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" fill="rgba(255,255,255,0.5)">{}</text>"#,
        letter.position,
        HEIGHT + LETTER_OFFSET,
        escape(&letter.label)
      );
    }

    svg.push_str("</svg>");
    svg
  }
}
