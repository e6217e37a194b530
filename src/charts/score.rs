//! Daily goal completion as a radial progress arc

use super::svg_open;
use crate::geometry::{arc_path, ease_cubic_in_out, score_sweep, ArcSpec, Point};
use serde::Serialize;
use std::fmt::Write;

pub const MARGIN: f64 = 40.0;
pub const SIZE: f64 = 260.0;
pub const RADIUS: f64 = 90.0;

const ARC_THICKNESS: f64 = 10.0;
const CORNER_RADIUS: f64 = 20.0;
/// Milliseconds for the arc to grow from zero to the score
pub const ANIMATION_MS: u64 = 1000;
/// Eased steps baked into the SVG animation
const ANIMATION_FRAMES: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreChart {
  pub score: f64,
  pub center: Point,
  /// Final arc, drawn counter-clockwise from 12 o'clock
  pub arc: ArcSpec,
  pub label: String,
}

impl ScoreChart {
  /// `None` for a missing, non-positive or non-finite score
  pub fn build(score: Option<f64>) -> Option<Self> {
    let score = score.filter(|s| s.is_finite() && *s > 0.0)?;

    Some(Self {
      score,
      center: Point::new(RADIUS + MARGIN, RADIUS + MARGIN),
      arc: ArcSpec {
        inner_radius: RADIUS,
        outer_radius: RADIUS + ARC_THICKNESS,
        start_angle: 0.0,
        end_angle: -score_sweep(score),
        corner_radius: CORNER_RADIUS,
      },
      label: format!("{}%", percent(score)),
    })
  }

  /// Arc at animation progress `t` in `[0, 1]`
  pub fn frame(&self, t: f64) -> ArcSpec {
    ArcSpec {
      end_angle: self.arc.end_angle * ease_cubic_in_out(t),
      ..self.arc
    }
  }

  pub fn path(&self) -> String {
    arc_path(&self.arc)
  }

  /// Path data for each animation step, first frame empty, last the full arc
  pub fn frame_paths(&self) -> Vec<String> {
    (0..=ANIMATION_FRAMES)
      .map(|i| arc_path(&self.frame(i as f64 / ANIMATION_FRAMES as f64)))
      .collect()
  }

  pub fn to_svg(&self) -> String {
    let mut svg = svg_open(SIZE, SIZE);
    svg.push_str(r##"<rect width="100%" height="100%" fill="#FBFBFB" rx="5"/>"##);
    svg.push_str(r##"<text x="30" y="40" fill="#20253A">Score</text>"##);
    let _ = write!(
      svg,
      r##"<g transform="translate({},{})"><circle r="{}" fill="#FFF"/><path d="{}" fill="#FF0000"><animate attributeName="d" dur="{}ms" calcMode="discrete" fill="freeze" values="{}"/></path>"##,
      self.center.x,
      self.center.y,
      RADIUS,
      self.path(),
      ANIMATION_MS,
      self.frame_paths().join(";")
    );
    let _ = write!(
      svg,
      r##"<text y="-10" text-anchor="middle" font-size="26" font-weight="700" fill="#282D30">{}</text><text y="20" text-anchor="middle" fill="#74798C">de votre</text><text y="44" text-anchor="middle" fill="#74798C">objectif</text></g></svg>"##,
      self.label
    );
    svg
  }
}

/// Score as a percentage, at most two decimals
fn percent(score: f64) -> f64 {
  (score * 10_000.0).round() / 100.0
}
