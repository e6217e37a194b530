//! Chart geometry for the dashboard
//!
//! Each chart is built from one domain model and owns nothing else: building
//! twice from the same model gives the same geometry. `to_svg` serializes the
//! geometry as a standalone SVG element.

pub mod activity;
pub mod performance;
pub mod score;
pub mod session;

pub use activity::ActivityChart;
pub use performance::PerformanceChart;
pub use score::ScoreChart;
pub use session::SessionChart;

use serde::Serialize;

pub(crate) const FONT_FAMILY: &str = "Roboto";

/// A labelled tick on a chart axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
  pub position: f64,
  pub label: String,
}

/// Smallest and largest of the present values
pub(crate) fn extent<I>(values: I) -> Option<(f64, f64)>
where
  I: IntoIterator<Item = Option<f64>>,
{
  values
    .into_iter()
    .flatten()
    .filter(|v| v.is_finite())
    .fold(None, |acc, v| match acc {
      None => Some((v, v)),
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub(crate) fn svg_open(width: f64, height: f64) -> String {
  format!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="{}">"#,
    width, height, FONT_FAMILY
  )
}

pub(crate) fn escape(text: &str) -> String {
  text
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}
