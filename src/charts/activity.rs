//! Daily weight and calories as paired rounded bars

use super::{escape, extent, svg_open, AxisTick};
use crate::geometry::{BandScale, LinearScale};
use crate::models::Activity;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

pub const SVG_WIDTH: f64 = 860.0;
pub const SVG_HEIGHT: f64 = 280.0;
pub const MARGIN: f64 = 50.0;
pub const WIDTH: f64 = SVG_WIDTH - 2.0 * MARGIN;
pub const HEIGHT: f64 = SVG_HEIGHT - 2.0 * MARGIN;

const OFFSET_X: f64 = 30.0;
const BAND_PADDING: f64 = 0.01;
const BAR_WIDTH: f64 = 10.0;
const BAR_RADIUS: f64 = 5.0;
/// Bars overshoot the plot area so the rounded bottom is clipped away
const BAR_OVERSHOOT: f64 = 10.0;
const WEIGHT_PADDING: f64 = 1.0;
const CALORIE_PADDING: f64 = 50.0;
const WEIGHT_TICKS: usize = 3;
const TOOLTIP_WIDTH: f64 = 40.0;
const TOOLTIP_HEIGHT: f64 = 60.0;

const WEIGHT_COLOR: &str = "#282D30";
const CALORIE_COLOR: &str = "#E60000";
const GRID_COLOR: &str = "#DEDEDE";
const AXIS_TEXT_COLOR: &str = "#9B9EAC";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarRect {
  /// Relative to the day's band
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
  pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBars {
  /// Left edge of the day's band
  pub x: f64,
  /// Calendar day, when the session carries an ISO date
  pub date: Option<NaiveDate>,
  pub weight: Option<BarRect>,
  pub calories: Option<BarRect>,
  pub tooltip_x: f64,
  pub weight_label: String,
  pub calorie_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityChart {
  pub x_scale: BandScale,
  pub weight_scale: Option<LinearScale>,
  pub calorie_scale: Option<LinearScale>,
  pub days: Vec<DayBars>,
  pub x_ticks: Vec<AxisTick>,
  pub y_ticks: Vec<AxisTick>,
}

impl ActivityChart {
  /// `None` when there are no sessions to plot
  pub fn build(activity: &Activity) -> Option<Self> {
    let sessions = activity.sessions();
    if sessions.is_empty() {
      return None;
    }

    let weights = activity.weights();
    let calories = activity.calories();

    let x_scale = BandScale::new(sessions.len(), (0.0, WIDTH), BAND_PADDING);
    let bandwidth = x_scale.bandwidth();

    let padded_scale = |values: &[Option<i64>], pad: f64| {
      extent(values.iter().map(|v| v.map(|n| n as f64)))
        .map(|(lo, hi)| LinearScale::new((lo - pad, hi + pad), (HEIGHT, 0.0)))
    };
    let weight_scale = padded_scale(&weights[..], WEIGHT_PADDING);
    let calorie_scale = padded_scale(&calories[..], CALORIE_PADDING);

    let bar = |scale: Option<LinearScale>, value: Option<i64>, x: f64| {
      let y = scale?.scale(value? as f64);
      Some(BarRect {
        x,
        y,
        width: BAR_WIDTH,
        height: HEIGHT - y + BAR_OVERSHOOT,
        radius: BAR_RADIUS,
      })
    };

    let days = sessions
      .iter()
      .enumerate()
      .map(|(i, session)| DayBars {
        x: x_scale.position(i),
        date: session.date(),
        weight: bar(weight_scale, weights[i], bandwidth / 3.0),
        calories: bar(calorie_scale, calories[i], bandwidth * 2.0 / 3.0 - BAR_WIDTH),
        tooltip_x: bandwidth - 20.0,
        weight_label: label(session.kilogram.as_ref(), "kg"),
        calorie_label: label(session.calories.as_ref(), "kCal"),
      })
      .collect();

    let x_ticks = (0..sessions.len())
      .map(|i| AxisTick {
        position: x_scale.position(i) + bandwidth / 2.0,
        label: (i + 1).to_string(),
      })
      .collect();

    let y_ticks = weight_scale
      .map(|scale| {
        scale
          .ticks(WEIGHT_TICKS)
          .into_iter()
          .map(|t| AxisTick {
            position: scale.scale(t),
            label: t.to_string(),
          })
          .collect()
      })
      .unwrap_or_default();

    Some(Self {
      x_scale,
      weight_scale,
      calorie_scale,
      days,
      x_ticks,
      y_ticks,
    })
  }

  pub fn to_svg(&self) -> String {
    let mut svg = svg_open(SVG_WIDTH, SVG_HEIGHT);
    let _ = write!(svg, r#"<g class="activity" transform="translate({},{})">"#, OFFSET_X, MARGIN);

    let _ = write!(
      svg,
      r#"<g class="x-axis" transform="translate(0,{})"><line x1="0" x2="{}" stroke="{}"/>"#,
      HEIGHT, WIDTH, GRID_COLOR
    );
    for tick in &self.x_ticks {
      let _ = write!(
        svg,
        r#"<text x="{}" y="20" text-anchor="middle" fill="{}">{}</text>"#,
        tick.position,
        AXIS_TEXT_COLOR,
        escape(&tick.label)
      );
    }
    svg.push_str("</g>");

    let _ = write!(svg, r#"<g class="y-axis" transform="translate({},0)">"#, WIDTH);
    for tick in &self.y_ticks {
      let _ = write!(
        svg,
        r#"<line x1="{}" x2="0" y1="{y}" y2="{y}" stroke="{}" stroke-dasharray="2"/><text x="20" y="{y}" fill="{}">{}</text>"#,
        -WIDTH,
        GRID_COLOR,
        AXIS_TEXT_COLOR,
        escape(&tick.label),
        y = tick.position
      );
    }
    svg.push_str("</g>");

    let _ = write!(svg, r#"<svg width="{}" height="{}">"#, WIDTH, HEIGHT);
    let bandwidth = self.x_scale.bandwidth();
    for day in &self.days {
      let _ = write!(svg, r#"<g class="day" transform="translate({},0)">"#, day.x);
      if let Some(date) = day.date {
        let _ = write!(svg, "<title>{}</title>", date.format("%d/%m/%Y"));
      }
      for (rect, color) in [(&day.weight, WEIGHT_COLOR), (&day.calories, CALORIE_COLOR)] {
        if let Some(rect) = rect {
          let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
            rect.x, rect.y, rect.width, rect.height, rect.radius, color
          );
        }
      }
      let _ = write!(
        svg,
        r##"<g class="hover" opacity="0"><rect width="{}" height="{}" fill="#C4C4C4" fill-opacity="0.5"/>"##,
        bandwidth, HEIGHT
      );
      let _ = write!(
        svg,
        r##"<g transform="translate({},0)"><rect width="{}" height="{}" fill="{}"/><text x="20" y="20" text-anchor="middle" fill="#FFF">{}</text><text x="20" y="40" text-anchor="middle" fill="#FFF">{}</text></g></g></g>"##,
        day.tooltip_x,
        TOOLTIP_WIDTH,
        TOOLTIP_HEIGHT,
        CALORIE_COLOR,
        escape(&day.weight_label),
        escape(&day.calorie_label)
      );
    }
    svg.push_str("</svg></g></svg>");
    svg
  }
}

fn label(value: Option<&crate::payload::Scalar>, unit: &str) -> String {
  value.map(|v| format!("{}{}", v, unit)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::ActivitySession;
  use crate::payload::Scalar;
  use crate::test_utils::mock_activity;

  #[test]
  fn test_scales_are_padded() {
    let chart = ActivityChart::build(&mock_activity()).unwrap();
    assert_eq!(chart.weight_scale.unwrap().domain, (75.0, 82.0));
    assert_eq!(chart.calorie_scale.unwrap().domain, (110.0, 440.0));
    assert_eq!(chart.weight_scale.unwrap().range, (HEIGHT, 0.0));
  }

  #[test]
  fn test_bar_geometry() {
    let chart = ActivityChart::build(&mock_activity()).unwrap();
    let bandwidth = chart.x_scale.bandwidth();
    let first = &chart.days[0];

    let weight = first.weight.as_ref().unwrap();
    assert_approx_eq!(weight.x, bandwidth / 3.0);
    // 80kg on [75, 82] -> [180, 0]
    let expected_y = HEIGHT - (80.0 - 75.0) / 7.0 * HEIGHT;
    assert_approx_eq!(weight.y, expected_y);
    assert_approx_eq!(weight.height, HEIGHT - expected_y + 10.0);
    assert_eq!(weight.width, 10.0);
    assert_eq!(weight.radius, 5.0);

    let calories = first.calories.as_ref().unwrap();
    assert_approx_eq!(calories.x, bandwidth * 2.0 / 3.0 - 10.0);
    // The highest calorie day reaches within the top padding
    let peak = chart.days[6].calories.as_ref().unwrap();
    assert_approx_eq!(peak.y, 50.0 / 330.0 * HEIGHT);
  }

  #[test]
  fn test_band_layout() {
    let chart = ActivityChart::build(&mock_activity()).unwrap();
    assert_eq!(chart.days.len(), 7);
    assert_eq!(chart.x_ticks.len(), 7);
    assert_eq!(chart.x_ticks[0].label, "1");
    assert_eq!(chart.x_ticks[6].label, "7");
    let step = chart.x_scale.step();
    assert_approx_eq!(step, WIDTH / (7.0 - 0.01 + 0.02));
    assert_approx_eq!(chart.days[1].x - chart.days[0].x, step);
  }

  #[test]
  fn test_weight_ticks() {
    let chart = ActivityChart::build(&mock_activity()).unwrap();
    let labels: Vec<_> = chart.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["76", "78", "80", "82"]);
  }

  #[test]
  fn test_tooltip_labels_use_raw_values() {
    let activity = Activity::new(
      Some(12),
      vec![ActivitySession::new(
        Some(Scalar::Text("2020-07-01".into())),
        Some(Scalar::Text("80".into())),
        Some(Scalar::Int(240)),
      )],
    );
    let chart = ActivityChart::build(&activity).unwrap();
    assert_eq!(chart.days[0].weight_label, "80kg");
    assert_eq!(chart.days[0].calorie_label, "240kCal");
  }

  #[test]
  fn test_unparseable_values_drop_bars() {
    let activity = Activity::new(
      None,
      vec![
        ActivitySession::new(None, Some(Scalar::Text("heavy".into())), Some(Scalar::Int(200))),
        ActivitySession::new(None, Some(Scalar::Int(70)), None),
      ],
    );
    let chart = ActivityChart::build(&activity).unwrap();
    assert!(chart.days[0].weight.is_none());
    assert!(chart.days[0].calories.is_some());
    assert!(chart.days[1].weight.is_some());
    assert!(chart.days[1].calories.is_none());
    assert_eq!(chart.days[1].calorie_label, "");
  }

  #[test]
  fn test_days_carry_their_date() {
    let chart = ActivityChart::build(&mock_activity()).unwrap();
    assert_eq!(chart.days[0].date, NaiveDate::from_ymd_opt(2020, 7, 1));
    assert_eq!(chart.days[6].date, NaiveDate::from_ymd_opt(2020, 7, 7));
    assert!(chart.to_svg().contains("<title>07/07/2020</title>"));

    let undated = Activity::new(
      None,
      vec![ActivitySession::new(Some(Scalar::Int(1)), Some(Scalar::Int(70)), None)],
    );
    let chart = ActivityChart::build(&undated).unwrap();
    assert_eq!(chart.days[0].date, None);
    assert!(!chart.to_svg().contains("<title>"));
  }

  #[test]
  fn test_empty_activity_has_no_chart() {
    assert!(ActivityChart::build(&Activity::new(Some(12), vec![])).is_none());
  }

  #[test]
  fn test_svg_contains_every_bar() {
    let svg = ActivityChart::build(&mock_activity()).unwrap().to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches(r##"fill="#282D30""##).count(), 7);
    assert_eq!(svg.matches(r##"fill="#E60000""##).count(), 14);
    assert!(svg.contains("390kCal"));
  }
}
