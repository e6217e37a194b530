//! Radar of the six performance categories

use super::{escape, svg_open};
use crate::geometry::{closed_polygon_path, spider_angle, spider_coord, LinearScale, Point, SPIDER_OFFSET};
use crate::models::performance::PERFORMANCE_MAX;
use crate::models::Performance;
use serde::Serialize;
use std::fmt::Write;

pub const MARGIN: f64 = 40.0;
pub const SIZE: f64 = 260.0;
pub const RADIUS: f64 = 90.0;
pub const GRID_TICKS: [f64; 6] = [0.0, 50.0, 100.0, 150.0, 200.0, 250.0];

const LABEL_GAP: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarLabel {
  pub position: Point,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceChart {
  pub center: Point,
  /// One closed outline per grid tick, innermost first
  pub grid: Vec<String>,
  pub labels: Vec<RadarLabel>,
  pub vertices: Vec<Point>,
  pub polygon: String,
}

impl PerformanceChart {
  /// Coordinates are relative to `center`. `None` without any category.
  pub fn build(performance: &Performance) -> Option<Self> {
    let stats = performance.stats();
    let count = stats.len();
    if count == 0 {
      return None;
    }

    let ring = |radius: f64| -> Vec<Point> {
      (0..count)
        .map(|i| spider_coord(radius, spider_angle(i, count), SPIDER_OFFSET))
        .collect()
    };

    let grid = GRID_TICKS
      .iter()
      .map(|tick| closed_polygon_path(&ring(tick / PERFORMANCE_MAX * RADIUS)))
      .collect();

    let labels = ring(RADIUS + LABEL_GAP)
      .into_iter()
      .zip(&stats)
      .map(|(position, stat)| RadarLabel {
        position,
        text: stat.kind.unwrap_or_default().to_string(),
      })
      .collect();

    let value_scale = LinearScale::new((0.0, PERFORMANCE_MAX), (0.0, RADIUS));
    let vertices: Vec<Point> = stats
      .iter()
      .enumerate()
      .map(|(i, stat)| {
        let radius = value_scale.scale(stat.value.unwrap_or(0.0));
        spider_coord(radius, spider_angle(i, count), SPIDER_OFFSET)
      })
      .collect();

    Some(Self {
      center: Point::new(RADIUS + MARGIN, RADIUS + MARGIN),
      grid,
      labels,
      polygon: closed_polygon_path(&vertices),
      vertices,
    })
  }

  pub fn to_svg(&self) -> String {
    let mut svg = svg_open(SIZE, SIZE);
    svg.push_str(r##"<rect width="100%" height="100%" fill="#282D30" rx="5"/>"##);
    let _ = write!(
      svg,
      r#"<g transform="translate({},{})">"#,
      self.center.x, self.center.y
    );
    for ring in &self.grid {
      let _ = write!(svg, r#"<path d="{}" fill="none" stroke="white"/>"#, ring);
    }
    for label in &self.labels {
      let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" fill="white" font-size="12">{}</text>"#,
        label.position.x,
        label.position.y,
        escape(&label.text)
      );
    }
    let _ = write!(
      svg,
      r#"<path d="{}" fill="rgba(255,1,1,0.7)"/></g></svg>"#,
      self.polygon
    );
    svg
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::PerformanceData;
  use crate::test_utils::mock_performance;

  #[test]
  fn test_first_category_points_up() {
    let chart = PerformanceChart::build(&mock_performance()).unwrap();
    // Six categories: the sixth vertex lands at angle 2π + π, straight up
    let top = chart.labels[5].position;
    assert_approx_eq!(top.x, 0.0);
    assert_approx_eq!(top.y, -(RADIUS + LABEL_GAP));
    assert_eq!(chart.labels[5].text, "Intensité");
  }

  #[test]
  fn test_vertices_scale_with_value() {
    let chart = PerformanceChart::build(&mock_performance()).unwrap();
    let stats = mock_performance().stats();
    for (vertex, stat) in chart.vertices.iter().zip(&stats) {
      let distance = (vertex.x * vertex.x + vertex.y * vertex.y).sqrt();
      assert_approx_eq!(distance, stat.value.unwrap() / 250.0 * RADIUS);
    }
  }

  #[test]
  fn test_grid_rings() {
    let chart = PerformanceChart::build(&mock_performance()).unwrap();
    assert_eq!(chart.grid.len(), 6);
    // Each ring closes on its first vertex: M + 6 L segments
    assert_eq!(chart.grid[5].matches('L').count(), 6);
    assert_eq!(chart.center, Point::new(130.0, 130.0));
  }

  #[test]
  fn test_extra_entries_are_unlabelled() {
    let data = (0..7)
      .map(|i| PerformanceData::new(Some(100.0), Some(i + 1)))
      .collect();
    let chart = PerformanceChart::build(&Performance::new(data)).unwrap();
    assert_eq!(chart.vertices.len(), 7);
    assert_eq!(chart.labels[6].text, "");
  }

  #[test]
  fn test_missing_value_collapses_to_center() {
    let data = vec![
      PerformanceData::new(None, Some(1)),
      PerformanceData::new(Some(250.0), Some(2)),
    ];
    let chart = PerformanceChart::build(&Performance::new(data)).unwrap();
    assert_approx_eq!(chart.vertices[0].x, 0.0);
    assert_approx_eq!(chart.vertices[0].y, 0.0);
  }

  #[test]
  fn test_empty_performance_has_no_chart() {
    assert!(PerformanceChart::build(&Performance::new(vec![])).is_none());
  }

  #[test]
  fn test_svg() {
    let svg = PerformanceChart::build(&mock_performance()).unwrap().to_svg();
    assert_eq!(svg.matches("<path").count(), 7);
    assert!(svg.contains("Cardio"));
  }
}
