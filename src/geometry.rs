//! Coordinate math shared by the chart builders
//!
//! Scales map data values onto pixel ranges, path builders turn point sets into
//! SVG path data. Everything here is pure and allocation-light: charts hold a
//! handful of points at most.

use serde::Serialize;
use std::f64::consts::{PI, TAU};
use std::fmt::Write;

/// Rotation applied to every radar vertex so the first category points up.
pub const SPIDER_OFFSET: f64 = PI;

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

/// ---------------------------------------------------------------------------
/// Radar Placement
/// ---------------------------------------------------------------------------

/// Place a point on a circle of `radius` at `angle + offset` (radians).
pub fn spider_coord(radius: f64, angle: f64, offset: f64) -> Point {
  Point {
    x: radius * (angle + offset).sin(),
    y: radius * (angle + offset).cos(),
  }
}

/// Angle of the `index`-th of `count` radar axes.
pub fn spider_angle(index: usize, count: usize) -> f64 {
  2.0 * PI * ((index + 1) as f64 / count as f64)
}

/// ---------------------------------------------------------------------------
/// Scales
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
  pub domain: (f64, f64),
  pub range: (f64, f64),
}

impl LinearScale {
  pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
    Self { domain, range }
  }

  pub fn scale(&self, value: f64) -> f64 {
    let (d0, d1) = self.domain;
    let (r0, r1) = self.range;
    let span = d1 - d0;
    // A collapsed domain puts every value in the middle of the range
    let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
    r0 + t * (r1 - r0)
  }

  /// Human-friendly tick values covering the domain, roughly `count` of them.
  pub fn ticks(&self, count: usize) -> Vec<f64> {
    let (mut start, mut stop) = self.domain;
    if !start.is_finite() || !stop.is_finite() || count == 0 {
      return vec![];
    }
    if start == stop {
      return vec![start];
    }

    let reverse = stop < start;
    if reverse {
      std::mem::swap(&mut start, &mut stop);
    }

    let (i1, i2, inc) = tick_spec(start, stop, count as f64);
    if i2 < i1 {
      return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks: Vec<f64> = (0..n)
      .map(|i| {
        let k = i1 + i as f64;
        if inc < 0.0 {
          k / -inc
        } else {
          k * inc
        }
      })
      .collect();

    if reverse {
      ticks.reverse();
    }
    ticks
  }
}

/// Returns `(first, last, increment)`; a negative increment means "divide by".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
  let e10 = 50f64.sqrt();
  let e5 = 10f64.sqrt();
  let e2 = 2f64.sqrt();

  let step = (stop - start) / count.max(0.0);
  let power = step.log10().floor();
  let error = step / 10f64.powi(power as i32);
  let factor = if error >= e10 {
    10.0
  } else if error >= e5 {
    5.0
  } else if error >= e2 {
    2.0
  } else {
    1.0
  };

  let (mut i1, mut i2, inc);
  if power < 0.0 {
    let div = 10f64.powi(-power as i32) / factor;
    i1 = (start * div).round();
    i2 = (stop * div).round();
    if i1 / div < start {
      i1 += 1.0;
    }
    if i2 / div > stop {
      i2 -= 1.0;
    }
    inc = -div;
  } else {
    inc = 10f64.powi(power as i32) * factor;
    i1 = (start / inc).round();
    i2 = (stop / inc).round();
    if i1 * inc < start {
      i1 += 1.0;
    }
    if i2 * inc > stop {
      i2 -= 1.0;
    }
  }

  if i2 < i1 && (0.5..2.0).contains(&count) {
    return tick_spec(start, stop, count * 2.0);
  }
  (i1, i2, inc)
}

/// Evenly spaced bands for a fixed number of ordinal slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandScale {
  start: f64,
  step: f64,
  bandwidth: f64,
}

impl BandScale {
  /// Inner and outer padding are both `padding`, bands are centred in the range.
  pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
    Self::with_padding(count, range, padding, padding)
  }

  fn with_padding(count: usize, range: (f64, f64), inner: f64, outer: f64) -> Self {
    let (r0, r1) = range;
    let n = count as f64;
    let step = (r1 - r0) / (n - inner + outer * 2.0).max(1.0);
    let start = r0 + (r1 - r0 - step * (n - inner)) * 0.5;
    Self {
      start,
      step,
      bandwidth: step * (1.0 - inner),
    }
  }

  pub fn step(&self) -> f64 {
    self.step
  }

  pub fn bandwidth(&self) -> f64 {
    self.bandwidth
  }

  /// Left edge of the band for `index`.
  pub fn position(&self, index: usize) -> f64 {
    self.start + self.step * index as f64
  }
}

/// Points spread across the range, `padding` steps kept free at each end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointScale(BandScale);

impl PointScale {
  pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
    Self(BandScale::with_padding(count, range, 1.0, padding))
  }

  pub fn step(&self) -> f64 {
    self.0.step()
  }

  pub fn position(&self, index: usize) -> f64 {
    self.0.position(index)
  }
}

/// ---------------------------------------------------------------------------
/// Path Builders
/// ---------------------------------------------------------------------------

/// Straight segments through every point.
pub fn polyline_path(points: &[Point]) -> String {
  let mut path = String::new();
  for (i, p) in points.iter().enumerate() {
    let cmd = if i == 0 { 'M' } else { 'L' };
    let _ = write!(path, "{}{},{}", cmd, p.x, p.y);
  }
  path
}

/// Polygon outline, closed by repeating the first vertex.
pub fn closed_polygon_path(points: &[Point]) -> String {
  match points.first() {
    Some(first) => {
      let mut closed = points.to_vec();
      closed.push(*first);
      polyline_path(&closed)
    }
    None => String::new(),
  }
}

/// Cardinal spline through `points`. The end segments borrow the inner
/// neighbour for their missing one, so the curve leaves each end flat.
pub fn cardinal_path(points: &[Point], tension: f64) -> String {
  let k = (1.0 - tension) / 6.0;
  let mut path = String::new();

  match points {
    [] => return path,
    [only] => {
      let _ = write!(path, "M{},{}", only.x, only.y);
      return path;
    }
    [a, b] => {
      let _ = write!(path, "M{},{}L{},{}", a.x, a.y, b.x, b.y);
      return path;
    }
    _ => {}
  }

  let first = points[0];
  let _ = write!(path, "M{},{}", first.x, first.y);

  let mut bezier = |p0: Point, p1: Point, p2: Point, p3: Point| {
    let _ = write!(
      path,
      "C{},{},{},{},{},{}",
      p1.x + k * (p2.x - p0.x),
      p1.y + k * (p2.y - p0.y),
      p2.x + k * (p1.x - p3.x),
      p2.y + k * (p1.y - p3.y),
      p2.x,
      p2.y
    );
  };

  let last = points.len() - 1;
  for i in 0..last {
    // Mirrored neighbours flatten the tangents at both ends
    let prev = if i == 0 { points[1] } else { points[i - 1] };
    let next = if i + 1 == last { points[i] } else { points[i + 2] };
    bezier(prev, points[i], points[i + 1], next);
  }

  path
}

/// Annular sector, angles in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSpec {
  pub inner_radius: f64,
  pub outer_radius: f64,
  pub start_angle: f64,
  pub end_angle: f64,
  pub corner_radius: f64,
}

fn polar(radius: f64, angle: f64) -> Point {
  Point::new(radius * angle.sin(), -radius * angle.cos())
}

fn flag(value: bool) -> u8 {
  u8::from(value)
}

pub fn arc_path(spec: &ArcSpec) -> String {
  let ArcSpec {
    inner_radius: ri,
    outer_radius: ro,
    start_angle: a0,
    end_angle: a1,
    corner_radius,
  } = *spec;

  let da = (a1 - a0).abs();
  if ro <= EPSILON || da <= EPSILON {
    return String::new();
  }

  let cw = u8::from(a1 > a0);
  let dir = if a1 > a0 { 1.0 } else { -1.0 };
  let mut path = String::new();

  if da >= TAU - EPSILON {
    let top = polar(ro, a0);
    let bottom = polar(ro, a0 + PI);
    let _ = write!(
      path,
      "M{},{}A{},{},0,1,{},{},{}A{},{},0,1,{},{},{}",
      top.x, top.y, ro, ro, cw, bottom.x, bottom.y, ro, ro, cw, top.x, top.y
    );
    if ri > EPSILON {
      let top = polar(ri, a0);
      let bottom = polar(ri, a0 + PI);
      let ccw = 1 - cw;
      let _ = write!(
        path,
        "M{},{}A{},{},0,1,{},{},{}A{},{},0,1,{},{},{}",
        top.x, top.y, ri, ri, ccw, bottom.x, bottom.y, ri, ri, ccw, top.x, top.y
      );
    }
    path.push('Z');
    return path;
  }

  let rc = corner_radius.min((ro - ri) / 2.0).max(0.0);
  let outer_center = ro - rc;
  let inner_center = ri + rc;
  let delta_outer = if rc > EPSILON { (rc / outer_center).asin() } else { 0.0 };
  let delta_inner = if rc > EPSILON && inner_center > EPSILON {
    (rc / inner_center).asin()
  } else {
    0.0
  };

  // Too short to fit the rounded ends: fall back to square corners
  let (rc, delta_outer, delta_inner) = if 2.0 * delta_outer.max(delta_inner) >= da {
    (0.0, 0.0, 0.0)
  } else {
    (rc, delta_outer, delta_inner)
  };

  let outer_start = polar(ro, a0 + dir * delta_outer);
  let outer_end = polar(ro, a1 - dir * delta_outer);
  let outer_large = flag(da - 2.0 * delta_outer > PI);
  let _ = write!(
    path,
    "M{},{}A{},{},0,{},{},{},{}",
    outer_start.x, outer_start.y, ro, ro, outer_large, cw, outer_end.x, outer_end.y
  );

  let edge_outer = (outer_center.powi(2) - rc.powi(2)).max(0.0).sqrt();
  let edge_inner = (inner_center.powi(2) - rc.powi(2)).max(0.0).sqrt();

  if rc > 0.0 {
    let p = polar(edge_outer, a1);
    let _ = write!(path, "A{},{},0,0,{},{},{}", rc, rc, cw, p.x, p.y);
    let p = polar(edge_inner, a1);
    let _ = write!(path, "L{},{}", p.x, p.y);
  }

  if ri > EPSILON {
    let inner_end = polar(ri, a1 - dir * delta_inner);
    let inner_start = polar(ri, a0 + dir * delta_inner);
    if rc > 0.0 {
      let _ = write!(path, "A{},{},0,0,{},{},{}", rc, rc, cw, inner_end.x, inner_end.y);
    } else {
      let _ = write!(path, "L{},{}", inner_end.x, inner_end.y);
    }
    let inner_large = flag(da - 2.0 * delta_inner > PI);
    let _ = write!(
      path,
      "A{},{},0,{},{},{},{}",
      ri,
      ri,
      inner_large,
      1 - cw,
      inner_start.x,
      inner_start.y
    );
  } else {
    let _ = write!(path, "L0,0");
  }

  if rc > 0.0 {
    let p = polar(edge_inner, a0);
    let _ = write!(path, "A{},{},0,0,{},{},{}", rc, rc, cw, p.x, p.y);
    let p = polar(edge_outer, a0);
    let _ = write!(path, "L{},{}", p.x, p.y);
    let _ = write!(
      path,
      "A{},{},0,0,{},{},{}",
      rc, rc, cw, outer_start.x, outer_start.y
    );
  }

  path.push('Z');
  path
}

/// ---------------------------------------------------------------------------
/// Progress Helpers
/// ---------------------------------------------------------------------------

/// Sweep angle of a progress arc for a score in `[0, 1]`.
pub fn score_sweep(score: f64) -> f64 {
  score * TAU
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
  let t = t.clamp(0.0, 1.0) * 2.0;
  if t <= 1.0 {
    t * t * t / 2.0
  } else {
    let t = t - 2.0;
    (t * t * t + 2.0) / 2.0
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
