//! Ribbon curve sampling
//!
//! A Catmull-Rom spline through four control points (badge end to fixed end)
//! with chordal knot spacing: each segment's parameter span is the distance
//! between its end points, which keeps the ribbon from forming cusps or
//! overshooting when the chain bunches up.
//!
//! The curve is open, so the missing outer neighbours of the first and last
//! segments are reflected from the end points.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Knot spans shorter than this are treated as degenerate.
const MIN_KNOT_SPAN: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    /// Number of points sampled along the curve each frame
    pub points: usize,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self { points: 32 }
    }
}

/// Cubic polynomial in one coordinate: c0 + c1 t + c2 t² + c3 t³.
#[derive(Clone, Copy, Debug)]
struct Cubic {
    c0: f32,
    c1: f32,
    c2: f32,
    c3: f32,
}

impl Cubic {
    /// Hermite segment from `x0` to `x1` with end tangents `t0`, `t1`.
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Non-uniform Catmull-Rom segment between `x1` and `x2`.
    fn nonuniform_catmull_rom(
        x0: f32,
        x1: f32,
        x2: f32,
        x3: f32,
        dt0: f32,
        dt1: f32,
        dt2: f32,
    ) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        // Rescale tangents to the [0, 1] parameter of the middle span
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(&self, t: f32) -> f32 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// Chordal knot span between two points.
fn knot_span(a: Vec3, b: Vec3) -> f32 {
    a.distance_squared(b).sqrt()
}

/// Point on the chordal Catmull-Rom curve through `control` at `t` in [0, 1].
pub fn chordal_catmull_rom(control: &[Vec3; 4], t: f32) -> Vec3 {
    let last = control.len() - 1;
    let p = last as f32 * t.clamp(0.0, 1.0);
    let mut segment = p.floor() as usize;
    let mut weight = p - segment as f32;
    if segment >= last {
        segment = last - 1;
        weight = 1.0;
    }

    let p1 = control[segment];
    let p2 = control[segment + 1];
    let p0 = if segment > 0 {
        control[segment - 1]
    } else {
        2.0 * control[0] - control[1]
    };
    let p3 = if segment + 2 <= last {
        control[segment + 2]
    } else {
        2.0 * control[last] - control[last - 1]
    };

    let mut dt0 = knot_span(p0, p1);
    let mut dt1 = knot_span(p1, p2);
    let mut dt2 = knot_span(p2, p3);
    if dt1 < MIN_KNOT_SPAN {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_SPAN {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_SPAN {
        dt2 = dt1;
    }

    let axis = |a: f32, b: f32, c: f32, d: f32| {
        Cubic::nonuniform_catmull_rom(a, b, c, d, dt0, dt1, dt2).eval(weight)
    };
    Vec3::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    )
}

/// Samples the ribbon curve into a reusable buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurveSampler {
    config: RibbonConfig,
}

impl CurveSampler {
    pub fn new(config: RibbonConfig) -> Self {
        Self { config }
    }

    pub fn point_count(&self) -> usize {
        self.config.points
    }

    /// Control points in ribbon order: badge end first, fixed end last.
    pub fn control_points(j3: Vec3, j2_lerped: Vec3, j1_lerped: Vec3, anchor: Vec3) -> [Vec3; 4] {
        [j3, j2_lerped, j1_lerped, anchor]
    }

    /// Clear `out` and fill it with evenly parameterized curve samples.
    pub fn sample_into(&self, control: &[Vec3; 4], out: &mut Vec<Vec3>) {
        out.clear();
        let count = self.config.points;
        match count {
            0 => {}
            1 => out.push(control[0]),
            _ => {
                let divisions = (count - 1) as f32;
                out.extend((0..count).map(|i| chordal_catmull_rom(control, i as f32 / divisions)));
            }
        }
    }
}
