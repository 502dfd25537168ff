use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveClass, CurveDomain, TessellationParams};

/// An interpolating Catmull-Rom spline through a sequence of control points.
///
/// Each unit parameter interval `[i, i+1]` maps to the cubic segment from
/// control point `i` to control point `i+1`; tangents are derived from the
/// neighboring points. Open splines extend the end segments with reflected
/// phantom points; closed splines wrap around, and their final segment
/// returns to the first control point.
///
/// There is no closed-form arc-length parameterization, so length and
/// projection go through tessellation.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point3>,
    closed: bool,
}

impl CatmullRom {
    /// Creates an open spline through the given control points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 control points are given or two
    /// consecutive control points coincide.
    pub fn open(points: Vec<Point3>) -> Result<Self> {
        Self::build(points, false, 2)
    }

    /// Creates a closed spline through the given control points.
    ///
    /// The curve runs through every point and back to the first.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 control points are given or two
    /// consecutive control points coincide.
    pub fn closed(points: Vec<Point3>) -> Result<Self> {
        Self::build(points, true, 3)
    }

    fn build(points: Vec<Point3>, closed: bool, min_points: usize) -> Result<Self> {
        if points.len() < min_points {
            return Err(GeometryError::Degenerate(format!(
                "spline needs at least {min_points} control points, got {}",
                points.len()
            ))
            .into());
        }
        for pair in points.windows(2) {
            if (pair[1] - pair[0]).norm() < TOLERANCE {
                return Err(GeometryError::Degenerate(
                    "consecutive spline control points coincide".into(),
                )
                .into());
            }
        }
        Ok(Self { points, closed })
    }

    /// Returns the control points of the spline.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of cubic segments in the spline.
    fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Control point at (possibly out-of-range) index `i`.
    ///
    /// Closed splines wrap; open splines reflect across the end points so
    /// the end tangents follow the outermost chords.
    fn neighbor(&self, i: isize) -> Point3 {
        let n = self.points.len() as isize;
        if self.closed {
            let idx = i.rem_euclid(n) as usize;
            return self.points[idx];
        }
        if i < 0 {
            self.points[0] + (self.points[0] - self.points[1])
        } else if i >= n {
            let last = self.points[n as usize - 1];
            last + (last - self.points[n as usize - 2])
        } else {
            self.points[i as usize]
        }
    }

    /// Splits a raw parameter into a segment index and local fraction.
    fn split(&self, t: f64) -> (isize, f64) {
        let segments = self.segment_count() as f64;
        let t = t.clamp(0.0, segments);
        let mut i = t.floor();
        if i >= segments {
            i = segments - 1.0;
        }
        (i as isize, t - i)
    }

    fn eval_raw(&self, t: f64) -> Point3 {
        let (i, s) = self.split(t);
        let p0 = self.neighbor(i - 1).coords;
        let p1 = self.neighbor(i).coords;
        let p2 = self.neighbor(i + 1).coords;
        let p3 = self.neighbor(i + 2).coords;

        let c0 = p1 * 2.0;
        let c1 = p2 - p0;
        let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
        let c3 = -p0 + p1 * 3.0 - p2 * 3.0 + p3;

        Point3::from((c0 + c1 * s + c2 * (s * s) + c3 * (s * s * s)) * 0.5)
    }

    fn derivative_raw(&self, t: f64) -> Vector3 {
        let (i, s) = self.split(t);
        let p0 = self.neighbor(i - 1).coords;
        let p1 = self.neighbor(i).coords;
        let p2 = self.neighbor(i + 1).coords;
        let p3 = self.neighbor(i + 2).coords;

        let c1 = p2 - p0;
        let c2 = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
        let c3 = -p0 + p1 * 3.0 - p2 * 3.0 + p3;

        (c1 + c2 * (2.0 * s) + c3 * (3.0 * s * s)) * 0.5
    }

    /// Tessellates the spline, keeping the raw parameter of every vertex.
    ///
    /// Per-segment chord counts double until the midpoint deviation drops
    /// below the tolerance or the segment cap is reached.
    fn tessellate_with_parameters(&self, params: &TessellationParams) -> Vec<(f64, Point3)> {
        let per_segment = self.subdivisions_per_segment(params);
        let segments = self.segment_count();
        let mut out = Vec::with_capacity(segments * per_segment + 1);
        out.push((0.0, self.eval_raw(0.0)));
        for i in 0..segments {
            for j in 1..=per_segment {
                let t = i as f64 + (j as f64) / (per_segment as f64);
                out.push((t, self.eval_raw(t)));
            }
        }
        out
    }

    fn subdivisions_per_segment(&self, params: &TessellationParams) -> usize {
        let segments = self.segment_count();
        let mut k = params.min_segments.max(2);
        while k < params.max_segments {
            let mut max_dev: f64 = 0.0;
            for i in 0..segments {
                for j in 0..k {
                    let t0 = i as f64 + (j as f64) / (k as f64);
                    let t1 = i as f64 + ((j + 1) as f64) / (k as f64);
                    let p0 = self.eval_raw(t0);
                    let p1 = self.eval_raw(t1);
                    let mid = self.eval_raw((t0 + t1) / 2.0);
                    let chord_mid = Point3::from((p0.coords + p1.coords) * 0.5);
                    max_dev = max_dev.max((mid - chord_mid).norm());
                }
            }
            if max_dev <= params.tolerance {
                break;
            }
            k *= 2;
        }
        k.min(params.max_segments)
    }
}

impl Curve for CatmullRom {
    fn class(&self) -> CurveClass {
        CurveClass::General
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.eval_raw(t))
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        let d = self.derivative_raw(t);
        if d.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.segment_count() as f64)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn length(&self) -> f64 {
        let poly = self.tessellate_with_parameters(&TessellationParams::default());
        poly.windows(2).map(|w| (w[1].1 - w[0].1).norm()).sum()
    }

    fn tessellate(&self, params: &TessellationParams) -> Vec<Point3> {
        self.tessellate_with_parameters(params)
            .into_iter()
            .map(|(_, p)| p)
            .collect()
    }

    fn project(&self, point: &Point3) -> Result<f64> {
        let poly = self.tessellate_with_parameters(&TessellationParams::default());
        let mut best = 0usize;
        let mut best_dist = f64::INFINITY;
        for (i, (_, p)) in poly.iter().enumerate() {
            let d = (point - p).norm();
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }

        // Golden-section refinement around the best tessellation vertex.
        let mut lo = poly[best.saturating_sub(1)].0;
        let mut hi = poly[(best + 1).min(poly.len() - 1)].0;
        const INV_PHI: f64 = 0.618_033_988_749_894_8;
        for _ in 0..48 {
            let m1 = hi - (hi - lo) * INV_PHI;
            let m2 = lo + (hi - lo) * INV_PHI;
            let d1 = (point - self.eval_raw(m1)).norm();
            let d2 = (point - self.eval_raw(m2)).norm();
            if d1 <= d2 {
                hi = m2;
            } else {
                lo = m1;
            }
        }
        Ok((lo + hi) / 2.0)
    }
}
