use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveClass, CurveDomain, TessellationParams};

/// A bounded straight line between two points.
///
/// The parametric form is `P(t) = start + t * (end - start)` over the
/// domain `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a new segment from its two endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("segment endpoints coincide".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point of the segment.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point of the segment.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        let d = self.end - self.start;
        d / d.norm()
    }
}

impl Curve for Segment {
    fn class(&self) -> CurveClass {
        CurveClass::ClosedForm
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.start + (self.end - self.start) * t)
    }

    fn derivative(&self, _t: f64) -> Result<Vector3> {
        Ok(self.end - self.start)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn tessellate(&self, _params: &TessellationParams) -> Vec<Point3> {
        vec![self.start, self.end]
    }

    fn project(&self, point: &Point3) -> Result<f64> {
        let dir = self.end - self.start;
        let len_sq = dir.norm_squared();
        let t = (point - self.start).dot(&dir) / len_sq;
        Ok(t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn x_axis_segment(len: f64) -> Segment {
        Segment::new(Point3::origin(), Point3::new(len, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn evaluate_midpoint() {
        let s = x_axis_segment(10.0);
        let p = s.evaluate(0.5).unwrap();
        assert!((p - Point3::new(5.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn length_3_4_5() {
        let s = Segment::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0)).unwrap();
        assert!((s.length() - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn derivative_is_chord() {
        let s = x_axis_segment(4.0);
        let d = s.derivative(0.3).unwrap();
        assert!((d - Vector3::new(4.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn project_clamps_to_domain() {
        let s = x_axis_segment(2.0);
        let t = s.project(&Point3::new(-1.0, 1.0, 0.0)).unwrap();
        assert!(t.abs() < TOLERANCE);
        let t = s.project(&Point3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((t - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn project_interior_point() {
        let s = x_axis_segment(2.0);
        let t = s.project(&Point3::new(1.0, 3.0, 0.0)).unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn degenerate_segment_rejected() {
        let r = Segment::new(Point3::origin(), Point3::origin());
        assert!(r.is_err());
    }
}
