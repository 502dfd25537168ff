use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveClass, CurveDomain, TessellationParams};

/// A circular arc in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero-angle. The parametric form sweeps from `start_angle`
/// to `end_angle` (in radians) around the normal axis.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the arc plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians (must exceed the start angle)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the sweep is empty,
    /// the normal is zero-length, or the reference direction is not
    /// perpendicular to the normal.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if end_angle - start_angle < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be positive".into()).into());
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let ref_len = ref_dir.norm();
        if ref_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let ref_dir = ref_dir / ref_len;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the angular sweep of the arc in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Computes the second axis direction (perpendicular to both normal and `ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }

    /// Number of chords needed so the sagitta stays below `tolerance`.
    fn chord_count(&self, params: &TessellationParams) -> usize {
        let max_step = if params.tolerance >= self.radius {
            TAU
        } else {
            2.0 * (1.0 - params.tolerance / self.radius).acos()
        };
        let n = (self.sweep() / max_step).ceil() as usize;
        n.clamp(params.min_segments, params.max_segments)
    }
}

impl Curve for Arc {
    fn class(&self) -> CurveClass {
        CurveClass::ClosedForm
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        let binormal = self.binormal();
        let x = self.radius * t.cos();
        let y = self.radius * t.sin();
        Ok(self.center + self.ref_dir * x + binormal * y)
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        let binormal = self.binormal();
        let dx = -self.radius * t.sin();
        let dy = self.radius * t.cos();
        Ok(self.ref_dir * dx + binormal * dy)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }

    fn is_closed(&self) -> bool {
        (self.sweep() - TAU).abs() < TOLERANCE
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    fn tessellate(&self, params: &TessellationParams) -> Vec<Point3> {
        let n = self.chord_count(params);
        let mut points = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let t = self.start_angle + self.sweep() * (i as f64) / (n as f64);
            let binormal = self.binormal();
            let x = self.radius * t.cos();
            let y = self.radius * t.sin();
            points.push(self.center + self.ref_dir * x + binormal * y);
        }
        points
    }

    fn project(&self, point: &Point3) -> Result<f64> {
        let to_point = point - self.center;
        let x = to_point.dot(&self.ref_dir);
        let y = to_point.dot(&self.binormal());
        if x.abs() < TOLERANCE && y.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "point lies on the arc axis, projection is ambiguous".into(),
            )
            .into());
        }

        // Wrap the angle into one turn starting at start_angle.
        let mut angle = y.atan2(x);
        while angle < self.start_angle - TOLERANCE {
            angle += TAU;
        }
        while angle >= self.start_angle + TAU - TOLERANCE {
            angle -= TAU;
        }

        if angle <= self.end_angle + TOLERANCE {
            return Ok(angle.clamp(self.start_angle, self.end_angle));
        }

        // Outside the angular range: snap to the closer endpoint.
        let start = self.evaluate(self.start_angle)?;
        let end = self.evaluate(self.end_angle)?;
        if (point - start).norm() <= (point - end).norm() {
            Ok(self.start_angle)
        } else {
            Ok(self.end_angle)
        }
    }
}
