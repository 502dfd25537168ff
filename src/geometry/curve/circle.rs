use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveClass, CurveDomain, TessellationParams};

/// A full circle in 3D space.
///
/// Defined by a center, radius, normal axis, and a reference direction
/// for the zero-angle. The principal domain spans one full period
/// `[0, 2*pi]` and the curve is always closed.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `normal` - Normal vector defining the circle plane
    /// * `ref_dir` - Reference direction for angle = 0 (must be perpendicular to normal)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal is zero-length,
    /// or the reference direction is not perpendicular to the normal.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
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
        })
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the normal vector of the circle plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Computes the binormal direction (`normal x ref_dir`).
    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Circle {
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
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn length(&self) -> f64 {
        TAU * self.radius
    }

    fn tessellate(&self, params: &TessellationParams) -> Vec<Point3> {
        let max_step = if params.tolerance >= self.radius {
            TAU
        } else {
            2.0 * (1.0 - params.tolerance / self.radius).acos()
        };
        let n = ((TAU / max_step).ceil() as usize).clamp(params.min_segments, params.max_segments);
        let mut points = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let t = TAU * (i as f64) / (n as f64);
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
                "point lies on the circle axis, projection is ambiguous".into(),
            )
            .into());
        }
        let mut angle = y.atan2(x);
        if angle < 0.0 {
            angle += TAU;
        }
        Ok(angle)
    }
}
