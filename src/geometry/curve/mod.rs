mod arc;
mod catmull_rom;
mod circle;
mod segment;

pub use arc::Arc;
pub use catmull_rom::CatmullRom;
pub use circle::Circle;
pub use segment::Segment;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns the parameter span `t_max - t_min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Maps a normalized parameter `u` in `[0, 1]` into this domain.
    #[must_use]
    pub fn denormalize(&self, u: f64) -> f64 {
        self.t_min + u * self.span()
    }

    /// Maps a raw parameter into the normalized range `[0, 1]`.
    #[must_use]
    pub fn normalize(&self, t: f64) -> f64 {
        (t - self.t_min) / self.span()
    }

    /// Returns whether `t` lies within the domain (with tolerance).
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_min - TOLERANCE && t <= self.t_max + TOLERANCE
    }
}

/// Discriminant selecting the discretization strategy for a curve.
///
/// Closed-form curves are sampled uniformly in parameter space; general
/// curves have no closed-form arc-length parameterization and are sampled
/// by walking their tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveClass {
    /// Uniform parameter steps correspond to uniform geometry (line, arc).
    ClosedForm,
    /// Free-form curve; arc length is only available through tessellation.
    General,
}

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed deviation from the true geometry.
    pub tolerance: f64,
    /// Minimum number of segments for curves.
    pub min_segments: usize,
    /// Maximum number of segments for curves.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

/// Trait for parametric curves in 3D space.
///
/// Every curve exposes a finite principal [`CurveDomain`]. Closed curves
/// (a full circle, a closed spline) report a domain spanning exactly one
/// full period, so discretization never has to bind an open-ended domain
/// first.
pub trait Curve {
    /// Returns the discretization class of this curve.
    fn class(&self) -> CurveClass;

    /// Evaluates the curve at raw parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the first derivative at raw parameter `t`.
    ///
    /// The returned vector points along the curve direction; its magnitude
    /// depends on the parameterization and is not normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the derivative
    /// is degenerate.
    fn derivative(&self, t: f64) -> Result<Vector3>;

    /// Returns the principal parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed (end point meets start point).
    fn is_closed(&self) -> bool;

    /// Returns the total arc length of the curve over its domain.
    fn length(&self) -> f64;

    /// Approximates the curve as an ordered polyline of chord points.
    ///
    /// The first and last points coincide with the curve's start and end.
    fn tessellate(&self, params: &TessellationParams) -> Vec<Point3>;

    /// Returns the raw parameter of the point on the curve closest to
    /// `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the projection is degenerate.
    fn project(&self, point: &Point3) -> Result<f64>;

    /// Evaluates the curve at normalized parameter `u` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `u` is outside `[0, 1]` or evaluation fails.
    fn evaluate_normalized(&self, u: f64) -> Result<Point3> {
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "u",
                value: u,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        self.evaluate(self.domain().denormalize(u))
    }

    /// Computes the first derivative at normalized parameter `u`.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative is degenerate.
    fn derivative_normalized(&self, u: f64) -> Result<Vector3> {
        self.derivative(self.domain().denormalize(u))
    }

    /// Computes the unit tangent at normalized parameter `u`.
    ///
    /// # Errors
    ///
    /// Returns an error if the derivative is zero-length.
    fn tangent_normalized(&self, u: f64) -> Result<Vector3> {
        let d = self.derivative_normalized(u)?;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    /// Converts a raw parameter into the normalized range `[0, 1]`.
    fn normalized_parameter(&self, t: f64) -> f64 {
        self.domain().normalize(t)
    }
}
