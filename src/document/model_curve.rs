use crate::geometry::{Arc, CatmullRom, Circle, Curve, Segment};

slotmap::new_key_type! {
    /// Unique identifier for a model curve in the document.
    pub struct ModelCurveId;
}

/// The geometric curve carried by a model curve element.
#[derive(Debug, Clone)]
pub enum CurveGeometry {
    /// A straight segment.
    Segment(Segment),
    /// A circular arc.
    Arc(Arc),
    /// A full circle.
    Circle(Circle),
    /// An interpolating spline.
    Spline(CatmullRom),
}

impl CurveGeometry {
    /// Returns the curve behind this geometry.
    #[must_use]
    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Segment(c) => c,
            Self::Arc(c) => c,
            Self::Circle(c) => c,
            Self::Spline(c) => c,
        }
    }
}

/// A curve element living in the document.
///
/// Model curves serve both as placement paths and as the temporary
/// annotation geometry drawn by the measuring tools.
#[derive(Debug, Clone)]
pub struct ModelCurve {
    /// The geometry of the element.
    pub geometry: CurveGeometry,
}

impl ModelCurve {
    /// Creates a new model curve element.
    #[must_use]
    pub fn new(geometry: CurveGeometry) -> Self {
        Self { geometry }
    }
}
