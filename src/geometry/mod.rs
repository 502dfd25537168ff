pub mod curve;

pub use curve::{
    Arc, CatmullRom, Circle, Curve, CurveClass, CurveDomain, Segment, TessellationParams,
};
