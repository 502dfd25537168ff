use crate::math::{Point3, Vector3};

use super::face::FaceId;
use super::symbol::SymbolId;

slotmap::new_key_type! {
    /// Unique identifier for a family instance in the document.
    pub struct InstanceId;
}

/// A placed occurrence of a family symbol.
#[derive(Debug, Clone)]
pub struct FamilyInstance {
    /// Symbol this instance was created from.
    pub symbol: SymbolId,
    /// Location of the instance.
    pub position: Point3,
    /// Orientation direction, set for hosted placements.
    pub orientation: Option<Vector3>,
    /// Face the instance is hosted on, if any.
    pub host: Option<FaceId>,
}
