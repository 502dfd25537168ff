use super::Element;

/// Restricts what the user may select during a pick.
pub trait SelectionFilter {
    /// Returns whether `element` is a valid pick.
    fn allow(&self, element: &Element) -> bool;
}

/// Accepts curve elements only.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveElementFilter;

impl SelectionFilter for CurveElementFilter {
    fn allow(&self, element: &Element) -> bool {
        matches!(element, Element::ModelCurve(_))
    }
}

/// Accepts family instances only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FamilyInstanceFilter;

impl SelectionFilter for FamilyInstanceFilter {
    fn allow(&self, element: &Element) -> bool {
        matches!(element, Element::FamilyInstance(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{InstanceId, ModelCurveId};

    #[test]
    fn curve_filter_accepts_curves_only() {
        let f = CurveElementFilter;
        assert!(f.allow(&Element::ModelCurve(ModelCurveId::default())));
        assert!(!f.allow(&Element::FamilyInstance(InstanceId::default())));
    }

    #[test]
    fn instance_filter_accepts_instances_only() {
        let f = FamilyInstanceFilter;
        assert!(f.allow(&Element::FamilyInstance(InstanceId::default())));
        assert!(!f.allow(&Element::ModelCurve(ModelCurveId::default())));
    }
}
