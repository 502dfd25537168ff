slotmap::new_key_type! {
    /// Unique identifier for a family symbol in the document.
    pub struct SymbolId;
}

/// How instances of a family attach to the model.
///
/// Mirrors the host's family hosting behavior parameter. Only work-plane
/// based and face-based families can be placed along a curve; the rest
/// require a specific host element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingBehavior {
    /// No host; the instance sits on a work plane.
    Workplane,
    /// Hosted by a wall.
    Wall,
    /// Hosted by a floor.
    Floor,
    /// Hosted by a ceiling.
    Ceiling,
    /// Hosted by a roof.
    Roof,
    /// Hosted by an arbitrary planar face.
    Face,
}

impl HostingBehavior {
    /// Decodes the host's integer hosting-behavior parameter.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Workplane),
            1 => Some(Self::Wall),
            2 => Some(Self::Floor),
            3 => Some(Self::Ceiling),
            4 => Some(Self::Roof),
            5 => Some(Self::Face),
            _ => None,
        }
    }

    /// Returns whether instances of this behavior can be placed along a
    /// curve.
    #[must_use]
    pub fn placeable_along_curve(self) -> bool {
        matches!(self, Self::Workplane | Self::Face)
    }
}

/// A placeable family definition.
#[derive(Debug, Clone)]
pub struct FamilySymbol {
    /// Family and type name.
    pub name: String,
    /// Hosting behavior of instances of this symbol.
    pub hosting: HostingBehavior,
}

impl FamilySymbol {
    /// Creates a new symbol.
    #[must_use]
    pub fn new(name: impl Into<String>, hosting: HostingBehavior) -> Self {
        Self {
            name: name.into(),
            hosting,
        }
    }
}
