//! In-memory host document.
//!
//! The document is an arena of typed generational keys, one slot map per
//! entity kind. All mutations are additive, so grouped operations journal
//! the keys they create and roll back by removing them.

pub mod face;
pub mod instance;
pub mod model_curve;
pub mod symbol;

pub use face::{FaceId, HostFace, PLANAR_TOLERANCE};
pub use instance::{FamilyInstance, InstanceId};
pub use model_curve::{CurveGeometry, ModelCurve, ModelCurveId};
pub use symbol::{FamilySymbol, HostingBehavior, SymbolId};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{DocumentError, Result};
use crate::math::{Point3, Vector3};

/// Key of an entity created inside a journaled scope.
#[derive(Debug, Clone, Copy)]
enum JournalEntry {
    Instance(InstanceId),
    ModelCurve(ModelCurveId),
}

/// Central arena that owns all document entities.
///
/// Symbols and faces are library content and are never journaled;
/// instances and model curves are the products of commands and participate
/// in [`Document::transact`] and [`Document::scratch`] scopes.
#[derive(Debug, Default)]
pub struct Document {
    symbols: SlotMap<SymbolId, FamilySymbol>,
    instances: SlotMap<InstanceId, FamilyInstance>,
    model_curves: SlotMap<ModelCurveId, ModelCurve>,
    faces: SlotMap<FaceId, HostFace>,
    journal: Vec<Vec<JournalEntry>>,
}

impl Document {
    /// Creates a new, empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Symbol operations ---

    /// Inserts a family symbol and returns its ID.
    pub fn add_symbol(&mut self, symbol: FamilySymbol) -> SymbolId {
        self.symbols.insert(symbol)
    }

    /// Returns a reference to the symbol, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn symbol(&self, id: SymbolId) -> Result<&FamilySymbol> {
        self.symbols
            .get(id)
            .ok_or_else(|| DocumentError::EntityNotFound("symbol".into()).into())
    }

    // --- Face operations ---

    /// Inserts a host face and returns its ID.
    pub fn add_face(&mut self, face: HostFace) -> FaceId {
        self.faces.insert(face)
    }

    /// Returns a reference to the face, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn face(&self, id: FaceId) -> Result<&HostFace> {
        self.faces
            .get(id)
            .ok_or_else(|| DocumentError::EntityNotFound("face".into()).into())
    }

    // --- Model curve operations ---

    /// Creates a model curve element and returns its ID.
    pub fn create_model_curve(&mut self, geometry: CurveGeometry) -> ModelCurveId {
        let id = self.model_curves.insert(ModelCurve::new(geometry));
        self.record(JournalEntry::ModelCurve(id));
        id
    }

    /// Returns a reference to the model curve, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn model_curve(&self, id: ModelCurveId) -> Result<&ModelCurve> {
        self.model_curves
            .get(id)
            .ok_or_else(|| DocumentError::EntityNotFound("model curve".into()).into())
    }

    /// Number of model curve elements in the document.
    #[must_use]
    pub fn model_curve_count(&self) -> usize {
        self.model_curves.len()
    }

    // --- Instance operations ---

    /// Creates an unhosted instance of `symbol` at `position`.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol does not exist.
    pub fn create_instance(&mut self, symbol: SymbolId, position: Point3) -> Result<InstanceId> {
        self.symbol(symbol)?;
        let id = self.instances.insert(FamilyInstance {
            symbol,
            position,
            orientation: None,
            host: None,
        });
        self.record(JournalEntry::Instance(id));
        Ok(id)
    }

    /// Creates an instance of `symbol` hosted on `face` at `position`,
    /// oriented along `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or symbol does not exist, the symbol is
    /// not face-hosted, or the position lies outside the face.
    pub fn create_hosted_instance(
        &mut self,
        face: FaceId,
        position: Point3,
        direction: Vector3,
        symbol: SymbolId,
    ) -> Result<InstanceId> {
        if self.symbol(symbol)?.hosting != HostingBehavior::Face {
            return Err(DocumentError::PlacementRejected(
                "symbol is not face-hosted".into(),
            )
            .into());
        }
        if !self.face(face)?.contains(&position) {
            return Err(DocumentError::PlacementRejected(
                "position lies outside the host face".into(),
            )
            .into());
        }
        let id = self.instances.insert(FamilyInstance {
            symbol,
            position,
            orientation: Some(direction),
            host: Some(face),
        });
        self.record(JournalEntry::Instance(id));
        Ok(id)
    }

    /// Returns a reference to the instance, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn instance(&self, id: InstanceId) -> Result<&FamilyInstance> {
        self.instances
            .get(id)
            .ok_or_else(|| DocumentError::EntityNotFound("instance".into()).into())
    }

    /// Number of family instances in the document.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    // --- Journaled scopes ---

    /// Runs `f` as one all-or-nothing group.
    ///
    /// Entities created inside the closure are kept when it returns `Ok`
    /// and removed again when it returns `Err`.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f` after rolling back.
    pub fn transact<T>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.journal.push(Vec::new());
        let result = f(self);
        let frame = self.journal.pop().unwrap_or_default();
        match result {
            Ok(value) => {
                if let Some(parent) = self.journal.last_mut() {
                    parent.extend(frame);
                }
                Ok(value)
            }
            Err(err) => {
                warn!(label, entities = frame.len(), "rolling back transaction");
                self.discard(&frame);
                Err(err)
            }
        }
    }

    /// Runs `f` in a scope whose creations are always discarded.
    ///
    /// The measuring tools draw their markers and connectors inside a
    /// scratch scope so the annotation geometry never outlives the command.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`; the discard happens either way.
    pub fn scratch<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.journal.push(Vec::new());
        let result = f(self);
        let frame = self.journal.pop().unwrap_or_default();
        debug!(entities = frame.len(), "discarding scratch geometry");
        self.discard(&frame);
        result
    }

    fn record(&mut self, entry: JournalEntry) {
        if let Some(frame) = self.journal.last_mut() {
            frame.push(entry);
        }
    }

    fn discard(&mut self, frame: &[JournalEntry]) {
        for entry in frame {
            match *entry {
                JournalEntry::Instance(id) => {
                    self.instances.remove(id);
                }
                JournalEntry::ModelCurve(id) => {
                    self.model_curves.remove(id);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SetoutError;
    use crate::geometry::Segment;

    fn face_symbol(doc: &mut Document) -> SymbolId {
        doc.add_symbol(FamilySymbol::new("Anchor", HostingBehavior::Face))
    }

    fn xy_face(doc: &mut Document) -> FaceId {
        doc.add_face(
            HostFace::new(Point3::origin(), Vector3::x(), Vector3::y(), 10.0, 10.0).unwrap(),
        )
    }

    fn segment_geometry() -> CurveGeometry {
        CurveGeometry::Segment(
            Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
        )
    }

    #[test]
    fn unhosted_instance_has_no_orientation() {
        let mut doc = Document::new();
        let sym = doc.add_symbol(FamilySymbol::new("Bollard", HostingBehavior::Workplane));
        let id = doc.create_instance(sym, Point3::new(1.0, 2.0, 0.0)).unwrap();
        let inst = doc.instance(id).unwrap();
        assert!(inst.orientation.is_none());
        assert!(inst.host.is_none());
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        let mut doc = Document::new();
        let r = doc.create_instance(SymbolId::default(), Point3::origin());
        assert!(matches!(
            r,
            Err(SetoutError::Document(DocumentError::EntityNotFound(_)))
        ));
    }

    #[test]
    fn hosted_instance_records_face_and_direction() {
        let mut doc = Document::new();
        let sym = face_symbol(&mut doc);
        let face = xy_face(&mut doc);
        let id = doc
            .create_hosted_instance(face, Point3::new(3.0, 4.0, 0.0), Vector3::x(), sym)
            .unwrap();
        let inst = doc.instance(id).unwrap();
        assert_eq!(inst.host, Some(face));
        assert!((inst.orientation.unwrap() - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn hosted_placement_outside_face_rejected() {
        let mut doc = Document::new();
        let sym = face_symbol(&mut doc);
        let face = xy_face(&mut doc);
        let r = doc.create_hosted_instance(face, Point3::new(50.0, 0.0, 0.0), Vector3::x(), sym);
        assert!(matches!(
            r,
            Err(SetoutError::Document(DocumentError::PlacementRejected(_)))
        ));
        assert_eq!(doc.instance_count(), 0);
    }

    #[test]
    fn non_face_symbol_cannot_be_hosted() {
        let mut doc = Document::new();
        let sym = doc.add_symbol(FamilySymbol::new("Shelf", HostingBehavior::Wall));
        let face = xy_face(&mut doc);
        let r = doc.create_hosted_instance(face, Point3::origin(), Vector3::x(), sym);
        assert!(matches!(
            r,
            Err(SetoutError::Document(DocumentError::PlacementRejected(_)))
        ));
    }

    #[test]
    fn transact_keeps_entities_on_success() {
        let mut doc = Document::new();
        let sym = doc.add_symbol(FamilySymbol::new("Post", HostingBehavior::Workplane));
        doc.transact("place", |doc| {
            doc.create_instance(sym, Point3::origin())?;
            doc.create_instance(sym, Point3::new(1.0, 0.0, 0.0))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(doc.instance_count(), 2);
    }

    #[test]
    fn transact_rolls_back_on_error() {
        let mut doc = Document::new();
        let sym = doc.add_symbol(FamilySymbol::new("Post", HostingBehavior::Workplane));
        let r: Result<()> = doc.transact("place", |doc| {
            doc.create_instance(sym, Point3::origin())?;
            doc.create_model_curve(segment_geometry());
            Err(DocumentError::PlacementRejected("forced".into()).into())
        });
        assert!(r.is_err());
        assert_eq!(doc.instance_count(), 0);
        assert_eq!(doc.model_curve_count(), 0);
    }

    #[test]
    fn scratch_discards_even_on_success() {
        let mut doc = Document::new();
        doc.scratch(|doc| {
            doc.create_model_curve(segment_geometry());
            doc.create_model_curve(segment_geometry());
            Ok(())
        })
        .unwrap();
        assert_eq!(doc.model_curve_count(), 0);
    }

    #[test]
    fn scratch_leaves_prior_entities_alone() {
        let mut doc = Document::new();
        let keep = doc.create_model_curve(segment_geometry());
        doc.scratch(|doc| {
            doc.create_model_curve(segment_geometry());
            Ok(())
        })
        .unwrap();
        assert_eq!(doc.model_curve_count(), 1);
        assert!(doc.model_curve(keep).is_ok());
    }

    #[test]
    fn nested_transact_merges_into_outer_scratch() {
        let mut doc = Document::new();
        doc.scratch(|doc| {
            doc.transact("markers", |doc| {
                doc.create_model_curve(segment_geometry());
                Ok(())
            })
        })
        .unwrap();
        // The inner commit still belongs to the scratch scope.
        assert_eq!(doc.model_curve_count(), 0);
    }
}
