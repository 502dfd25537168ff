//! Best-effort placement of family instances along sampled curves.
//!
//! Placement never aborts halfway: every sample produces an outcome, and
//! rejected samples are skipped so one bad position cannot void the rest of
//! the run.

use tracing::debug;

use crate::document::{Document, FaceId, InstanceId, SymbolId};
use crate::error::{DocumentError, Result, SetoutError};
use crate::sampling::{Sample, SampleSet};

/// Result of placing one sample.
#[derive(Debug)]
pub enum PlacementOutcome {
    /// The instance was created.
    Placed(InstanceId),
    /// The sample was skipped.
    Rejected(DocumentError),
}

/// Aggregated outcomes of one placement run, in sample order.
#[derive(Debug, Default)]
pub struct PlacementSummary {
    outcomes: Vec<PlacementOutcome>,
}

impl PlacementSummary {
    /// Per-sample outcomes in curve order.
    #[must_use]
    pub fn outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    /// Number of instances created.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PlacementOutcome::Placed(_)))
            .count()
    }

    /// Number of samples skipped.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.outcomes.len() - self.placed()
    }

    /// IDs of the instances created, in sample order.
    #[must_use]
    pub fn placed_ids(&self) -> Vec<InstanceId> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PlacementOutcome::Placed(id) => Some(*id),
                PlacementOutcome::Rejected(_) => None,
            })
            .collect()
    }
}

/// Places one instance of a symbol at every sample of a curve.
///
/// Unhosted placement drops instances at the sample points with no
/// orientation. Hosted placement attaches each instance to the host face,
/// oriented along the sample tangent.
pub struct PlaceAlongCurve {
    symbol: SymbolId,
    host: Option<FaceId>,
}

impl PlaceAlongCurve {
    /// Creates a new placement operation for `symbol`.
    #[must_use]
    pub fn new(symbol: SymbolId) -> Self {
        Self { symbol, host: None }
    }

    /// Hosts every placed instance on `face`.
    #[must_use]
    pub fn hosted_on(mut self, face: FaceId) -> Self {
        self.host = Some(face);
        self
    }

    /// Executes the placement, one attempt per sample.
    ///
    /// Per-sample rejections are recorded and skipped; the operation only
    /// fails when the symbol or host face does not exist at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol or host face is missing from the
    /// document.
    pub fn execute(&self, samples: &SampleSet, doc: &mut Document) -> Result<PlacementSummary> {
        doc.symbol(self.symbol)?;
        if let Some(face) = self.host {
            doc.face(face)?;
        }

        let mut summary = PlacementSummary::default();
        for sample in samples {
            match self.place_one(sample, doc) {
                Ok(id) => summary.outcomes.push(PlacementOutcome::Placed(id)),
                Err(SetoutError::Document(err)) => {
                    debug!(
                        parameter = sample.parameter,
                        %err,
                        "skipping sample"
                    );
                    summary.outcomes.push(PlacementOutcome::Rejected(err));
                }
                Err(other) => return Err(other),
            }
        }
        Ok(summary)
    }

    fn place_one(&self, sample: &Sample, doc: &mut Document) -> Result<InstanceId> {
        match self.host {
            Some(face) => {
                let direction = sample.tangent.ok_or_else(|| {
                    DocumentError::PlacementRejected(
                        "hosted placement needs a sample tangent".into(),
                    )
                })?;
                doc.create_hosted_instance(face, sample.point, direction, self.symbol)
            }
            None => doc.create_instance(self.symbol, sample.point),
        }
    }
}
