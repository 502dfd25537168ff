use tracing::{debug, warn};

use crate::document::{Document, HostingBehavior};
use crate::error::Result;
use crate::placement::PlaceAlongCurve;
use crate::sampling::SampleCurve;

use super::{
    CommandOutcome, CurveElementFilter, Element, FamilyInstanceFilter, Interactor, Pick,
};

/// Places copies of a family evenly along a selected curve.
///
/// The user picks an existing instance to take the symbol from, a host
/// face when the family is face based, the curve to follow, and the number
/// of divisions. Placement is committed as one group; samples the host
/// rejects are skipped without voiding the rest.
pub struct PlaceFamilyAlongCurve;

impl PlaceFamilyAlongCurve {
    /// Creates the command.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the command against the host UI.
    pub fn execute(&self, ui: &mut dyn Interactor, doc: &mut Document) -> CommandOutcome {
        self.run(ui, doc).unwrap_or(CommandOutcome::Cancelled)
    }

    fn run(&self, ui: &mut dyn Interactor, doc: &mut Document) -> Result<CommandOutcome> {
        let element = match ui.pick_element(
            "Select a family instance to place along a curve",
            &FamilyInstanceFilter,
        ) {
            Pick::Picked(e) => e,
            Pick::Cancelled => return Ok(CommandOutcome::Cancelled),
        };
        let Element::FamilyInstance(instance) = element else {
            ui.show_report(
                "Invalid selection",
                "The selected element is not a family instance.",
            );
            return Ok(CommandOutcome::Failed);
        };

        let symbol = doc.instance(instance)?.symbol;
        let hosting = doc.symbol(symbol)?.hosting;
        if !hosting.placeable_along_curve() {
            warn!(?hosting, "family cannot be placed along a curve");
            ui.show_report(
                "Cannot place family",
                "Only work-plane based and face based families can be placed along a curve.",
            );
            return Ok(CommandOutcome::Failed);
        }

        let host = if hosting == HostingBehavior::Face {
            match ui.pick_face("Select the face to host the new instances") {
                Pick::Picked(f) => Some(f),
                Pick::Cancelled => return Ok(CommandOutcome::Cancelled),
            }
        } else {
            None
        };

        let element = match ui.pick_element("Select the curve to place along", &CurveElementFilter)
        {
            Pick::Picked(e) => e,
            Pick::Cancelled => return Ok(CommandOutcome::Cancelled),
        };
        let Element::ModelCurve(curve) = element else {
            ui.show_report("Invalid selection", "The selected element is not a curve.");
            return Ok(CommandOutcome::Failed);
        };
        let geometry = doc.model_curve(curve)?.geometry.clone();

        let divisions = ui.division_count().clamp(1, 999);
        let mut sampler = SampleCurve::new(divisions);
        if host.is_some() {
            sampler = sampler.with_tangents();
        }
        let samples = sampler.execute(geometry.as_curve())?;

        let mut placement = PlaceAlongCurve::new(symbol);
        if let Some(face) = host {
            placement = placement.hosted_on(face);
        }
        let summary = doc.transact("Place family along curve", |doc| {
            placement.execute(&samples, doc)
        })?;
        debug!(
            placed = summary.placed(),
            rejected = summary.rejected(),
            "placement finished"
        );
        Ok(CommandOutcome::Succeeded)
    }
}

impl Default for PlaceFamilyAlongCurve {
    fn default() -> Self {
        Self::new()
    }
}
