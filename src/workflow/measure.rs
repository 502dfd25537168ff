use tracing::debug;

use crate::document::{CurveGeometry, Document};
use crate::error::Result;
use crate::math::Point3;
use crate::measure::{connector, point_marker, AccumulateDistance, DisplayUnit, MARKER_RADIUS};

use super::{CommandOutcome, Interactor, Pick};

/// Draws the three-circle marker for one picked point as one group.
fn draw_marker(doc: &mut Document, point: Point3) -> Result<()> {
    doc.transact("point marker", |doc| {
        for circle in point_marker(point, MARKER_RADIUS)? {
            doc.create_model_curve(CurveGeometry::Circle(circle));
        }
        Ok(())
    })
}

/// Draws the connector between two consecutive picks.
///
/// A repicked point produces no connector; the distance contribution is
/// zero either way.
fn draw_connector(doc: &mut Document, from: Point3, to: Point3) {
    if let Ok(segment) = connector(from, to) {
        doc.create_model_curve(CurveGeometry::Segment(segment));
    }
}

/// Measures the distance between two picked points.
///
/// Markers and the connecting line are drawn while the command runs and
/// discarded when it ends, whatever the outcome.
pub struct MeasurePointToPoint {
    unit: DisplayUnit,
}

impl MeasurePointToPoint {
    /// Creates the command with the default unit system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            unit: DisplayUnit::default(),
        }
    }

    /// Selects the unit system for the report.
    #[must_use]
    pub fn unit(mut self, unit: DisplayUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Runs the command against the host UI.
    pub fn execute(&self, ui: &mut dyn Interactor, doc: &mut Document) -> CommandOutcome {
        doc.scratch(|doc| self.run(ui, doc))
            .unwrap_or(CommandOutcome::Cancelled)
    }

    fn run(&self, ui: &mut dyn Interactor, doc: &mut Document) -> Result<CommandOutcome> {
        let first = match ui.pick_point("Pick the first point") {
            Pick::Picked(p) => p,
            Pick::Cancelled => return Ok(CommandOutcome::Cancelled),
        };
        draw_marker(doc, first)?;

        let second = match ui.pick_point("Pick the second point") {
            Pick::Picked(p) => p,
            Pick::Cancelled => return Ok(CommandOutcome::Cancelled),
        };
        draw_marker(doc, second)?;
        draw_connector(doc, first, second);

        let report = AccumulateDistance::new(vec![first, second])
            .unit(self.unit)
            .execute()?;
        ui.show_report("Measure distance", &report.to_string());
        Ok(CommandOutcome::Succeeded)
    }
}

impl Default for MeasurePointToPoint {
    fn default() -> Self {
        Self::new()
    }
}

/// Measures the cumulative distance along a run of picked points.
///
/// Points are picked until the user cancels; cancelling ends the run, it
/// does not abort the command. With fewer than two points there is nothing
/// to report and the command still succeeds.
pub struct MeasureMultiplePoints {
    unit: DisplayUnit,
}

impl MeasureMultiplePoints {
    /// Creates the command with the default unit system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            unit: DisplayUnit::default(),
        }
    }

    /// Selects the unit system for the report.
    #[must_use]
    pub fn unit(mut self, unit: DisplayUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Runs the command against the host UI.
    pub fn execute(&self, ui: &mut dyn Interactor, doc: &mut Document) -> CommandOutcome {
        doc.scratch(|doc| self.run(ui, doc))
            .unwrap_or(CommandOutcome::Cancelled)
    }

    fn run(&self, ui: &mut dyn Interactor, doc: &mut Document) -> Result<CommandOutcome> {
        let mut points: Vec<Point3> = Vec::new();
        loop {
            let prompt = if points.is_empty() {
                "Pick the first point"
            } else {
                "Pick the next point, or cancel to finish"
            };
            let point = match ui.pick_point(prompt) {
                Pick::Picked(p) => p,
                Pick::Cancelled => break,
            };
            draw_marker(doc, point)?;
            if let Some(&previous) = points.last() {
                draw_connector(doc, previous, point);
            }
            points.push(point);
        }

        debug!(points = points.len(), "measuring run finished");
        if points.len() < 2 {
            return Ok(CommandOutcome::Succeeded);
        }

        let report = AccumulateDistance::new(points).unit(self.unit).execute()?;
        ui.show_report("Measure total distance", &report.to_string());
        Ok(CommandOutcome::Succeeded)
    }
}

impl Default for MeasureMultiplePoints {
    fn default() -> Self {
        Self::new()
    }
}
