//! Interactive command workflows.
//!
//! Commands run blocking, single-threaded pick loops against an
//! [`Interactor`], the host's UI shell. Cancellation is a value, not an
//! exception: every interactive step returns a [`Pick`] that the command
//! matches on, and a cancelled step unwinds the command without touching
//! the document.

mod filter;
mod measure;
mod place;

pub use filter::{CurveElementFilter, FamilyInstanceFilter, SelectionFilter};
pub use measure::{MeasureMultiplePoints, MeasurePointToPoint};
pub use place::PlaceFamilyAlongCurve;

use crate::document::{FaceId, InstanceId, ModelCurveId};
use crate::math::Point3;

/// Result of one interactive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick<T> {
    /// The user made a choice.
    Picked(T),
    /// The user cancelled the step.
    Cancelled,
}

/// A selectable element in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// A model curve element.
    ModelCurve(ModelCurveId),
    /// A placed family instance.
    FamilyInstance(InstanceId),
}

/// Terminal state of a command, reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran to completion.
    Succeeded,
    /// The user cancelled, or an unexpected error unwound the command.
    Cancelled,
    /// The command refused to run, after telling the user why.
    Failed,
}

/// The host UI shell a command talks to.
///
/// Implementations block until the user acts. `division_count` is expected
/// to clamp its answer to `[1, 999]`, defaulting to 1; commands clamp again
/// and never trust the range.
pub trait Interactor {
    /// Asks the user for a point in the model.
    fn pick_point(&mut self, prompt: &str) -> Pick<Point3>;

    /// Asks the user to select an element passing `filter`.
    fn pick_element(&mut self, prompt: &str, filter: &dyn SelectionFilter) -> Pick<Element>;

    /// Asks the user to select a host face.
    fn pick_face(&mut self, prompt: &str) -> Pick<FaceId>;

    /// Asks the user how many divisions to place.
    fn division_count(&mut self) -> usize;

    /// Shows a report dialog.
    fn show_report(&mut self, title: &str, body: &str);
}
