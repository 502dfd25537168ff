//! Distance measurement and report formatting.
//!
//! Distances are accumulated in the document's internal unit, decimal feet,
//! and converted at the report boundary. Reports round to three decimals,
//! matching the host's measurement dialogs.

mod marker;

pub use marker::{connector, point_marker, MARKER_RADIUS};

use std::fmt;

use crate::error::{MeasureError, Result};
use crate::math::Point3;

/// Meters per internal unit (one decimal foot).
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Unit system used when presenting a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayUnit {
    /// Meters; internal values are converted on output.
    #[default]
    Metric,
    /// Decimal feet; internal values pass through unchanged.
    Imperial,
}

impl DisplayUnit {
    /// Converts a length in internal units into this display unit.
    #[must_use]
    pub fn convert(self, internal: f64) -> f64 {
        match self {
            Self::Metric => internal * METERS_PER_FOOT,
            Self::Imperial => internal,
        }
    }

    /// Short unit label used in report lines.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Metric => "m",
            Self::Imperial => "ft",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a distance measurement, already converted for display.
///
/// `total` sums the Euclidean distances between consecutive points. The
/// axis deltas compare only the first and last points, so they report the
/// net displacement of the whole run, not a per-segment accumulation.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceReport {
    /// Total polyline length in `unit`.
    pub total: f64,
    /// Absolute displacement between first and last point, per axis.
    pub axis_deltas: (f64, f64, f64),
    /// Unit the values are expressed in.
    pub unit: DisplayUnit,
}

impl fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = self.unit.label();
        writeln!(f, "Total distance: {:.3} {u}", self.total)?;
        writeln!(f, "Distance along X axis: {:.3} {u}", self.axis_deltas.0)?;
        writeln!(f, "Distance along Y axis: {:.3} {u}", self.axis_deltas.1)?;
        write!(f, "Distance along Z axis: {:.3} {u}", self.axis_deltas.2)
    }
}

/// Rounds a display value to three decimals.
fn round_display(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Accumulates the distance along a run of picked points.
pub struct AccumulateDistance {
    points: Vec<Point3>,
    unit: DisplayUnit,
}

impl AccumulateDistance {
    /// Creates a new accumulation over the given points, in pick order.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            unit: DisplayUnit::default(),
        }
    }

    /// Selects the unit system for the report.
    #[must_use]
    pub fn unit(mut self, unit: DisplayUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Executes the measurement.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points were given.
    pub fn execute(&self) -> Result<DistanceReport> {
        if self.points.len() < 2 {
            return Err(MeasureError::NotEnoughPoints {
                needed: 2,
                got: self.points.len(),
            }
            .into());
        }

        let total: f64 = self
            .points
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).norm())
            .sum();

        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        let deltas = last - first;

        Ok(DistanceReport {
            total: round_display(self.unit.convert(total)),
            axis_deltas: (
                round_display(self.unit.convert(deltas.x.abs())),
                round_display(self.unit.convert(deltas.y.abs())),
                round_display(self.unit.convert(deltas.z.abs())),
            ),
            unit: self.unit,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn two_points_give_euclidean_distance() {
        let report = AccumulateDistance::new(vec![
            Point3::origin(),
            Point3::new(3.0, 4.0, 0.0),
        ])
        .unit(DisplayUnit::Imperial)
        .execute()
        .unwrap();
        assert_relative_eq!(report.total, 5.0);
    }

    #[test]
    fn axis_deltas_compare_first_and_last_only() {
        let report = AccumulateDistance::new(vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(9.0, 9.0, 9.0),
            Point3::new(4.0, 2.0, 0.0),
        ])
        .unit(DisplayUnit::Imperial)
        .execute()
        .unwrap();
        assert!((report.axis_deltas.0 - 3.0).abs() < 1e-12);
        assert!((report.axis_deltas.1 - 1.0).abs() < 1e-12);
        assert!((report.axis_deltas.2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn accumulation_is_translation_invariant() {
        let base = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(5.0, -1.0, 2.0),
        ];
        let offset = Vector3::new(100.0, -50.0, 7.0);
        let shifted: Vec<Point3> = base.iter().map(|p| p + offset).collect();

        let a = AccumulateDistance::new(base)
            .unit(DisplayUnit::Imperial)
            .execute()
            .unwrap();
        let b = AccumulateDistance::new(shifted)
            .unit(DisplayUnit::Imperial)
            .execute()
            .unwrap();
        assert!((a.total - b.total).abs() < 1e-9);
    }

    #[test]
    fn metric_converts_feet_to_meters() {
        let report = AccumulateDistance::new(vec![
            Point3::origin(),
            Point3::new(10.0, 0.0, 0.0),
        ])
        .execute()
        .unwrap();
        assert_eq!(report.unit, DisplayUnit::Metric);
        assert_relative_eq!(report.total, 3.048);
        assert_relative_eq!(report.axis_deltas.0, 3.048);
    }

    #[test]
    fn values_round_to_three_decimals() {
        let report = AccumulateDistance::new(vec![
            Point3::origin(),
            Point3::new(1.0, 1.0, 0.0),
        ])
        .unit(DisplayUnit::Imperial)
        .execute()
        .unwrap();
        // sqrt(2) = 1.41421..., rounds to 1.414.
        assert!((report.total - 1.414).abs() < 1e-12);
    }

    #[test]
    fn report_display_lists_total_and_axes() {
        let report = DistanceReport {
            total: 3.048,
            axis_deltas: (3.048, 0.0, 0.0),
            unit: DisplayUnit::Metric,
        };
        let text = report.to_string();
        assert!(text.contains("Total distance: 3.048 m"));
        assert!(text.contains("Distance along X axis: 3.048 m"));
        assert!(text.contains("Distance along Z axis: 0.000 m"));
    }

    #[test]
    fn fewer_than_two_points_rejected() {
        assert!(AccumulateDistance::new(vec![]).execute().is_err());
        assert!(AccumulateDistance::new(vec![Point3::origin()])
            .execute()
            .is_err());
    }
}
