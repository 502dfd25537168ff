//! Curve discretization.
//!
//! Turns a parametric curve into an ordered run of [`Sample`]s. Closed-form
//! curves are stepped uniformly in parameter space; general curves are walked
//! by approximate arc length over their tessellation. Both branches always
//! emit the exact parametric endpoint as the final sample.

use crate::error::{Result, SamplingError};
use crate::geometry::{Curve, CurveClass, TessellationParams};
use crate::math::{Point3, Vector3};

/// One position produced by sampling a curve.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Location of the sample in 3D space.
    pub point: Point3,
    /// Normalized curve parameter in `[0, 1]`.
    pub parameter: f64,
    /// Unit tangent at the sample, when tangents were requested.
    pub tangent: Option<Vector3>,
}

/// An immutable ordered sequence of samples along one curve.
///
/// Samples appear in increasing parameter order; on a closed curve the final
/// sample revisits the start point at parameter 1.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Returns the samples in curve order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns whether the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over the samples in curve order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Samples a curve into `divisions` evenly spaced positions.
///
/// "Evenly" means uniform parameter steps for closed-form curves and
/// approximate arc-length steps for general curves. The final sample is
/// always the exact parametric endpoint; with `divisions == 1` it is the
/// only sample.
pub struct SampleCurve {
    divisions: usize,
    with_tangents: bool,
    tessellation: TessellationParams,
}

impl SampleCurve {
    /// Creates a new sampling operation producing `divisions` positions.
    #[must_use]
    pub fn new(divisions: usize) -> Self {
        Self {
            divisions,
            with_tangents: false,
            tessellation: TessellationParams::default(),
        }
    }

    /// Requests a unit tangent at every sample.
    #[must_use]
    pub fn with_tangents(mut self) -> Self {
        self.with_tangents = true;
        self
    }

    /// Overrides the tessellation quality used for general curves.
    #[must_use]
    pub fn tessellation(mut self, params: TessellationParams) -> Self {
        self.tessellation = params;
        self
    }

    /// Executes the operation, returning the ordered sample set.
    ///
    /// # Errors
    ///
    /// Returns an error if `divisions` is zero, the curve cannot be
    /// tessellated, or evaluation fails at a sample parameter.
    pub fn execute(&self, curve: &dyn Curve) -> Result<SampleSet> {
        if self.divisions == 0 {
            return Err(SamplingError::InvalidDivisions(self.divisions).into());
        }
        let samples = match curve.class() {
            CurveClass::ClosedForm => self.sample_uniform(curve)?,
            CurveClass::General => self.sample_by_arc_length(curve)?,
        };
        Ok(SampleSet { samples })
    }

    /// Uniform parameter stepping for curves whose parameterization already
    /// tracks geometry (lines, arcs, circles).
    fn sample_uniform(&self, curve: &dyn Curve) -> Result<Vec<Sample>> {
        let mut samples = Vec::with_capacity(self.divisions);
        if self.divisions > 1 {
            let last = (self.divisions - 1) as f64;
            for i in 0..self.divisions - 1 {
                let u = (i as f64) / last;
                samples.push(self.sample_at(curve, u)?);
            }
        }
        samples.push(self.sample_at(curve, 1.0)?);
        Ok(samples)
    }

    /// Greedy arc-length walk over the tessellation for free-form curves.
    ///
    /// A closed curve gets one extra internal division so the appended
    /// endpoint, which coincides with the loop start, does not eat one of
    /// the requested positions.
    fn sample_by_arc_length(&self, curve: &dyn Curve) -> Result<Vec<Sample>> {
        let divisions = if curve.is_closed() {
            self.divisions + 1
        } else {
            self.divisions
        };
        if divisions == 1 {
            return Ok(vec![self.sample_at(curve, 1.0)?]);
        }

        let polyline = curve.tessellate(&self.tessellation);
        if polyline.len() < 2 {
            return Err(SamplingError::EmptyTessellation.into());
        }
        let step = curve.length() / ((divisions - 1) as f64);

        let mut samples = Vec::with_capacity(divisions + 1);
        samples.push(self.sample_at(curve, 0.0)?);

        let mut accumulated = 0.0;
        for pair in polyline[..polyline.len() - 1].windows(2) {
            accumulated += (pair[1] - pair[0]).norm();
            if accumulated >= step {
                let t = curve.project(&pair[1])?;
                samples.push(self.sample_at(curve, curve.normalized_parameter(t))?);
                accumulated = 0.0;
            }
        }

        samples.push(self.sample_at(curve, 1.0)?);
        Ok(samples)
    }

    fn sample_at(&self, curve: &dyn Curve, u: f64) -> Result<Sample> {
        let point = curve.evaluate_normalized(u)?;
        let tangent = if self.with_tangents {
            Some(curve.tangent_normalized(u)?)
        } else {
            None
        };
        Ok(Sample {
            point,
            parameter: u,
            tangent,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, CatmullRom, Circle, Segment};
    use std::f64::consts::FRAC_PI_2;

    fn x_segment(len: f64) -> Segment {
        Segment::new(Point3::origin(), Point3::new(len, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn segment_division_counts() {
        let s = x_segment(10.0);
        for n in 2..=7 {
            let set = SampleCurve::new(n).execute(&s).unwrap();
            assert_eq!(set.len(), n);
        }
    }

    #[test]
    fn segment_samples_span_endpoints() {
        let s = x_segment(10.0);
        let set = SampleCurve::new(5).execute(&s).unwrap();
        let first = &set.samples()[0];
        let last = &set.samples()[set.len() - 1];
        assert!((first.point - Point3::origin()).norm() < 1e-12);
        assert!((last.point - Point3::new(10.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((last.parameter - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_parameters_strictly_increase() {
        let s = x_segment(4.0);
        let set = SampleCurve::new(9).execute(&s).unwrap();
        for pair in set.samples().windows(2) {
            assert!(pair[1].parameter > pair[0].parameter);
        }
    }

    #[test]
    fn three_divisions_hit_midpoint() {
        let s = x_segment(10.0);
        let set = SampleCurve::new(3).execute(&s).unwrap();
        let xs: Vec<f64> = set.iter().map(|s| s.point.x).collect();
        assert!((xs[0] - 0.0).abs() < 1e-12);
        assert!((xs[1] - 5.0).abs() < 1e-12);
        assert!((xs[2] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_division_yields_endpoint_only() {
        let s = x_segment(2.0);
        let set = SampleCurve::new(1).execute(&s).unwrap();
        assert_eq!(set.len(), 1);
        assert!((set.samples()[0].point - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn zero_divisions_rejected() {
        let s = x_segment(1.0);
        assert!(SampleCurve::new(0).execute(&s).is_err());
    }

    #[test]
    fn arc_samples_are_uniform_in_angle() {
        let a = Arc::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::x(),
            0.0,
            FRAC_PI_2,
        )
        .unwrap();
        let set = SampleCurve::new(4).execute(&a).unwrap();
        assert_eq!(set.len(), 4);
        // Equal parameter steps on an arc mean equal chord lengths.
        let chords: Vec<f64> = set
            .samples()
            .windows(2)
            .map(|w| (w[1].point - w[0].point).norm())
            .collect();
        for c in &chords {
            assert!((c - chords[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn tangents_are_unit_and_forward() {
        let s = x_segment(7.0);
        let set = SampleCurve::new(3).with_tangents().execute(&s).unwrap();
        for sample in &set {
            let t = sample.tangent.unwrap();
            assert!((t.norm() - 1.0).abs() < 1e-12);
            assert!(t.x > 0.9);
        }
    }

    #[test]
    fn tangents_absent_by_default() {
        let s = x_segment(1.0);
        let set = SampleCurve::new(2).execute(&s).unwrap();
        assert!(set.iter().all(|s| s.tangent.is_none()));
    }

    #[test]
    fn spline_count_close_to_requested() {
        let c = CatmullRom::open(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(4.0, -1.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
        ])
        .unwrap();
        let set = SampleCurve::new(10).execute(&c).unwrap();
        let n = set.len() as isize;
        assert!((n - 10).abs() <= 2, "got {n} samples");
    }

    #[test]
    fn spline_last_sample_is_exact_endpoint() {
        let c = CatmullRom::open(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        let set = SampleCurve::new(6).execute(&c).unwrap();
        let last = &set.samples()[set.len() - 1];
        assert!((last.parameter - 1.0).abs() < 1e-12);
        assert!((last.point - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn spline_spacing_is_near_arc_length_step() {
        let c = CatmullRom::open(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ])
        .unwrap();
        let divisions = 7;
        let set = SampleCurve::new(divisions).execute(&c).unwrap();
        let step = c.length() / ((divisions - 1) as f64);
        // Chord length of the tessellation bounds the walk error.
        let params = TessellationParams::default();
        let poly = c.tessellate(&params);
        let max_chord = poly
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .fold(0.0_f64, f64::max);
        for pair in set.samples().windows(2) {
            let d = (pair[1].point - pair[0].point).norm();
            assert!(d <= step + max_chord + 1e-9, "spacing {d} exceeds bound");
        }
    }

    #[test]
    fn closed_spline_walk_returns_to_start() {
        let c = CatmullRom::closed(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
        let set = SampleCurve::new(8).execute(&c).unwrap();
        let first = &set.samples()[0];
        let last = &set.samples()[set.len() - 1];
        assert!((first.point - last.point).norm() < 1e-9);
    }

    #[test]
    fn circle_sampling_closes_the_loop() {
        let c = Circle::new(Point3::origin(), 1.5, Vector3::z(), Vector3::x()).unwrap();
        let set = SampleCurve::new(5).execute(&c).unwrap();
        assert_eq!(set.len(), 5);
        let first = &set.samples()[0];
        let last = &set.samples()[set.len() - 1];
        assert!((first.point - last.point).norm() < 1e-9);
    }
}
