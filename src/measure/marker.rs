use crate::error::Result;
use crate::geometry::{Circle, Segment};
use crate::math::{Point3, Vector3};

/// Radius of the point markers drawn by the measuring tools, in internal
/// units.
pub const MARKER_RADIUS: f64 = 0.05;

/// Builds the three mutually orthogonal circles marking a picked point.
///
/// One circle per principal plane (XY, XZ, YZ), all centered at `center`,
/// so the marker reads as a small sphere from any view direction.
///
/// # Errors
///
/// Returns an error if the radius is not positive.
pub fn point_marker(center: Point3, radius: f64) -> Result<[Circle; 3]> {
    Ok([
        Circle::new(center, radius, Vector3::z(), Vector3::x())?,
        Circle::new(center, radius, Vector3::y(), Vector3::z())?,
        Circle::new(center, radius, Vector3::x(), Vector3::y())?,
    ])
}

/// Builds the line joining two consecutive picked points.
///
/// # Errors
///
/// Returns an error if the points coincide.
pub fn connector(from: Point3, to: Point3) -> Result<Segment> {
    Segment::new(from, to)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Curve;

    #[test]
    fn marker_circles_share_the_center() {
        let center = Point3::new(1.0, 2.0, 3.0);
        let circles = point_marker(center, MARKER_RADIUS).unwrap();
        for c in &circles {
            assert!((c.center() - center).norm() < 1e-12);
            assert!((c.radius() - MARKER_RADIUS).abs() < 1e-12);
        }
    }

    #[test]
    fn marker_normals_are_mutually_orthogonal() {
        let circles = point_marker(Point3::origin(), 0.05).unwrap();
        for i in 0..3 {
            for j in i + 1..3 {
                let dot = circles[i].normal().dot(circles[j].normal());
                assert!(dot.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn marker_points_lie_on_a_sphere() {
        let center = Point3::new(-2.0, 0.5, 4.0);
        let circles = point_marker(center, 0.05).unwrap();
        for c in &circles {
            let p = c.evaluate(1.2).unwrap();
            assert!(((p - center).norm() - 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn connector_joins_the_picks() {
        let a = Point3::origin();
        let b = Point3::new(0.0, 3.0, 0.0);
        let seg = connector(a, b).unwrap();
        assert!((seg.start() - a).norm() < 1e-12);
        assert!((seg.end() - b).norm() < 1e-12);
        assert!((seg.length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn connector_rejects_coincident_picks() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(connector(p, p).is_err());
    }

    #[test]
    fn zero_radius_marker_rejected() {
        assert!(point_marker(Point3::origin(), 0.0).is_err());
    }
}
