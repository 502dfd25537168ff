use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a host face in the document.
    pub struct FaceId;
}

/// Distance from the face plane within which a point counts as lying on
/// the face.
pub const PLANAR_TOLERANCE: f64 = 1e-6;

/// A bounded planar face that family instances can be hosted on.
///
/// The face is a rectangle centered at `origin`, spanned by the unit axes
/// `u_axis` and `v_axis`, extending `u_extent` / `v_extent` from the origin
/// in both directions along each axis.
#[derive(Debug, Clone)]
pub struct HostFace {
    origin: Point3,
    u_axis: Vector3,
    v_axis: Vector3,
    u_extent: f64,
    v_extent: f64,
}

impl HostFace {
    /// Creates a new host face.
    ///
    /// # Errors
    ///
    /// Returns an error if an axis is zero-length, the axes are not
    /// perpendicular, or an extent is not positive.
    pub fn new(
        origin: Point3,
        u_axis: Vector3,
        v_axis: Vector3,
        u_extent: f64,
        v_extent: f64,
    ) -> Result<Self> {
        let u_len = u_axis.norm();
        if u_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let u_axis = u_axis / u_len;

        let v_len = v_axis.norm();
        if v_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let v_axis = v_axis / v_len;

        if u_axis.dot(&v_axis).abs() > TOLERANCE {
            return Err(
                GeometryError::Degenerate("face axes must be perpendicular".into()).into(),
            );
        }
        if u_extent < TOLERANCE || v_extent < TOLERANCE {
            return Err(
                GeometryError::Degenerate("face extents must be positive".into()).into(),
            );
        }

        Ok(Self {
            origin,
            u_axis,
            v_axis,
            u_extent,
            v_extent,
        })
    }

    /// Returns the center of the face.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal of the face plane (`u_axis x v_axis`).
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.u_axis.cross(&self.v_axis)
    }

    /// Returns whether `point` lies on the face.
    ///
    /// The point must sit within [`PLANAR_TOLERANCE`] of the face plane and
    /// inside the rectangular extents.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        let offset = point - self.origin;
        if offset.dot(&self.normal()).abs() > PLANAR_TOLERANCE {
            return false;
        }
        offset.dot(&self.u_axis).abs() <= self.u_extent + PLANAR_TOLERANCE
            && offset.dot(&self.v_axis).abs() <= self.v_extent + PLANAR_TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn xy_face(u_extent: f64, v_extent: f64) -> HostFace {
        HostFace::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            u_extent,
            v_extent,
        )
        .unwrap()
    }

    #[test]
    fn contains_interior_point() {
        let f = xy_face(5.0, 5.0);
        assert!(f.contains(&Point3::new(2.0, -3.0, 0.0)));
        assert!(f.contains(&Point3::origin()));
    }

    #[test]
    fn rejects_point_off_the_plane() {
        let f = xy_face(5.0, 5.0);
        assert!(!f.contains(&Point3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn rejects_point_outside_extents() {
        let f = xy_face(1.0, 1.0);
        assert!(!f.contains(&Point3::new(2.0, 0.0, 0.0)));
        assert!(!f.contains(&Point3::new(0.0, -1.5, 0.0)));
    }

    #[test]
    fn boundary_points_count_as_inside() {
        let f = xy_face(1.0, 1.0);
        assert!(f.contains(&Point3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn normal_follows_right_hand_rule() {
        let f = xy_face(1.0, 1.0);
        assert!((f.normal() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn skewed_axes_rejected() {
        let r = HostFace::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::new(1.0, 1.0, 0.0),
            1.0,
            1.0,
        );
        assert!(r.is_err());
    }

    #[test]
    fn non_positive_extent_rejected() {
        let r = HostFace::new(Point3::origin(), Vector3::x(), Vector3::y(), 0.0, 1.0);
        assert!(r.is_err());
    }
}
