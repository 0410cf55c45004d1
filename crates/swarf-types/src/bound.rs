use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A planar rectangular candidate region on the current solid.
///
/// Corner ordering follows the discovery convention used throughout the
/// pipeline: `dir_w = p2 - p1`, `dir_h = p0 - p1`, and the outward normal
/// equals the normalized cross product `dir_w × dir_h`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bound {
    /// Corners p0..p3 of the rectangle.
    pub corners: [Point3<f64>; 4],
    /// Unit outward normal of the underlying planar face.
    pub normal: Vector3<f64>,
}

impl Bound {
    /// Build a bound from four corners and an outward normal.
    /// Returns `None` when the rectangle is degenerate (zero width or height).
    pub fn new(corners: [Point3<f64>; 4], normal: Vector3<f64>) -> Option<Self> {
        let b = Self { corners, normal };
        if b.width() <= 0.0 || b.height() <= 0.0 {
            return None;
        }
        Some(b)
    }

    /// Width axis, unnormalized.
    pub fn dir_w(&self) -> Vector3<f64> {
        self.corners[2] - self.corners[1]
    }

    /// Height axis, unnormalized.
    pub fn dir_h(&self) -> Vector3<f64> {
        self.corners[0] - self.corners[1]
    }

    pub fn width(&self) -> f64 {
        self.dir_w().norm()
    }

    pub fn height(&self) -> f64 {
        self.dir_h().norm()
    }

    /// Center of the rectangle (corner average).
    pub fn center(&self) -> Point3<f64> {
        let sum = self.corners[0].coords
            + self.corners[1].coords
            + self.corners[2].coords
            + self.corners[3].coords;
        Point3::from(sum / 4.0)
    }

    /// Point at normalized rectangle coordinates, with (0, 0) at p1,
    /// u along `dir_w` and v along `dir_h`.
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        self.corners[1] + self.dir_w() * u + self.dir_h() * v
    }

    /// Sub-rectangle in normalized coordinates. Preserves the corner
    /// ordering convention, so derived axes and normal stay consistent.
    pub fn sub_rect(&self, u0: f64, v0: f64, u1: f64, v1: f64) -> Bound {
        Bound {
            corners: [
                self.point_at(u0, v1),
                self.point_at(u0, v0),
                self.point_at(u1, v0),
                self.point_at(u1, v1),
            ],
            normal: self.normal,
        }
    }

    /// Largest circle radius that fits the rectangle.
    pub fn max_radius(&self) -> f64 {
        self.width().min(self.height()) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_bound(w: f64, h: f64) -> Bound {
        // Rectangle in the z=0 plane with +z outward normal.
        Bound {
            corners: [
                Point3::new(0.0, h, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(w, 0.0, 0.0),
                Point3::new(w, h, 0.0),
            ],
            normal: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn derived_axes_match_convention() {
        let b = unit_bound(20.0, 10.0);
        assert_relative_eq!(b.width(), 20.0);
        assert_relative_eq!(b.height(), 10.0);
        let n = b.dir_w().cross(&b.dir_h()).normalize();
        assert_relative_eq!(n.dot(&b.normal), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn center_is_corner_average() {
        let b = unit_bound(4.0, 2.0);
        assert_relative_eq!(b.center().x, 2.0);
        assert_relative_eq!(b.center().y, 1.0);
    }

    #[test]
    fn sub_rect_keeps_normal_and_shrinks() {
        let b = unit_bound(10.0, 10.0);
        let s = b.sub_rect(0.25, 0.25, 0.75, 0.75);
        assert_relative_eq!(s.width(), 5.0);
        assert_relative_eq!(s.height(), 5.0);
        let n = s.dir_w().cross(&s.dir_h()).normalize();
        assert_relative_eq!(n.dot(&b.normal), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_bound_rejected() {
        let c = Point3::new(1.0, 1.0, 0.0);
        assert!(Bound::new([c, c, c, c], Vector3::z()).is_none());
    }
}
