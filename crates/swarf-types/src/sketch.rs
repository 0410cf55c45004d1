use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A closed planar profile handed to the kernel for face construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SketchLoop {
    Circle {
        center: Point3<f64>,
        radius: f64,
        /// Plane normal; extrusions run along or against this.
        normal: Vector3<f64>,
    },
    /// Simple polygon with vertices in counter-clockwise order when viewed
    /// from the `normal` side. Coplanarity is the builder's responsibility.
    Polygon {
        vertices: Vec<Point3<f64>>,
        normal: Vector3<f64>,
    },
}

impl SketchLoop {
    pub fn normal(&self) -> Vector3<f64> {
        match self {
            SketchLoop::Circle { normal, .. } => *normal,
            SketchLoop::Polygon { normal, .. } => *normal,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            SketchLoop::Circle { radius, .. } => std::f64::consts::PI * radius * radius,
            SketchLoop::Polygon { vertices, .. } => {
                if vertices.len() < 3 {
                    return 0.0;
                }
                // Fan triangulation from the first vertex; signed areas
                // cancel for non-convex loops.
                let p0 = vertices[0];
                let mut cross_sum = Vector3::zeros();
                for w in vertices[1..].windows(2) {
                    cross_sum += (w[0] - p0).cross(&(w[1] - p0));
                }
                cross_sum.norm() / 2.0
            }
        }
    }

    pub fn centroid(&self) -> Point3<f64> {
        match self {
            SketchLoop::Circle { center, .. } => *center,
            SketchLoop::Polygon { vertices, .. } => {
                let n = vertices.len().max(1) as f64;
                let sum: Vector3<f64> = vertices.iter().map(|p| p.coords).sum();
                Point3::from(sum / n)
            }
        }
    }

    /// A loop that cannot bound a face: zero radius or fewer than three
    /// vertices.
    pub fn is_degenerate(&self) -> bool {
        match self {
            SketchLoop::Circle { radius, .. } => *radius <= 0.0,
            SketchLoop::Polygon { vertices, .. } => vertices.len() < 3 || self.area() <= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_area_and_centroid() {
        let c = SketchLoop::Circle {
            center: Point3::new(1.0, 2.0, 3.0),
            radius: 2.0,
            normal: Vector3::z(),
        };
        assert_relative_eq!(c.area(), std::f64::consts::PI * 4.0);
        assert_relative_eq!(c.centroid().x, 1.0);
    }

    #[test]
    fn unit_square_area() {
        let p = SketchLoop::Polygon {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normal: Vector3::z(),
        };
        assert_relative_eq!(p.area(), 1.0);
        assert_relative_eq!(p.centroid().x, 0.5);
        assert!(!p.is_degenerate());
    }

    #[test]
    fn two_vertex_loop_is_degenerate() {
        let p = SketchLoop::Polygon {
            vertices: vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            normal: Vector3::z(),
        };
        assert!(p.is_degenerate());
    }
}
