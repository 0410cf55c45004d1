use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Tessellated boundary of a solid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub positions: Vec<[f64; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

const RAY_EPS: f64 = 1e-9;

impl SurfaceMesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Distance from `origin` along `dir` to the first triangle hit, or
    /// `None` when the ray escapes the mesh. Hits closer than a small
    /// epsilon are skipped so a ray cast from a surface point does not
    /// report its own face.
    pub fn ray_depth(&self, origin: Point3<f64>, dir: Vector3<f64>) -> Option<f64> {
        let dir = dir.normalize();
        let mut best: Option<f64> = None;
        for tri in &self.triangles {
            let a = Point3::from(Vector3::from(self.positions[tri[0] as usize]));
            let b = Point3::from(Vector3::from(self.positions[tri[1] as usize]));
            let c = Point3::from(Vector3::from(self.positions[tri[2] as usize]));
            if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                if t > 1e-6 && best.map_or(true, |cur| t < cur) {
                    best = Some(t);
                }
            }
        }
        best
    }
}

/// Moller-Trumbore ray/triangle intersection. Returns the ray parameter
/// of the hit, or `None` for a miss or a ray parallel to the triangle.
fn ray_triangle(
    origin: Point3<f64>,
    dir: Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
    c: Point3<f64>,
) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(&e2);
    let det = e1.dot(&p);
    if det.abs() < RAY_EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(&p) * inv_det;
    if !(-RAY_EPS..=1.0 + RAY_EPS).contains(&u) {
        return None;
    }
    let q = s.cross(&e1);
    let v = dir.dot(&q) * inv_det;
    if v < -RAY_EPS || u + v > 1.0 + RAY_EPS {
        return None;
    }
    let t = e2.dot(&q) * inv_det;
    (t > RAY_EPS).then_some(t)
}
