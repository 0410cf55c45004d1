//! Closed-profile builders. All profiles are laid out on a placement
//! bound (or an explicit plane) with vertices counter-clockwise when
//! viewed from the outward-normal side.

use nalgebra::{Point3, Vector3};
use swarf_types::{Bound, SketchLoop};

/// Segments used to discretize a semicircular profile end.
const ARC_SEGMENTS: usize = 8;

/// Circle at normalized bound coordinates.
pub fn circle(bound: &Bound, uc: f64, vc: f64, radius: f64) -> SketchLoop {
    SketchLoop::Circle {
        center: bound.point_at(uc, vc),
        radius,
        normal: bound.normal,
    }
}

/// Axis-aligned rectangle in normalized bound coordinates.
pub fn rect(bound: &Bound, u0: f64, v0: f64, u1: f64, v1: f64) -> SketchLoop {
    SketchLoop::Polygon {
        vertices: vec![
            bound.point_at(u0, v0),
            bound.point_at(u1, v0),
            bound.point_at(u1, v1),
            bound.point_at(u0, v1),
        ],
        normal: bound.normal,
    }
}

/// Isoceles triangle: base along v0, apex centered at v1.
pub fn triangle(bound: &Bound, u0: f64, v0: f64, u1: f64, v1: f64) -> SketchLoop {
    SketchLoop::Polygon {
        vertices: vec![
            bound.point_at(u0, v0),
            bound.point_at(u1, v0),
            bound.point_at((u0 + u1) / 2.0, v1),
        ],
        normal: bound.normal,
    }
}

/// Regular hexagon centered at (uc, vc) with circumradius in absolute
/// units.
pub fn hexagon(bound: &Bound, uc: f64, vc: f64, radius: f64) -> SketchLoop {
    let (w, h) = (bound.width(), bound.height());
    let vertices = (0..6)
        .map(|i| {
            let theta = std::f64::consts::PI / 3.0 * i as f64;
            bound.point_at(uc + radius * theta.cos() / w, vc + radius * theta.sin() / h)
        })
        .collect();
    SketchLoop::Polygon {
        vertices,
        normal: bound.normal,
    }
}

/// Stadium (rectangle with semicircular ends) along the u axis, centered
/// vertically at vc. End-cap centers sit at u0 and u1; `radius` is in
/// absolute units. With `round_start` false the u0 end stays flat.
pub fn stadium(
    bound: &Bound,
    u0: f64,
    u1: f64,
    vc: f64,
    radius: f64,
    round_start: bool,
) -> SketchLoop {
    let (w, h) = (bound.width(), bound.height());
    let (ru, rv) = (radius / w, radius / h);
    let mut vertices = Vec::new();

    // Right cap, sweeping -90 to +90 degrees.
    for i in 0..=ARC_SEGMENTS {
        let theta = -std::f64::consts::FRAC_PI_2
            + std::f64::consts::PI * i as f64 / ARC_SEGMENTS as f64;
        vertices.push(bound.point_at(u1 + ru * theta.cos(), vc + rv * theta.sin()));
    }
    if round_start {
        // Left cap, +90 to +270 degrees.
        for i in 0..=ARC_SEGMENTS {
            let theta = std::f64::consts::FRAC_PI_2
                + std::f64::consts::PI * i as f64 / ARC_SEGMENTS as f64;
            vertices.push(bound.point_at(u0 + ru * theta.cos(), vc + rv * theta.sin()));
        }
    } else {
        vertices.push(bound.point_at(u0, vc + rv));
        vertices.push(bound.point_at(u0, vc - rv));
    }

    SketchLoop::Polygon {
        vertices,
        normal: bound.normal,
    }
}

/// Quad with one slanted side: the strip between v=0 and the line from
/// v_left to v_right.
pub fn slant_quad(bound: &Bound, v_left: f64, v_right: f64) -> SketchLoop {
    SketchLoop::Polygon {
        vertices: vec![
            bound.point_at(0.0, 0.0),
            bound.point_at(1.0, 0.0),
            bound.point_at(1.0, v_right),
            bound.point_at(0.0, v_left),
        ],
        normal: bound.normal,
    }
}

/// Polygon from explicit 3D points.
pub fn polygon(vertices: Vec<Point3<f64>>, normal: Vector3<f64>) -> SketchLoop {
    SketchLoop::Polygon { vertices, normal }
}

/// Radial notch quad around `center` in the plane with normal `n`:
/// spans radius r_in..r_out at angle theta, with the given tangential
/// half-width. Used for gear tooth gaps and stud/thread flutes.
pub fn radial_notch(
    center: Point3<f64>,
    n: Vector3<f64>,
    theta: f64,
    r_in: f64,
    r_out: f64,
    half_width: f64,
) -> SketchLoop {
    let u = if n.x.abs() < 0.9 {
        Vector3::x().cross(&n).normalize()
    } else {
        Vector3::y().cross(&n).normalize()
    };
    let v = n.cross(&u);
    let radial = u * theta.cos() + v * theta.sin();
    let tangent = n.cross(&radial);
    SketchLoop::Polygon {
        vertices: vec![
            center + radial * r_in - tangent * half_width,
            center + radial * r_out - tangent * half_width,
            center + radial * r_out + tangent * half_width,
            center + radial * r_in + tangent * half_width,
        ],
        normal: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_bound(w: f64, h: f64) -> Bound {
        Bound::new(
            [
                Point3::new(0.0, h, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(w, 0.0, 0.0),
                Point3::new(w, h, 0.0),
            ],
            Vector3::z(),
        )
        .unwrap()
    }

    #[test]
    fn rect_covers_requested_span() {
        let b = flat_bound(10.0, 10.0);
        let r = rect(&b, 0.2, 0.2, 0.8, 0.8);
        assert_relative_eq!(r.area(), 36.0, epsilon = 1e-9);
    }

    #[test]
    fn hexagon_uses_absolute_radius() {
        let b = flat_bound(10.0, 20.0);
        let hex = hexagon(&b, 0.5, 0.5, 3.0);
        // regular hexagon area = 3*sqrt(3)/2 * r^2
        let expected = 1.5 * 3f64.sqrt() * 9.0;
        assert_relative_eq!(hex.area(), expected, epsilon = 1e-6);
    }

    #[test]
    fn stadium_is_closed_and_positive() {
        let b = flat_bound(20.0, 10.0);
        let s = stadium(&b, 0.25, 0.75, 0.5, 2.0, true);
        assert!(s.area() > 0.0);
        assert!(!s.is_degenerate());
    }

    #[test]
    fn radial_notch_spans_radii() {
        let n = radial_notch(Point3::origin(), Vector3::z(), 0.0, 2.0, 3.0, 0.5);
        assert_relative_eq!(n.area(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(n.centroid().coords.norm(), 2.5, epsilon = 1e-9);
    }
}
