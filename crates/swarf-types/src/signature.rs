use serde::{Deserialize, Serialize};

/// Geometric signature of a face. Used to re-identify a face after a
/// modeling edit renumbers the topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceSignature {
    /// Surface type (planar, cylindrical, conical, spherical, nurbs).
    pub surface_type: Option<String>,
    /// Surface area.
    pub area: Option<f64>,
    /// Centroid position [x, y, z].
    pub centroid: Option<[f64; 3]>,
    /// Outward-pointing normal at centroid.
    pub normal: Option<[f64; 3]>,
}

impl FaceSignature {
    pub fn empty() -> Self {
        Self {
            surface_type: None,
            area: None,
            centroid: None,
            normal: None,
        }
    }

    /// Whether two signatures plausibly describe the same face.
    ///
    /// Fields absent on either side are ignored; present fields must all
    /// agree within `tol` (area relative, centroid/normal absolute).
    pub fn matches(&self, other: &FaceSignature, tol: f64) -> bool {
        if let (Some(a), Some(b)) = (&self.surface_type, &other.surface_type) {
            if a != b {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (self.area, other.area) {
            let scale = a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > tol * scale {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (self.centroid, other.centroid) {
            if dist3(a, b) > tol {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (self.normal, other.normal) {
            if dist3(a, b) > tol {
                return false;
            }
        }
        true
    }
}

fn dist3(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_at(c: [f64; 3]) -> FaceSignature {
        FaceSignature {
            surface_type: Some("planar".into()),
            area: Some(100.0),
            centroid: Some(c),
            normal: Some([0.0, 0.0, 1.0]),
        }
    }

    #[test]
    fn identical_signatures_match() {
        let s = planar_at([1.0, 2.0, 3.0]);
        assert!(s.matches(&s.clone(), 1e-6));
    }

    #[test]
    fn moved_centroid_rejected() {
        let a = planar_at([0.0, 0.0, 0.0]);
        let b = planar_at([5.0, 0.0, 0.0]);
        assert!(!a.matches(&b, 1e-3));
    }

    #[test]
    fn absent_fields_are_ignored() {
        let full = planar_at([0.0, 0.0, 0.0]);
        let sparse = FaceSignature {
            surface_type: Some("planar".into()),
            ..FaceSignature::empty()
        };
        assert!(full.matches(&sparse, 1e-6));
    }

    #[test]
    fn surface_type_mismatch_rejected() {
        let mut cyl = planar_at([0.0, 0.0, 0.0]);
        cyl.surface_type = Some("cylindrical".into());
        assert!(!planar_at([0.0, 0.0, 0.0]).matches(&cyl, 1e-6));
    }
}
