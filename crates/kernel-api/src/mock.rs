//! MockKernel, a deterministic test double implementing Kernel +
//! KernelIntrospect.
//!
//! Produces synthetic topology with predictable entity counts and
//! signatures. Modeling edits renumber every key, the way a real B-rep
//! kernel does, so callers have to exercise the correspondence and
//! signature-matching paths they rely on in production.

use std::collections::{HashMap, VecDeque};

use nalgebra::{Point3, Vector3};
use serde_json::json;
use swarf_types::{Bound, FaceSignature, SketchLoop};

use crate::mesh::SurfaceMesh;
use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

const PLANE_TOL: f64 = 1e-6;
const SIG_TOL: f64 = 1e-6;

#[derive(Debug, Clone)]
struct MockFace {
    normal: [f64; 3],
    centroid: [f64; 3],
    area: f64,
    surface_type: String,
}

#[derive(Debug, Clone)]
struct MockEdge {
    length: f64,
}

#[derive(Debug, Clone)]
struct MockSolid {
    faces: Vec<FaceKey>,
    edges: Vec<EdgeKey>,
    bbox: [f64; 6],
    /// Disconnected shell count; 1 for a healthy solid.
    shards: usize,
}

/// A standalone profile face plus the lateral geometry a prism of it
/// will produce.
#[derive(Debug, Clone)]
struct ProfileRec {
    face: MockFace,
    side_count: usize,
    perimeter: f64,
    side_surface: &'static str,
}

/// Scripted failure injected into the next modeling edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockAnomaly {
    /// The edit reports success but leaves the result in two pieces.
    SplitSolid,
    /// The edit fails outright.
    FailOp,
    /// The edit's reported correspondence names a parent face that never
    /// existed on the input solid.
    BadCorrespondence,
}

/// What a consumed anomaly does to the edit that consumed it.
#[derive(Debug, Clone, Copy)]
struct AnomalyEffect {
    shards: usize,
    bad_correspondence: bool,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_key: u64,
    next_handle: u64,
    faces: HashMap<u64, MockFace>,
    edges: HashMap<u64, MockEdge>,
    solids: HashMap<u64, MockSolid>,
    profiles: HashMap<u64, ProfileRec>,
    anomalies: VecDeque<MockAnomaly>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_key: 1,
            next_handle: 1,
            faces: HashMap::new(),
            edges: HashMap::new(),
            solids: HashMap::new(),
            profiles: HashMap::new(),
            anomalies: VecDeque::new(),
        }
    }

    /// Queue a scripted anomaly; each modeling edit consumes one.
    pub fn push_anomaly(&mut self, anomaly: MockAnomaly) {
        self.anomalies.push_back(anomaly);
    }

    fn alloc_face(&mut self, face: MockFace) -> FaceKey {
        let key = FaceKey(self.next_key);
        self.next_key += 1;
        self.faces.insert(key.0, face);
        key
    }

    fn alloc_edge(&mut self, edge: MockEdge) -> EdgeKey {
        let key = EdgeKey(self.next_key);
        self.next_key += 1;
        self.edges.insert(key.0, edge);
        key
    }

    fn alloc_handle(&mut self, solid: MockSolid) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(h.0, solid);
        h
    }

    fn solid(&self, handle: &SolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.0)
            .ok_or(KernelError::SolidNotFound(handle.0))
    }

    fn take_anomaly(&mut self, op: &str) -> Result<AnomalyEffect, KernelError> {
        let (shards, bad_correspondence) = match self.anomalies.pop_front() {
            Some(MockAnomaly::FailOp) => return Err(KernelError::op(op, "scripted failure")),
            Some(MockAnomaly::SplitSolid) => (2, false),
            Some(MockAnomaly::BadCorrespondence) => (1, true),
            None => (1, false),
        };
        Ok(AnomalyEffect {
            shards,
            bad_correspondence,
        })
    }

    /// Re-key every face and edge of a solid, keeping signatures intact.
    /// Returns the cloned record plus the old-to-new face map.
    fn clone_solid(&mut self, src: &MockSolid) -> (MockSolid, HashMap<FaceKey, FaceKey>) {
        let mut face_map = HashMap::new();
        let mut faces = Vec::with_capacity(src.faces.len());
        for &old in &src.faces {
            let data = self.faces[&old.0].clone();
            let new = self.alloc_face(data);
            face_map.insert(old, new);
            faces.push(new);
        }
        let mut edges = Vec::with_capacity(src.edges.len());
        for &old in &src.edges {
            let data = self.edges[&old.0].clone();
            edges.push(self.alloc_edge(data));
        }
        (
            MockSolid {
                faces,
                edges,
                bbox: src.bbox,
                shards: src.shards,
            },
            face_map,
        )
    }

    /// Face of the solid coplanar with the profile and facing the same
    /// way; the face a prism from that profile pierces first.
    fn entry_face(solid_faces: &[(FaceKey, MockFace)], profile: &MockFace) -> Option<FaceKey> {
        solid_faces.iter().find_map(|(key, f)| {
            let aligned = dot(f.normal, profile.normal) > 0.99;
            let coplanar = dot(sub(profile.centroid, f.centroid), f.normal).abs() < PLANE_TOL;
            (f.surface_type == "planar" && aligned && coplanar).then_some(*key)
        })
    }

    /// Opposite face a through prism exits by: outward normal along the
    /// sweep direction.
    fn exit_face(solid_faces: &[(FaceKey, MockFace)], dir: [f64; 3]) -> Option<FaceKey> {
        solid_faces
            .iter()
            .find_map(|(key, f)| {
                (f.surface_type == "planar" && dot(f.normal, dir) > 0.99).then_some(*key)
            })
    }

    fn span_along(bbox: [f64; 6], dir: [f64; 3]) -> f64 {
        let ext = [bbox[3] - bbox[0], bbox[4] - bbox[1], bbox[5] - bbox[2]];
        (ext[0] * dir[0]).abs() + (ext[1] * dir[1]).abs() + (ext[2] * dir[2]).abs()
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn make_box(&mut self, dims: [f64; 3]) -> Result<SolidHandle, KernelError> {
        let [w, h, d] = dims;
        if w <= 0.0 || h <= 0.0 || d <= 0.0 {
            return Err(KernelError::op("make_box", "non-positive dimension"));
        }

        // bottom, top, front, back, left, right
        let face_defs = [
            ([0.0, 0.0, -1.0], [w / 2.0, h / 2.0, 0.0], w * h),
            ([0.0, 0.0, 1.0], [w / 2.0, h / 2.0, d], w * h),
            ([0.0, -1.0, 0.0], [w / 2.0, 0.0, d / 2.0], w * d),
            ([0.0, 1.0, 0.0], [w / 2.0, h, d / 2.0], w * d),
            ([-1.0, 0.0, 0.0], [0.0, h / 2.0, d / 2.0], h * d),
            ([1.0, 0.0, 0.0], [w, h / 2.0, d / 2.0], h * d),
        ];
        let faces = face_defs
            .into_iter()
            .map(|(normal, centroid, area)| {
                self.alloc_face(MockFace {
                    normal,
                    centroid,
                    area,
                    surface_type: "planar".to_string(),
                })
            })
            .collect();

        // 4 edges per axis
        let mut edges = Vec::with_capacity(12);
        for len in [w, h, d] {
            for _ in 0..4 {
                edges.push(self.alloc_edge(MockEdge { length: len }));
            }
        }

        Ok(self.alloc_handle(MockSolid {
            faces,
            edges,
            bbox: [0.0, 0.0, 0.0, w, h, d],
            shards: 1,
        }))
    }

    fn make_planar_face(&mut self, profile: &SketchLoop) -> Result<FaceKey, KernelError> {
        if profile.is_degenerate() {
            return Err(KernelError::op("make_planar_face", "degenerate profile"));
        }
        let (side_count, perimeter, side_surface) = match profile {
            SketchLoop::Circle { radius, .. } => {
                (1, 2.0 * std::f64::consts::PI * radius, "cylindrical")
            }
            SketchLoop::Polygon { vertices, .. } => {
                let mut perim = 0.0;
                for i in 0..vertices.len() {
                    perim += (vertices[(i + 1) % vertices.len()] - vertices[i]).norm();
                }
                (vertices.len(), perim, "planar")
            }
        };
        let face = MockFace {
            normal: vec3_of(profile.normal().normalize()),
            centroid: pt3_of(profile.centroid()),
            area: profile.area(),
            surface_type: "planar".to_string(),
        };
        let key = FaceKey(self.next_key);
        self.next_key += 1;
        self.profiles.insert(
            key.0,
            ProfileRec {
                face,
                side_count,
                perimeter,
                side_surface,
            },
        );
        Ok(key)
    }

    fn apply_prism(
        &mut self,
        solid: &SolidHandle,
        profile: FaceKey,
        direction: [f64; 3],
        depth: Option<f64>,
        additive: bool,
    ) -> Result<EditOutcome, KernelError> {
        let effect = self.take_anomaly("apply_prism")?;
        let src = self.solid(solid)?.clone();
        let prof = self
            .profiles
            .get(&profile.0)
            .cloned()
            .ok_or(KernelError::FaceNotFound(profile))?;
        let dir = normalize(direction)
            .ok_or_else(|| KernelError::op("apply_prism", "zero sweep direction"))?;
        if let Some(d) = depth {
            if d <= 0.0 {
                return Err(KernelError::op("apply_prism", "non-positive depth"));
            }
        }

        let old_faces: Vec<(FaceKey, MockFace)> = src
            .faces
            .iter()
            .map(|&k| (k, self.faces[&k.0].clone()))
            .collect();
        let entry = Self::entry_face(&old_faces, &prof.face);
        let exit = (!additive && depth.is_none()).then(|| Self::exit_face(&old_faces, dir)).flatten();
        let depth = depth.unwrap_or_else(|| Self::span_along(src.bbox, dir));

        let (mut out, face_map) = self.clone_solid(&src);
        out.shards = effect.shards.max(src.shards);

        // The pierced (or stud-bearing) faces lose the profile region.
        let mut correspondence = FaceCorrespondence::new();
        for old in entry.into_iter().chain(exit) {
            let new = face_map[&old];
            let f = self.faces.get_mut(&new.0).ok_or(KernelError::FaceNotFound(new))?;
            f.area = (f.area - prof.face.area).max(PLANE_TOL);
            correspondence.insert(new, old);
        }
        if effect.bad_correspondence {
            correspondence.insert(out.faces[0], FaceKey(u64::MAX));
        }

        // Lateral walls of the prism, one per profile segment.
        let (u, v) = tangent_vectors(dir);
        let mid = add(prof.face.centroid, scale(dir, depth / 2.0));
        let wall_offset = (prof.face.area / std::f64::consts::PI).sqrt();
        for i in 0..prof.side_count {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / prof.side_count as f64;
            let outward = add(scale(u, theta.cos()), scale(v, theta.sin()));
            let key = self.alloc_face(MockFace {
                normal: if additive { outward } else { scale(outward, -1.0) },
                centroid: add(mid, scale(outward, wall_offset)),
                area: prof.perimeter / prof.side_count as f64 * depth,
                surface_type: prof.side_surface.to_string(),
            });
            out.faces.push(key);
        }
        // Rim edges at the opening become candidates for transitions.
        for _ in 0..prof.side_count {
            let e = self.alloc_edge(MockEdge {
                length: prof.perimeter / prof.side_count as f64,
            });
            out.edges.push(e);
        }

        // Blind cuts gain a floor; additive prisms gain a cap.
        if additive || exit.is_none() {
            let cap_normal = if additive { dir } else { scale(dir, -1.0) };
            let key = self.alloc_face(MockFace {
                normal: cap_normal,
                centroid: add(prof.face.centroid, scale(dir, depth)),
                area: prof.face.area,
                surface_type: "planar".to_string(),
            });
            out.faces.push(key);
        }

        if additive {
            for axis in 0..3 {
                let reach = prof.face.centroid[axis] + dir[axis] * depth;
                out.bbox[axis] = out.bbox[axis].min(reach);
                out.bbox[axis + 3] = out.bbox[axis + 3].max(reach);
            }
        }

        let handle = self.alloc_handle(out);
        Ok(EditOutcome {
            solid: handle,
            correspondence,
        })
    }

    fn fillet_edge(
        &mut self,
        solid: &SolidHandle,
        edge: EdgeKey,
        r1: f64,
        r2: f64,
    ) -> Result<EditOutcome, KernelError> {
        let effect = self.take_anomaly("fillet_edge")?;
        if r1 <= 0.0 || r2 <= 0.0 {
            return Err(KernelError::op("fillet_edge", "non-positive radius"));
        }
        self.replace_edge_with_face(solid, edge, effect, "cylindrical", (r1 + r2) / 2.0)
    }

    fn chamfer_edge(
        &mut self,
        solid: &SolidHandle,
        edge: EdgeKey,
        distance: f64,
    ) -> Result<EditOutcome, KernelError> {
        let effect = self.take_anomaly("chamfer_edge")?;
        if distance <= 0.0 {
            return Err(KernelError::op("chamfer_edge", "non-positive distance"));
        }
        self.replace_edge_with_face(solid, edge, effect, "planar", distance)
    }

    fn triangulate(
        &mut self,
        solid: &SolidHandle,
        _tolerance: f64,
    ) -> Result<SurfaceMesh, KernelError> {
        let src = self.solid(solid)?;
        let mut positions = Vec::new();
        let mut triangles = Vec::new();
        // One quad per face, reconstructed from centroid, normal and area.
        for &key in &src.faces {
            let f = &self.faces[&key.0];
            if f.area <= 0.0 {
                continue;
            }
            let half = f.area.sqrt() / 2.0;
            let (u, v) = tangent_vectors(f.normal);
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(add(
                    f.centroid,
                    add(scale(u, su * half), scale(v, sv * half)),
                ));
            }
            triangles.push([base, base + 1, base + 2]);
            triangles.push([base, base + 2, base + 3]);
        }
        Ok(SurfaceMesh {
            positions,
            triangles,
        })
    }

    fn serialize_with_labels(
        &mut self,
        solid: &SolidHandle,
        face_names: &HashMap<FaceKey, String>,
    ) -> Result<Vec<u8>, KernelError> {
        let src = self.solid(solid)?;
        let faces: Vec<_> = src
            .faces
            .iter()
            .map(|key| {
                json!({
                    "face": key.0,
                    "name": face_names.get(key),
                })
            })
            .collect();
        let doc = json!({ "solid": solid.0, "faces": faces });
        serde_json::to_vec_pretty(&doc).map_err(|e| KernelError::ExportFailed {
            reason: e.to_string(),
        })
    }
}

impl MockKernel {
    fn replace_edge_with_face(
        &mut self,
        solid: &SolidHandle,
        edge: EdgeKey,
        effect: AnomalyEffect,
        surface_type: &str,
        width: f64,
    ) -> Result<EditOutcome, KernelError> {
        let src = self.solid(solid)?.clone();
        let pos = src
            .edges
            .iter()
            .position(|&e| e == edge)
            .ok_or(KernelError::EdgeNotFound(edge))?;
        let length = self.edges[&edge.0].length;

        let (mut out, _) = self.clone_solid(&src);
        out.shards = effect.shards.max(src.shards);
        out.edges.remove(pos);

        // Transition strip replacing the consumed edge. The centroid is
        // synthesized from the new key so signatures stay unique.
        let bc = [
            (src.bbox[0] + src.bbox[3]) / 2.0,
            (src.bbox[1] + src.bbox[4]) / 2.0,
            (src.bbox[2] + src.bbox[5]) / 2.0,
        ];
        let key_salt = self.next_key as f64 * 1e-3;
        let face = self.alloc_face(MockFace {
            normal: normalize([1.0, 1.0, 1.0]).unwrap_or([1.0, 0.0, 0.0]),
            centroid: [bc[0] + key_salt, bc[1], bc[2]],
            area: length * width,
            surface_type: surface_type.to_string(),
        });
        out.faces.push(face);

        let mut correspondence = FaceCorrespondence::new();
        if effect.bad_correspondence {
            correspondence.insert(face, FaceKey(u64::MAX));
        }
        let handle = self.alloc_handle(out);
        Ok(EditOutcome {
            solid: handle,
            correspondence,
        })
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &SolidHandle) -> Vec<FaceKey> {
        self.solids
            .get(&solid.0)
            .map(|s| s.faces.clone())
            .unwrap_or_default()
    }

    fn list_edges(&self, solid: &SolidHandle) -> Vec<EdgeKey> {
        self.solids
            .get(&solid.0)
            .map(|s| s.edges.clone())
            .unwrap_or_default()
    }

    fn edge_length(&self, edge: EdgeKey) -> Option<f64> {
        self.edges.get(&edge.0).map(|e| e.length)
    }

    fn solid_count(&self, solid: &SolidHandle) -> usize {
        self.solids.get(&solid.0).map(|s| s.shards).unwrap_or(0)
    }

    fn bounding_box(&self, solid: &SolidHandle) -> [f64; 6] {
        self.solids
            .get(&solid.0)
            .map(|s| s.bbox)
            .unwrap_or([0.0; 6])
    }

    fn face_signature(&self, face: FaceKey) -> FaceSignature {
        let data = self
            .faces
            .get(&face.0)
            .or_else(|| self.profiles.get(&face.0).map(|p| &p.face));
        match data {
            Some(f) => FaceSignature {
                surface_type: Some(f.surface_type.clone()),
                area: Some(f.area),
                centroid: Some(f.centroid),
                normal: Some(f.normal),
            },
            None => FaceSignature::empty(),
        }
    }

    fn same_face(&self, face: FaceKey, candidates: &[FaceKey]) -> Option<FaceKey> {
        let target = self.face_signature(face);
        candidates
            .iter()
            .copied()
            .find(|c| target.matches(&self.face_signature(*c), SIG_TOL))
    }

    fn discover_regions(&self, solid: &SolidHandle) -> Vec<Bound> {
        let Some(src) = self.solids.get(&solid.0) else {
            return Vec::new();
        };
        let mut regions = Vec::new();
        for key in &src.faces {
            let f = &self.faces[&key.0];
            if f.surface_type != "planar" || f.area <= 0.0 {
                continue;
            }
            let half = f.area.sqrt() / 2.0;
            let (u, v) = tangent_vectors(f.normal);
            let c = Point3::from(Vector3::from(f.centroid));
            let un = Vector3::from(scale(u, half));
            let vn = Vector3::from(scale(v, half));
            // p1 at (-u, -v) so dir_w x dir_h recovers the face normal.
            let corners = [c - un + vn, c - un - vn, c + un - vn, c + un + vn];
            if let Some(b) = Bound::new(corners, Vector3::from(f.normal)) {
                regions.push(b);
            }
        }
        regions
    }
}

/// Two unit tangents orthogonal to a normal, with u x v = n.
fn tangent_vectors(n: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    let up = if n[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let u = normalize(cross(up, n)).unwrap_or([1.0, 0.0, 0.0]);
    let v = cross(n, u);
    (u, v)
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn normalize(a: [f64; 3]) -> Option<[f64; 3]> {
    let len = dot(a, a).sqrt();
    (len > 1e-12).then(|| scale(a, 1.0 / len))
}

fn vec3_of(v: Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn pt3_of(p: Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn circle_on_top(kernel: &mut MockKernel, dims: [f64; 3], radius: f64) -> FaceKey {
        let profile = SketchLoop::Circle {
            center: Point3::new(dims[0] / 2.0, dims[1] / 2.0, dims[2]),
            radius,
            normal: Vector3::z(),
        };
        kernel.make_planar_face(&profile).unwrap()
    }

    #[test]
    fn box_has_six_faces_twelve_edges() {
        let mut k = MockKernel::new();
        let solid = k.make_box([10.0, 20.0, 30.0]).unwrap();
        assert_eq!(k.list_faces(&solid).len(), 6);
        assert_eq!(k.list_edges(&solid).len(), 12);
        assert_eq!(k.solid_count(&solid), 1);
        assert_eq!(k.bounding_box(&solid), [0.0, 0.0, 0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn through_cut_trims_entry_and_exit() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], None, false)
            .unwrap();
        // Both pierced caps survive, trimmed, and are listed in the
        // correspondence.
        assert_eq!(out.correspondence.len(), 2);
        // 6 old faces + 1 cylindrical wall, no floor.
        assert_eq!(k.list_faces(&out.solid).len(), 7);
        let hole_area = std::f64::consts::PI * 9.0;
        for (new, old) in &out.correspondence {
            let before = k.face_signature(*old).area.unwrap();
            let after = k.face_signature(*new).area.unwrap();
            assert!((before - after - hole_area).abs() < 1e-9);
        }
    }

    #[test]
    fn blind_cut_gains_a_floor() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], Some(4.0), false)
            .unwrap();
        assert_eq!(out.correspondence.len(), 1);
        // wall + floor on top of the six originals
        assert_eq!(k.list_faces(&out.solid).len(), 8);
    }

    #[test]
    fn additive_prism_extends_bbox() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, 1.0], Some(5.0), true)
            .unwrap();
        assert_eq!(k.bounding_box(&out.solid)[5], 15.0);
    }

    #[test]
    fn survivors_found_by_signature_after_edit() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let old_faces = k.list_faces(&solid);
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], Some(4.0), false)
            .unwrap();
        let new_faces = k.list_faces(&out.solid);
        // Every untouched side wall of the box is recoverable by
        // signature even though all keys changed.
        let mut matched = 0;
        for old in &old_faces {
            if k.same_face(*old, &new_faces).is_some() {
                matched += 1;
            }
        }
        assert!(matched >= 5, "only {matched} of 6 faces matched");
    }

    #[test]
    fn chamfer_consumes_edge_and_adds_face() {
        let mut k = MockKernel::new();
        let solid = k.make_box([10.0, 10.0, 10.0]).unwrap();
        let edge = k.list_edges(&solid)[0];
        let out = k.chamfer_edge(&solid, edge, 1.5).unwrap();
        assert_eq!(k.list_edges(&out.solid).len(), 11);
        assert_eq!(k.list_faces(&out.solid).len(), 7);
        assert!(out.correspondence.is_empty());
    }

    #[test]
    fn scripted_split_detected_by_solid_count() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        k.push_anomaly(MockAnomaly::SplitSolid);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], None, false)
            .unwrap();
        assert_eq!(k.solid_count(&out.solid), 2);
    }

    #[test]
    fn scripted_failure_surfaces_as_error() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        k.push_anomaly(MockAnomaly::FailOp);
        let err = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], None, false)
            .unwrap_err();
        assert!(matches!(err, KernelError::OperationFailed { .. }));
    }

    #[test]
    fn scripted_bad_correspondence_names_a_ghost_parent() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let old_faces = k.list_faces(&solid);
        let profile = circle_on_top(&mut k, [20.0, 20.0, 10.0], 3.0);
        k.push_anomaly(MockAnomaly::BadCorrespondence);
        let out = k
            .apply_prism(&solid, profile, [0.0, 0.0, -1.0], None, false)
            .unwrap();
        assert!(out
            .correspondence
            .values()
            .any(|old| !old_faces.contains(old)));
    }

    #[test]
    fn ray_through_box_reports_thickness() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let mesh = k.triangulate(&solid, 0.1).unwrap();
        let d = mesh
            .ray_depth(Point3::new(10.0, 10.0, 10.0), Vector3::new(0.0, 0.0, -1.0))
            .unwrap();
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn regions_cover_planar_faces_with_outward_normals() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let regions = k.discover_regions(&solid);
        assert_eq!(regions.len(), 6);
        for b in &regions {
            let n = b.dir_w().cross(&b.dir_h()).normalize();
            assert!((n.dot(&b.normal) - 1.0).abs() < 1e-9);
        }
    }
}
