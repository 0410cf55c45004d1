use std::collections::HashMap;

use swarf_types::{Bound, FaceSignature, SketchLoop};

use crate::mesh::SurfaceMesh;
use crate::types::*;

/// Core geometry kernel trait. Provides shape construction and
/// modification. Implemented by MockKernel (deterministic test double)
/// and by adapters over a real B-rep kernel.
pub trait Kernel {
    /// Create a box solid spanning the origin to `dims`.
    fn make_box(&mut self, dims: [f64; 3]) -> Result<SolidHandle, KernelError>;

    /// Create a standalone planar face from a closed profile, for use as
    /// a prism base.
    fn make_planar_face(&mut self, profile: &SketchLoop) -> Result<FaceKey, KernelError>;

    /// Sweep a standalone face along `direction` and boolean the prism
    /// against `solid`: subtract when `additive` is false, fuse when
    /// true. `depth` of `None` means through the whole solid.
    fn apply_prism(
        &mut self,
        solid: &SolidHandle,
        profile: FaceKey,
        direction: [f64; 3],
        depth: Option<f64>,
        additive: bool,
    ) -> Result<EditOutcome, KernelError>;

    /// Round an edge. `r1` and `r2` are the radii at the two ends; equal
    /// radii give a constant round.
    fn fillet_edge(
        &mut self,
        solid: &SolidHandle,
        edge: EdgeKey,
        r1: f64,
        r2: f64,
    ) -> Result<EditOutcome, KernelError>;

    /// Bevel an edge with the given setback distance.
    fn chamfer_edge(
        &mut self,
        solid: &SolidHandle,
        edge: EdgeKey,
        distance: f64,
    ) -> Result<EditOutcome, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn triangulate(&mut self, solid: &SolidHandle, tolerance: f64)
        -> Result<SurfaceMesh, KernelError>;

    /// Serialize the solid with a per-face name attached to each labeled
    /// face, in the kernel's native exchange format.
    fn serialize_with_labels(
        &mut self,
        solid: &SolidHandle,
        face_names: &HashMap<FaceKey, String>,
    ) -> Result<Vec<u8>, KernelError>;
}

/// Topology introspection trait. Read-only queries on kernel geometry.
pub trait KernelIntrospect {
    /// Faces of a solid in the kernel's stable enumeration order.
    fn list_faces(&self, solid: &SolidHandle) -> Vec<FaceKey>;

    /// Edges of a solid in stable enumeration order.
    fn list_edges(&self, solid: &SolidHandle) -> Vec<EdgeKey>;

    fn edge_length(&self, edge: EdgeKey) -> Option<f64>;

    /// Number of disconnected solid shells behind the handle. A valid
    /// part has exactly one.
    fn solid_count(&self, solid: &SolidHandle) -> usize;

    /// Axis-aligned bounding box [min_x, min_y, min_z, max_x, max_y, max_z].
    fn bounding_box(&self, solid: &SolidHandle) -> [f64; 6];

    fn face_signature(&self, face: FaceKey) -> FaceSignature;

    /// Find the candidate whose signature matches `face`, if any.
    fn same_face(&self, face: FaceKey, candidates: &[FaceKey]) -> Option<FaceKey>;

    /// Rectangular planar placement regions on the current solid, one per
    /// planar face large enough to host a feature.
    fn discover_regions(&self, solid: &SolidHandle) -> Vec<Bound>;
}
