//! Labeled geometry export.

use std::collections::HashMap;

use kernel_api::{FaceKey, Kernel};
use swarf_types::CATALOG;
use synth_engine::PartState;

use crate::errors::ExportError;

/// Serialize the part in the kernel's exchange format with each face
/// annotated by its class name, so the geometry file carries the labels
/// on its own.
pub fn export_labeled_geometry(
    kernel: &mut dyn Kernel,
    state: &PartState,
) -> Result<Vec<u8>, ExportError> {
    let names: HashMap<FaceKey, String> = state
        .labels
        .iter()
        .map(|(face, id)| (*face, class_name(*id).to_string()))
        .collect();
    kernel
        .serialize_with_labels(&state.solid, &names)
        .map_err(|e| ExportError::GeometryFailed(e.to_string()))
}

fn class_name(id: u32) -> &'static str {
    CATALOG
        .get(id as usize)
        .map(|k| k.name())
        .unwrap_or("stock")
}
