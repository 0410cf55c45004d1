//! Dataset label extraction.
//!
//! Converts the scheduler's key-addressed maps into index-addressed
//! structures over the kernel's stable face enumeration, the form the
//! downstream training pipeline consumes.

use std::collections::HashMap;

use kernel_api::{FaceKey, KernelIntrospect};
use swarf_types::FeatureKind;
use synth_engine::PartState;

/// Face-indexed labels for one finished part. `cls` and `bottom` are
/// total over the enumeration; `seg` holds one index group per feature
/// instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartLabels {
    pub cls: Vec<u32>,
    pub seg: Vec<Vec<usize>>,
    pub bottom: Vec<u8>,
}

/// Extract the three label structures from a finished part. Repeated
/// extraction of the same state yields identical output.
pub fn extract_labels(introspect: &dyn KernelIntrospect, state: &PartState) -> PartLabels {
    let faces = introspect.list_faces(&state.solid);
    let index: HashMap<FaceKey, usize> =
        faces.iter().enumerate().map(|(i, f)| (*f, i)).collect();

    let stock_id = FeatureKind::Stock.label_id();
    let cls = faces
        .iter()
        .map(|f| state.labels.get(f).copied().unwrap_or(stock_id))
        .collect();
    let bottom = faces
        .iter()
        .map(|f| u8::from(state.bottoms.get(f).copied().unwrap_or(false)))
        .collect();

    let mut seg = Vec::with_capacity(state.instances.len());
    for group in &state.instances {
        let mut ids: Vec<usize> = group
            .faces
            .iter()
            .filter_map(|f| {
                let i = index.get(f).copied();
                if i.is_none() {
                    tracing::warn!(kind = group.kind.name(), face = ?f, "instance face not on solid");
                }
                i
            })
            .collect();
        ids.sort_unstable();
        if !ids.is_empty() {
            seg.push(ids);
        }
    }

    PartLabels { cls, seg, bottom }
}

/// Pairwise instance relation over `n` faces: `m[a][b] == 1` when faces
/// `a` and `b` belong to the same instance group. Symmetric, with a 1
/// diagonal entry for every instance-bearing face.
pub fn relation_matrix(seg: &[Vec<usize>], n: usize) -> Vec<Vec<u8>> {
    let mut m = vec![vec![0u8; n]; n];
    for group in seg {
        for &a in group {
            for &b in group {
                m[a][b] = 1;
            }
        }
    }
    m
}
