use std::collections::HashMap;

use kernel_api::{FaceKey, KernelIntrospect, SolidHandle};
use swarf_types::FeatureKind;

/// Semantic class per face. Total over the current solid's face set.
pub type LabelMap = HashMap<FaceKey, u32>;

/// Bottom flag per face: true for faces inherited from the stock's
/// minimum-z cap. Total, like `LabelMap`.
pub type BottomMap = HashMap<FaceKey, bool>;

/// Faces created by one applied feature instance.
#[derive(Debug, Clone)]
pub struct InstanceGroup {
    pub kind: FeatureKind,
    pub faces: Vec<FaceKey>,
}

/// Everything the scheduler owns about a part in progress. Replaced
/// atomically per validated edit; a failed feature leaves the previous
/// state untouched.
#[derive(Debug, Clone)]
pub struct PartState {
    pub solid: SolidHandle,
    pub labels: LabelMap,
    pub bottoms: BottomMap,
    pub instances: Vec<InstanceGroup>,
    /// Features applied so far, in application order.
    pub applied: Vec<FeatureKind>,
}

impl PartState {
    /// Initial state for a fresh stock box: every face labeled stock,
    /// the downward-facing cap flagged as bottom, no instances.
    pub fn stock(introspect: &dyn KernelIntrospect, solid: SolidHandle) -> Self {
        let stock_id = FeatureKind::Stock.label_id();
        let mut labels = LabelMap::new();
        let mut bottoms = BottomMap::new();
        for face in introspect.list_faces(&solid) {
            labels.insert(face, stock_id);
            let down = introspect
                .face_signature(face)
                .normal
                .map(|n| -n[2] > 0.99)
                .unwrap_or(false);
            bottoms.insert(face, down);
        }
        PartState {
            solid,
            labels,
            bottoms,
            instances: Vec::new(),
            applied: Vec::new(),
        }
    }

    /// Faces currently flagged as bottom.
    pub fn bottom_faces(&self) -> Vec<FaceKey> {
        let mut faces: Vec<FaceKey> = self
            .bottoms
            .iter()
            .filter_map(|(f, &b)| b.then_some(*f))
            .collect();
        faces.sort();
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_api::{Kernel, MockKernel};

    #[test]
    fn stock_state_is_all_stock_with_one_bottom() {
        let mut k = MockKernel::new();
        let solid = k.make_box([20.0, 20.0, 10.0]).unwrap();
        let state = PartState::stock(&k, solid);
        assert_eq!(state.labels.len(), 6);
        let stock_id = FeatureKind::Stock.label_id();
        assert!(state.labels.values().all(|&id| id == stock_id));
        assert_eq!(state.bottom_faces().len(), 1);
        assert!(state.instances.is_empty());
    }
}
