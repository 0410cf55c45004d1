use kernel_api::{EditOutcome, SolidHandle};

use crate::kernel_ext::KernelBundle;
use crate::types::{OpError, Stage};

/// Execute one stage of a feature plan against the kernel.
pub fn execute_stage(
    kb: &mut dyn KernelBundle,
    solid: &SolidHandle,
    stage: &Stage,
) -> Result<EditOutcome, OpError> {
    match stage {
        Stage::Prism {
            profile,
            direction,
            depth,
            additive,
        } => {
            let face = kb.make_planar_face(profile)?;
            Ok(kb.apply_prism(solid, face, *direction, *depth, *additive)?)
        }
        Stage::Fillet { edge, r1, r2 } => Ok(kb.fillet_edge(solid, *edge, *r1, *r2)?),
        Stage::Chamfer { edge, distance } => Ok(kb.chamfer_edge(solid, *edge, *distance)?),
    }
}
