//! Feature application: execute a plan stage by stage, carrying all
//! three label payloads across each edit and honoring the feature's
//! rollback policy.

use feature_ops::{execute_stage, FeaturePlan, KernelBundle, Stage};
use kernel_api::{FaceKey, KernelError};
use swarf_types::RollbackPolicy;

use crate::provenance::{carry, match_faces};
use crate::state::{InstanceGroup, PartState};
use crate::types::ApplyError;
use crate::validate::validate_edit;

/// Apply one sampled feature to the part. On success the returned state
/// replaces the input atomically; on error the input state is still the
/// authoritative one.
pub fn apply_feature(
    kb: &mut dyn KernelBundle,
    state: &PartState,
    plan: &FeaturePlan,
) -> Result<PartState, ApplyError> {
    let fill = plan.kind.label_id();
    let policy = plan.kind.rollback_policy();

    let mut work = state.clone();
    let mut fresh: Vec<FaceKey> = Vec::new();
    let mut applied = 0usize;
    let mut last_err: Option<ApplyError> = None;

    for stage in &plan.stages {
        match try_stage(kb, &mut work, &mut fresh, stage, fill) {
            Ok(()) => applied += 1,
            // A lying correspondence means the kernel contract is broken;
            // no policy tolerates that.
            Err(e @ ApplyError::InconsistentCorrespondence { .. }) => return Err(e),
            Err(e) => match policy {
                RollbackPolicy::WholeFeature => return Err(e),
                RollbackPolicy::BestEffortStages => {
                    tracing::warn!(kind = plan.kind.name(), error = %e, "stage skipped");
                    last_err = Some(e);
                }
            },
        }
    }

    if applied == 0 {
        return Err(last_err
            .unwrap_or_else(|| ApplyError::Kernel(KernelError::op("apply_feature", "empty plan"))));
    }

    if !fresh.is_empty() {
        work.instances.push(InstanceGroup {
            kind: plan.kind,
            faces: fresh,
        });
    }
    work.applied.push(plan.kind);
    Ok(work)
}

/// Run one stage. `work` and `fresh` are only mutated once the edit has
/// executed, validated, and matched; any failure leaves both untouched.
fn try_stage(
    kb: &mut dyn KernelBundle,
    work: &mut PartState,
    fresh: &mut Vec<FaceKey>,
    stage: &Stage,
    fill: u32,
) -> Result<(), ApplyError> {
    let old_faces = kb.list_faces(&work.solid);
    let outcome = execute_stage(kb, &work.solid, stage)?;
    validate_edit(kb.as_introspect(), &outcome.solid)?;
    let new_faces = kb.list_faces(&outcome.solid);
    let fm = match_faces(
        kb.as_introspect(),
        &old_faces,
        &new_faces,
        &outcome.correspondence,
    )?;

    work.labels = carry(&work.labels, &fm, fill);
    work.bottoms = carry(&work.bottoms, &fm, false);

    // Every stored key collection lives in the old id space; push it
    // through the match before the new solid takes over.
    let forward = fm.forward();
    for group in &mut work.instances {
        group.faces.retain_mut(|f| match forward.get(f) {
            Some(new) => {
                *f = *new;
                true
            }
            None => false,
        });
    }
    work.instances.retain(|g| {
        if g.faces.is_empty() {
            tracing::warn!(kind = g.kind.name(), "instance group lost all faces");
            false
        } else {
            true
        }
    });
    fresh.retain_mut(|f| match forward.get(f) {
        Some(new) => {
            *f = *new;
            true
        }
        None => false,
    });
    fresh.extend(fm.unmatched_new.iter().copied());

    work.solid = outcome.solid;
    Ok(())
}
