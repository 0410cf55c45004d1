//! Part generation driver: draw a combination, order it canonically,
//! and apply it feature by feature against a fresh stock box. Feature
//! failures are skipped; a whole-part failure restarts with a new stock
//! draw, up to a small attempt budget.

use kernel_api::EdgeKey;
use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use feature_ops::{sample_feature, sample_transition, KernelBundle};

use crate::apply::apply_feature;
use crate::combination::{canonical_order, random_combination};
use crate::state::PartState;
use crate::types::ApplyError;

/// A finished part: the final labeled state plus the combination that
/// was scheduled for it. `state.applied` records what actually landed.
#[derive(Debug)]
pub struct GeneratedPart {
    pub state: PartState,
    pub combination: Vec<FeatureKind>,
}

/// Generate one part. Returns `None` when every attempt within the
/// budget failed at the part level.
pub fn generate_part<R: Rng>(
    kb: &mut dyn KernelBundle,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<GeneratedPart> {
    let mut combo = random_combination(cfg, rng);
    canonical_order(&mut combo);

    let budget = combo.len() + 1;
    for attempt in 0..budget {
        match build_once(kb, cfg, &combo, rng) {
            Ok(part) => return Some(part),
            Err(err) => {
                tracing::warn!(attempt, error = %err, "part attempt discarded");
            }
        }
    }
    None
}

/// One whole-part attempt: fresh stock, then the full combination.
/// Feature-level failures skip the feature; errors returned here discard
/// the attempt.
fn build_once<R: Rng>(
    kb: &mut dyn KernelBundle,
    cfg: &GenConfig,
    combo: &[FeatureKind],
    rng: &mut R,
) -> Result<GeneratedPart, ApplyError> {
    let dims = [
        rng.gen_range(cfg.stock_min[0]..=cfg.stock_max[0]),
        rng.gen_range(cfg.stock_min[1]..=cfg.stock_max[1]),
        rng.gen_range(cfg.stock_min[2]..=cfg.stock_max[2]),
    ];
    let solid = kb.make_box(dims)?;
    let mut state = PartState::stock(kb.as_introspect(), solid);

    // Placement regions are discovered lazily and reused until a feature
    // that opens or removes whole faces forces a fresh pass.
    let mut regions: Option<Vec<Bound>> = None;

    for &kind in combo {
        if kind.is_edge_based() {
            let edges: Vec<(EdgeKey, f64)> = kb
                .list_edges(&state.solid)
                .into_iter()
                .filter_map(|e| kb.edge_length(e).map(|len| (e, len)))
                .collect();
            if !edges.iter().any(|(_, len)| *len >= cfg.min_len) {
                // Transitions sort last, so nothing schedulable remains.
                tracing::debug!("no usable edges left, ending combination");
                break;
            }
            let plan = match sample_transition(kind, &edges, cfg, rng) {
                Ok(plan) => plan,
                Err(err) => {
                    tracing::debug!(kind = kind.name(), error = %err, "transition skipped");
                    continue;
                }
            };
            match apply_feature(kb, &state, &plan) {
                Ok(next) => state = next,
                Err(err) => {
                    tracing::warn!(kind = kind.name(), error = %err, "transition failed");
                }
            }
            continue;
        }

        let mesh = kb.triangulate(&state.solid, cfg.triangulation_tol)?;
        let bbox = kb.bounding_box(&state.solid);
        if regions.is_none() {
            regions = Some(kb.discover_regions(&state.solid));
        }
        let bounds = regions.as_deref().unwrap_or(&[]);
        let plan = match sample_feature(kind, bounds, bbox, &mesh, cfg, rng) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::debug!(kind = kind.name(), error = %err, "feature skipped");
                continue;
            }
        };
        match apply_feature(kb, &state, &plan) {
            Ok(next) => {
                state = next;
                if kind.forces_bound_rediscovery() {
                    regions = Some(kb.discover_regions(&state.solid));
                }
            }
            Err(err) => {
                tracing::warn!(kind = kind.name(), error = %err, "feature failed");
            }
        }
    }

    Ok(GeneratedPart {
        state,
        combination: combo.to_vec(),
    })
}
