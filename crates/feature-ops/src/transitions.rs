//! Edge transitions: chamfer, constant round, and the two-radius
//! variable round. Sampled from the live edge list rather than from
//! placement regions.

use kernel_api::EdgeKey;
use rand::seq::SliceRandom;
use rand::Rng;
use swarf_types::{FeatureKind, GenConfig};

use crate::sampler::draw_in;
use crate::types::{FeaturePlan, SampleError, Stage};

pub(crate) fn sample<R: Rng>(
    kind: FeatureKind,
    edges: &[(EdgeKey, f64)],
    cfg: &GenConfig,
    rng: &mut R,
) -> Result<FeaturePlan, SampleError> {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.shuffle(rng);

    for idx in order {
        let (edge, len) = edges[idx];
        if len < cfg.min_len {
            continue;
        }
        // Transitions must stay well clear of the edge's ends.
        let cap = len / 3.0;
        let stage = match kind {
            FeatureKind::Chamfer => draw_in(rng, cfg.chamfer_depth[0], cfg.chamfer_depth[1].min(cap))
                .map(|distance| Stage::Chamfer { edge, distance }),
            FeatureKind::Round => draw_in(rng, cfg.round_radius[0], cfg.round_radius[1].min(cap))
                .map(|r| Stage::Fillet { edge, r1: r, r2: r }),
            FeatureKind::VariableRound => {
                let lo = cfg.variable_round_radius[0];
                let hi = cfg.variable_round_radius[1].min(cap);
                match (draw_in(rng, lo, hi), draw_in(rng, lo, hi)) {
                    (Some(r1), Some(r2)) => Some(Stage::Fillet { edge, r1, r2 }),
                    _ => None,
                }
            }
            _ => None,
        };
        if let Some(stage) = stage {
            return Ok(FeaturePlan {
                kind,
                stages: vec![stage],
            });
        }
    }
    Err(SampleError::EdgeInfeasible { kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chamfer_distance_capped_by_edge_length() {
        let cfg = GenConfig::default();
        let edges = vec![(EdgeKey(1), 6.0)];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = sample(FeatureKind::Chamfer, &edges, &cfg, &mut rng).unwrap();
            let Stage::Chamfer { distance, .. } = &plan.stages[0] else {
                panic!("chamfer plan holds a chamfer stage");
            };
            assert!(*distance >= cfg.chamfer_depth[0]);
            assert!(*distance <= 2.0);
        }
    }

    #[test]
    fn short_edges_are_unusable() {
        let cfg = GenConfig::default();
        let edges = vec![(EdgeKey(1), 0.5), (EdgeKey(2), 1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let err = sample(FeatureKind::Round, &edges, &cfg, &mut rng).unwrap_err();
        assert!(matches!(err, SampleError::EdgeInfeasible { .. }));
    }

    #[test]
    fn variable_round_draws_independent_radii() {
        let cfg = GenConfig::default();
        let edges = vec![(EdgeKey(3), 12.0)];
        let mut rng = StdRng::seed_from_u64(17);
        let mut saw_unequal = false;
        for _ in 0..16 {
            let plan = sample(FeatureKind::VariableRound, &edges, &cfg, &mut rng).unwrap();
            let Stage::Fillet { r1, r2, .. } = &plan.stages[0] else {
                panic!("variable round holds a fillet stage");
            };
            if (r1 - r2).abs() > 1e-6 {
                saw_unequal = true;
            }
        }
        assert!(saw_unequal);
    }
}
