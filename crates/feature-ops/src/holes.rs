//! Circular hole features: plain holes, two-stage bores, and the
//! flute-approximated threaded hole.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in};
use crate::types::{DepthBudget, FeaturePlan, Stage};

const THREAD_FLUTES: usize = 4;

fn circle_cut(b: &Bound, radius: f64, depth: Option<f64>) -> Stage {
    Stage::Prism {
        profile: profiles::circle(b, 0.5, 0.5, radius),
        direction: cut_dir(b),
        depth,
        additive: false,
    }
}

pub(crate) fn through_hole<R: Rng>(
    b: &Bound,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let r = draw_in(rng, cfg.min_len / 2.0, b.max_radius() - cfg.clearance)?;
    Some(FeaturePlan {
        kind: FeatureKind::ThroughHole,
        stages: vec![circle_cut(b, r, None)],
    })
}

pub(crate) fn blind_hole<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let r = draw_in(rng, cfg.min_len / 2.0, b.max_radius() - cfg.clearance)?;
    let (lo, hi) = budget.blind_interval(cfg)?;
    let depth = draw_in(rng, lo, hi)?;
    Some(FeaturePlan {
        kind: FeatureKind::BlindHole,
        stages: vec![circle_cut(b, r, Some(depth))],
    })
}

/// Wide shallow bore followed by the narrow through hole.
pub(crate) fn counterbore<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let max_r = b.max_radius();
    let r_inner = draw_in(rng, cfg.min_len / 2.0, max_r - cfg.clearance * 2.0)?;
    let r_outer = draw_in(rng, r_inner + cfg.clearance, max_r - cfg.clearance)?;
    let bore_hi = (budget.blind_max - cfg.clearance).min(budget.through - cfg.min_len - cfg.clearance);
    let bore_depth = draw_in(rng, cfg.min_len, bore_hi)?;
    Some(FeaturePlan {
        kind: FeatureKind::Counterbore,
        stages: vec![
            circle_cut(b, r_outer, Some(bore_depth)),
            circle_cut(b, r_inner, None),
        ],
    })
}

/// The conical sink is approximated by a shallow cylindrical bore with
/// the cone's footprint; its depth equals the radial step so the
/// implied flank stays near 45 degrees.
pub(crate) fn countersunk_hole<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let max_r = b.max_radius();
    let r_inner = draw_in(rng, cfg.min_len / 2.0, max_r - cfg.clearance * 2.0)?;
    let r_outer = draw_in(rng, r_inner + cfg.clearance, max_r - cfg.clearance)?;
    let sink = r_outer - r_inner;
    if sink > budget.through - cfg.min_len - cfg.clearance || sink > budget.blind_max - cfg.clearance
    {
        return None;
    }
    Some(FeaturePlan {
        kind: FeatureKind::CountersunkHole,
        stages: vec![circle_cut(b, r_outer, Some(sink)), circle_cut(b, r_inner, None)],
    })
}

/// Hole plus rim flutes standing in for the thread crests. The flutes
/// reuse the hole's depth and may individually fail without voiding the
/// feature.
pub(crate) fn threaded_hole<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let scale = draw_in(rng, cfg.thread_profile_scale[0], cfg.thread_profile_scale[1])?;
    let r_max = (b.max_radius() - cfg.clearance) * scale;
    let r = draw_in(rng, cfg.min_len / 2.0, r_max)?;
    let crest = r / scale;

    let depth = match budget.blind_interval(cfg) {
        Some((lo, hi)) if rng.gen_bool(0.5) => Some(draw_in(rng, lo, hi)?),
        _ => None,
    };

    let mut stages = vec![circle_cut(b, r, depth)];
    let center = b.point_at(0.5, 0.5);
    let groove = crest - r;
    for i in 0..THREAD_FLUTES {
        let theta = 2.0 * std::f64::consts::PI * i as f64 / THREAD_FLUTES as f64;
        stages.push(Stage::Prism {
            profile: profiles::radial_notch(center, b.normal, theta, r - groove, crest, groove / 2.0),
            direction: cut_dir(b),
            depth,
            additive: false,
        });
    }
    Some(FeaturePlan {
        kind: FeatureKind::ThreadedHole,
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bound(side: f64) -> Bound {
        Bound::new(
            [
                Point3::new(0.0, side, 10.0),
                Point3::new(0.0, 0.0, 10.0),
                Point3::new(side, 0.0, 10.0),
                Point3::new(side, side, 10.0),
            ],
            Vector3::z(),
        )
        .unwrap()
    }

    #[test]
    fn threaded_hole_has_main_cut_and_flutes() {
        let cfg = GenConfig::default();
        let budget = DepthBudget {
            through: 10.0,
            blind_max: 10.0,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let plan = threaded_hole(&bound(20.0), &budget, &cfg, &mut rng).unwrap();
        assert_eq!(plan.stages.len(), 1 + THREAD_FLUTES);
        // all stages share the main cut's depth
        let depths: Vec<Option<f64>> = plan
            .stages
            .iter()
            .map(|s| match s {
                Stage::Prism { depth, .. } => *depth,
                _ => panic!("threaded hole stages are prisms"),
            })
            .collect();
        assert!(depths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn countersink_rejected_when_wall_too_thin() {
        let cfg = GenConfig::default();
        let budget = DepthBudget {
            through: 3.5,
            blind_max: 3.5,
        };
        let mut rng = StdRng::seed_from_u64(5);
        // any sink depth would eat into the through hole's minimum
        for _ in 0..16 {
            if let Some(plan) = countersunk_hole(&bound(30.0), &budget, &cfg, &mut rng) {
                let Stage::Prism { depth: Some(d), .. } = &plan.stages[0] else {
                    panic!("sink stage must be blind");
                };
                assert!(*d <= budget.through - cfg.min_len - cfg.clearance);
            }
        }
    }
}
