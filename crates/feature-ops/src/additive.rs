//! Material-adding features: boss, rib, and the fluted stud.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in, grow_dir};
use crate::types::{DepthBudget, FeaturePlan, Stage};

const STUD_FLUTES: usize = 4;

pub(crate) fn build<R: Rng>(
    kind: FeatureKind,
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    match kind {
        FeatureKind::Boss => boss(b, budget, cfg, rng),
        FeatureKind::Rib => rib(b, budget, cfg, rng),
        FeatureKind::Stud => stud(b, budget, cfg, rng),
        _ => None,
    }
}

fn boss<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let r = draw_in(rng, cfg.min_len / 2.0, b.max_radius() - cfg.clearance)?;
    let height = draw_in(rng, cfg.min_len, budget.through)?;
    Some(FeaturePlan {
        kind: FeatureKind::Boss,
        stages: vec![Stage::Prism {
            profile: profiles::circle(b, 0.5, 0.5, r),
            direction: grow_dir(b),
            depth: Some(height),
            additive: true,
        }],
    })
}

/// Triangular ridge across the full region: the cross-section triangle
/// stands in a plane perpendicular to the face and is swept along the
/// region's width axis.
fn rib<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let h = b.height();
    if h < cfg.min_len + 2.0 * cfg.clearance {
        return None;
    }
    let thickness = draw_in(rng, cfg.min_len, (h / 4.0).max(cfg.min_len))?;
    let height = draw_in(rng, cfg.min_len, (budget.through / 2.0).max(cfg.min_len))?;
    let vc = draw_in(rng, cfg.clearance / h, 1.0 - (cfg.clearance + thickness) / h)?;
    let tv = thickness / h;

    let n = b.normal;
    let vertices = vec![
        b.point_at(0.0, vc),
        b.point_at(0.0, vc + tv),
        b.point_at(0.0, vc + tv / 2.0) + n * height,
    ];
    let d = b.dir_w().normalize();
    Some(FeaturePlan {
        kind: FeatureKind::Rib,
        stages: vec![Stage::Prism {
            profile: profiles::polygon(vertices, d),
            direction: [d.x, d.y, d.z],
            depth: Some(b.width()),
            additive: true,
        }],
    })
}

/// Cylinder with vertical flutes notched from its top rim, a coarse
/// stand-in for a threaded stud.
fn stud<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let r = draw_in(rng, cfg.min_len / 2.0, b.max_radius() - cfg.clearance)?;
    let scale = draw_in(rng, cfg.stud_height_scale[0], cfg.stud_height_scale[1])?;
    let height = scale * budget.through;
    if height < cfg.min_len {
        return None;
    }

    let mut stages = vec![Stage::Prism {
        profile: profiles::circle(b, 0.5, 0.5, r),
        direction: grow_dir(b),
        depth: Some(height),
        additive: true,
    }];

    let top = b.point_at(0.5, 0.5) + b.normal * height;
    for i in 0..STUD_FLUTES {
        let theta = 2.0 * std::f64::consts::PI * i as f64 / STUD_FLUTES as f64;
        stages.push(Stage::Prism {
            profile: profiles::radial_notch(top, b.normal, theta, r * 0.8, r * 1.05, r * 0.1),
            direction: cut_dir(b),
            depth: Some(height),
            additive: false,
        });
    }
    Some(FeaturePlan {
        kind: FeatureKind::Stud,
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use swarf_types::SketchLoop;

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
    fn boss_radius_spans_feasible_interval() {
        let cfg = GenConfig::default();
        let budget = DepthBudget {
            through: 10.0,
            blind_max: 10.0,
        };
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = boss(&bound(20.0), &budget, &cfg, &mut rng).unwrap();
            let Stage::Prism {
                profile: SketchLoop::Circle { radius, .. },
                additive,
                ..
            } = &plan.stages[0]
            else {
                panic!("boss is a circular prism");
            };
            assert!(*additive);
            // [min_len/2, max_radius - clearance] on a 20x20 region
            assert!(*radius >= 1.0 && *radius <= 9.0);
        }
    }

    #[test]
    fn stud_flutes_follow_the_cylinder() {
        let cfg = GenConfig::default();
        let budget = DepthBudget {
            through: 10.0,
            blind_max: 10.0,
        };
        let mut rng = StdRng::seed_from_u64(21);
        let plan = stud(&bound(20.0), &budget, &cfg, &mut rng).unwrap();
        assert_eq!(plan.stages.len(), 1 + STUD_FLUTES);
        let Stage::Prism { additive, .. } = &plan.stages[0] else {
            panic!();
        };
        assert!(*additive);
        for s in &plan.stages[1..] {
            let Stage::Prism { additive, .. } = s else { panic!() };
            assert!(!*additive);
        }
    }

    #[test]
    fn rib_sweeps_across_the_region() {
        let cfg = GenConfig::default();
        let budget = DepthBudget {
            through: 10.0,
            blind_max: 10.0,
        };
        let mut rng = StdRng::seed_from_u64(8);
        let plan = rib(&bound(20.0), &budget, &cfg, &mut rng).unwrap();
        let Stage::Prism { depth: Some(d), direction, .. } = &plan.stages[0] else {
            panic!("rib is a finite prism");
        };
        assert!((d - 20.0).abs() < 1e-9);
        assert!((direction[0] - 1.0).abs() < 1e-9);
    }
}
