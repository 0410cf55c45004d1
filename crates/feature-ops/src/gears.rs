//! Spur gear: an addendum cylinder fused onto the face, then one notch
//! cut per tooth gap around the rim. Tooth-gap cuts may individually
//! fail on a real kernel; the survivors still read as a gear.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in, grow_dir};
use crate::types::{DepthBudget, FeaturePlan, Stage};

pub(crate) fn spur_gear<R: Rng>(
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    let teeth = rng.gen_range(cfg.gear_teeth[0]..=cfg.gear_teeth[1]);
    // tip diameter = module * (teeth + 2) must fit the region
    let avail = b.width().min(b.height()) - cfg.clearance;
    let module_max = cfg.gear_module[1].min(avail / (teeth as f64 + 2.0));
    let module = draw_in(rng, cfg.gear_module[0], module_max)?;

    let r_pitch = module * teeth as f64 / 2.0;
    let r_tip = r_pitch + module;
    let r_root = (r_pitch - 1.25 * module).max(module);
    let height = draw_in(rng, cfg.min_len, budget.through)?;

    let mut stages = vec![Stage::Prism {
        profile: profiles::circle(b, 0.5, 0.5, r_tip),
        direction: grow_dir(b),
        depth: Some(height),
        additive: true,
    }];

    let top = b.point_at(0.5, 0.5) + b.normal * height;
    // Gap half-width: a quarter of the circular pitch.
    let half_gap = std::f64::consts::PI * module / 4.0;
    for i in 0..teeth {
        let theta = 2.0 * std::f64::consts::PI * (i as f64 + 0.5) / teeth as f64;
        stages.push(Stage::Prism {
            profile: profiles::radial_notch(top, b.normal, theta, r_root, r_tip * 1.05, half_gap),
            direction: cut_dir(b),
            depth: Some(height),
            additive: false,
        });
    }
    Some(FeaturePlan {
        kind: FeatureKind::SpurGear,
        stages,
    })
}
