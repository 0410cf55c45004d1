//! Pocket and passage features: polygonal cutouts, the circular-end
//! pocket, and the o-ring groove.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in};
use crate::types::{DepthBudget, FeaturePlan, Stage};

pub(crate) fn build<R: Rng>(
    kind: FeatureKind,
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    use FeatureKind::*;
    let depth = match kind {
        TriangularPassage | RectangularPassage | SixSidesPassage => None,
        _ => {
            let (lo, hi) = budget.blind_interval(cfg)?;
            Some(draw_in(rng, lo, hi)?)
        }
    };

    // Clearance margins in normalized coordinates.
    let (w, h) = (b.width(), b.height());
    let (mu, mv) = (cfg.clearance / w, cfg.clearance / h);

    let stages = match kind {
        TriangularPassage | TriangularPocket => {
            vec![cut(b, profiles::triangle(b, mu, mv, 1.0 - mu, 1.0 - mv), depth)]
        }
        RectangularPassage | RectangularPocket => {
            vec![cut(b, profiles::rect(b, mu, mv, 1.0 - mu, 1.0 - mv), depth)]
        }
        SixSidesPassage | SixSidesPocket => {
            let r = b.max_radius() - cfg.clearance;
            if r < cfg.min_len / 2.0 {
                return None;
            }
            vec![cut(b, profiles::hexagon(b, 0.5, 0.5, r), depth)]
        }
        CircularEndPocket => {
            let r = draw_in(rng, cfg.min_len / 2.0, h / 2.0 - cfg.clearance)?;
            let span = (cfg.clearance + r) / w;
            if 1.0 - span <= span {
                return None;
            }
            vec![cut(b, profiles::stadium(b, span, 1.0 - span, 0.5, r, true), depth)]
        }
        ORing => {
            let r_outer = draw_in(rng, cfg.min_len / 2.0 + cfg.clearance, b.max_radius() - cfg.clearance)?;
            let r_inner = draw_in(rng, cfg.min_len / 2.0, r_outer - cfg.clearance)?;
            // Cut the outer circle, then fuse the island back to leave a
            // ring-shaped groove.
            vec![
                cut(b, profiles::circle(b, 0.5, 0.5, r_outer), depth),
                Stage::Prism {
                    profile: profiles::circle(b, 0.5, 0.5, r_inner),
                    direction: cut_dir(b),
                    depth,
                    additive: true,
                },
            ]
        }
        _ => return None,
    };
    Some(FeaturePlan { kind, stages })
}

fn cut(b: &Bound, profile: swarf_types::SketchLoop, depth: Option<f64>) -> Stage {
    Stage::Prism {
        profile,
        direction: cut_dir(b),
        depth,
        additive: false,
    }
}
