//! Slot features. The placement is a full-width band across the host
//! region. Through slots are cut across the band with a cross-section
//! profile swept along the band axis; blind slots are sunk from the
//! surface with a top-opening profile.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in};
use crate::types::{DepthBudget, FeaturePlan, Stage};

/// Segments for the semicircular slot cross-section.
const ARC_SEGMENTS: usize = 8;

pub(crate) fn build<R: Rng>(
    kind: FeatureKind,
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    use FeatureKind::*;
    let (lo, hi) = budget.blind_interval(cfg)?;
    let depth = draw_in(rng, lo, hi)?;

    let (w, h) = (b.width(), b.height());
    let mv = cfg.clearance / h;

    let stage = match kind {
        RectangularThroughSlot => cross_section_rect(b, mv, depth),
        TriangularThroughSlot => cross_section_triangle(b, mv, depth),
        CircularThroughSlot => {
            let r = ((h - 2.0 * cfg.clearance) / 2.0).min(depth);
            if r < cfg.min_len / 2.0 {
                return None;
            }
            cross_section_semicircle(b, r)
        }
        RectangularBlindSlot => Stage::Prism {
            profile: profiles::rect(b, 0.0, mv, 1.0, 1.0 - mv),
            direction: cut_dir(b),
            depth: Some(depth),
            additive: false,
        },
        VCircularEndBlindSlot | HCircularEndBlindSlot => {
            let r = draw_in(rng, cfg.min_len / 2.0, h / 2.0 - cfg.clearance)?;
            let span = (cfg.clearance + r) / w;
            if 1.0 - span <= span {
                return None;
            }
            // The h variant rounds both ends; the v variant keeps one
            // end square against the band edge.
            let both_ends = kind == HCircularEndBlindSlot;
            let u0 = if both_ends { span } else { 0.0 };
            Stage::Prism {
                profile: profiles::stadium(b, u0, 1.0 - span, 0.5, r, both_ends),
                direction: cut_dir(b),
                depth: Some(depth),
                additive: false,
            }
        }
        _ => return None,
    };
    Some(FeaturePlan {
        kind,
        stages: vec![stage],
    })
}

/// Sweep direction along the band.
fn along(b: &Bound) -> [f64; 3] {
    let d = b.dir_w().normalize();
    [d.x, d.y, d.z]
}

fn cross_section_rect(b: &Bound, mv: f64, depth: f64) -> Stage {
    let n = b.normal;
    let vertices = vec![
        b.point_at(0.0, mv),
        b.point_at(0.0, 1.0 - mv),
        b.point_at(0.0, 1.0 - mv) - n * depth,
        b.point_at(0.0, mv) - n * depth,
    ];
    Stage::Prism {
        profile: profiles::polygon(vertices, b.dir_w().normalize()),
        direction: along(b),
        depth: None,
        additive: false,
    }
}

fn cross_section_triangle(b: &Bound, mv: f64, depth: f64) -> Stage {
    let n = b.normal;
    let vertices = vec![
        b.point_at(0.0, mv),
        b.point_at(0.0, 1.0 - mv),
        b.point_at(0.0, 0.5) - n * depth,
    ];
    Stage::Prism {
        profile: profiles::polygon(vertices, b.dir_w().normalize()),
        direction: along(b),
        depth: None,
        additive: false,
    }
}

fn cross_section_semicircle(b: &Bound, radius: f64) -> Stage {
    let n = b.normal;
    let (_, h) = (b.width(), b.height());
    let rv = radius / h;
    // Flat chord at the surface, arc dipping into the stock.
    let mut vertices = vec![b.point_at(0.0, 0.5 + rv)];
    for i in 1..ARC_SEGMENTS {
        let theta = std::f64::consts::PI * i as f64 / ARC_SEGMENTS as f64;
        vertices.push(b.point_at(0.0, 0.5 + rv * theta.cos()) - n * (radius * theta.sin()));
    }
    vertices.push(b.point_at(0.0, 0.5 - rv));
    Stage::Prism {
        profile: profiles::polygon(vertices, b.dir_w().normalize()),
        direction: along(b),
        depth: None,
        additive: false,
    }
}
