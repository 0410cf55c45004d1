//! Step features. The placement is a strip anchored to one edge of the
//! host region; the cut removes material from that edge inward.

use rand::Rng;
use swarf_types::{Bound, FeatureKind, GenConfig};

use crate::profiles;
use crate::sampler::{cut_dir, draw_in};
use crate::types::{DepthBudget, FeaturePlan, Stage};

/// Segments for the rounded blind-step front.
const ARC_SEGMENTS: usize = 8;

pub(crate) fn build<R: Rng>(
    kind: FeatureKind,
    b: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    use FeatureKind::*;

    let stages = match kind {
        RectangularThroughStep => {
            vec![cut(b, profiles::rect(b, 0.0, 0.0, 1.0, 1.0), None)]
        }
        TwoSidesThroughStep => {
            // Bites at both ends of the strip.
            let t = draw_in(rng, 0.2, 0.4)?;
            vec![
                cut(b, profiles::rect(b, 0.0, 0.0, t, 1.0), None),
                cut(b, profiles::rect(b, 1.0 - t, 0.0, 1.0, 1.0), None),
            ]
        }
        SlantedThroughStep => {
            let v_left = draw_in(rng, 0.3, 1.0)?;
            let v_right = draw_in(rng, 0.3, 1.0)?;
            vec![cut(b, profiles::slant_quad(b, v_left, v_right), None)]
        }
        RectangularBlindStep => {
            let (lo, hi) = budget.blind_interval(cfg)?;
            let d = draw_in(rng, lo, hi)?;
            vec![cut(b, profiles::rect(b, 0.0, 0.0, 1.0, 1.0), Some(d))]
        }
        TriangularBlindStep => {
            let (lo, hi) = budget.blind_interval(cfg)?;
            let d = draw_in(rng, lo, hi)?;
            vec![cut(b, profiles::triangle(b, 0.0, 0.0, 1.0, 1.0), Some(d))]
        }
        CircularBlindStep => {
            let (lo, hi) = budget.blind_interval(cfg)?;
            let d = draw_in(rng, lo, hi)?;
            vec![cut(b, rounded_front(b), Some(d))]
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

/// Strip with a bulged front edge: straight along the anchored edge,
/// circular arc on the inward side.
fn rounded_front(b: &Bound) -> swarf_types::SketchLoop {
    let mut vertices = vec![b.point_at(0.0, 0.0), b.point_at(1.0, 0.0)];
    for i in 0..=ARC_SEGMENTS {
        let theta = std::f64::consts::PI * i as f64 / ARC_SEGMENTS as f64;
        let u = 0.5 + 0.5 * theta.cos();
        let v = theta.sin();
        vertices.push(b.point_at(u, v));
    }
    profiles::polygon(vertices, b.normal)
}
