//! Feature parameter sampling.
//!
//! One retry policy drives every feature type: draw candidate regions
//! with replacement, one draw per region in the pool, and for each draw
//! shift it, measure the depth room, and hand the placement to the
//! type-specific builder. The first builder success wins; running out
//! of draws is a feature-local failure the caller is expected to skip.

use kernel_api::{EdgeKey, SurfaceMesh};
use rand::Rng;
use swarf_types::{Bound, DepthKind, FeatureKind, GenConfig, Shifter};

use crate::types::{DepthBudget, FeaturePlan, SampleError};
use crate::{additive, gears, holes, pockets, slots, steps, transitions};

/// Uniform draw from an inclusive interval. A collapsed interval yields
/// its single point; an inverted one yields `None`.
pub(crate) fn draw_in<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> Option<f64> {
    if hi < lo {
        None
    } else if hi - lo < 1e-12 {
        Some(lo)
    } else {
        Some(rng.gen_range(lo..=hi))
    }
}

/// Sample a bound-placed feature against the candidate regions.
pub fn sample_feature<R: Rng>(
    kind: FeatureKind,
    bounds: &[Bound],
    bbox: [f64; 6],
    mesh: &SurfaceMesh,
    cfg: &GenConfig,
    rng: &mut R,
) -> Result<FeaturePlan, SampleError> {
    if bounds.is_empty() {
        return Err(SampleError::BoundInfeasible { kind });
    }

    let mut depth_starved = false;
    for _ in 0..bounds.len() {
        let idx = rng.gen_range(0..bounds.len());
        let Some(placed) = apply_shifter(&bounds[idx], kind.shifter(), cfg, rng) else {
            continue;
        };
        if placed.width() < cfg.min_len || placed.height() < cfg.min_len {
            continue;
        }
        let budget = measure_depth(&placed, bbox, mesh);
        if kind.depth_kind() == DepthKind::Blind
            && !kind.is_additive()
            && budget.blind_interval(cfg).is_none()
        {
            depth_starved = true;
            continue;
        }
        if let Some(plan) = build_plan(kind, &placed, &budget, cfg, rng) {
            tracing::debug!(kind = kind.name(), stages = plan.stages.len(), "sampled feature");
            return Ok(plan);
        }
    }

    if depth_starved {
        Err(SampleError::DepthInfeasible { kind })
    } else {
        Err(SampleError::BoundInfeasible { kind })
    }
}

/// Sample an edge transition from the current edge list.
pub fn sample_transition<R: Rng>(
    kind: FeatureKind,
    edges: &[(EdgeKey, f64)],
    cfg: &GenConfig,
    rng: &mut R,
) -> Result<FeaturePlan, SampleError> {
    transitions::sample(kind, edges, cfg, rng)
}

/// Depth room behind a placement: stock extent along the normal, and
/// the ray-measured wall thickness under the placement center.
fn measure_depth(placed: &Bound, bbox: [f64; 6], mesh: &SurfaceMesh) -> DepthBudget {
    let n = placed.normal;
    let ext = [bbox[3] - bbox[0], bbox[4] - bbox[1], bbox[5] - bbox[2]];
    let through = (ext[0] * n.x).abs() + (ext[1] * n.y).abs() + (ext[2] * n.z).abs();
    let blind_max = mesh.ray_depth(placed.center(), -n).unwrap_or(through);
    DepthBudget { through, blind_max }
}

fn apply_shifter<R: Rng>(
    bound: &Bound,
    shifter: Shifter,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<Bound> {
    let (w, h) = (bound.width(), bound.height());
    let need = cfg.min_len + 2.0 * cfg.clearance;
    match shifter {
        Shifter::None => Some(bound.clone()),
        Shifter::Center => {
            let icl = cfg.inner_bounds_clearance;
            let (aw, ah) = (w - 2.0 * icl, h - 2.0 * icl);
            if aw < need || ah < need {
                return None;
            }
            let sw = draw_in(rng, need, aw)?;
            let sh = draw_in(rng, need, ah)?;
            let ou = icl + draw_in(rng, 0.0, aw - sw)?;
            let ov = icl + draw_in(rng, 0.0, ah - sh)?;
            Some(bound.sub_rect(ou / w, ov / h, (ou + sw) / w, (ov + sh) / h))
        }
        Shifter::Band => {
            if h < need {
                return None;
            }
            let sh = draw_in(rng, need, h)?;
            let ov = draw_in(rng, 0.0, h - sh)?;
            Some(bound.sub_rect(0.0, ov / h, 1.0, (ov + sh) / h))
        }
        Shifter::EdgeAnchor => {
            if h < need {
                return None;
            }
            let t = draw_in(rng, need, (h / 2.0).max(need))?;
            if rng.gen_bool(0.5) {
                Some(bound.sub_rect(0.0, 0.0, 1.0, t / h))
            } else {
                Some(bound.sub_rect(0.0, 1.0 - t / h, 1.0, 1.0))
            }
        }
    }
}

fn build_plan<R: Rng>(
    kind: FeatureKind,
    placed: &Bound,
    budget: &DepthBudget,
    cfg: &GenConfig,
    rng: &mut R,
) -> Option<FeaturePlan> {
    use FeatureKind::*;
    match kind {
        ThroughHole => holes::through_hole(placed, cfg, rng),
        BlindHole => holes::blind_hole(placed, budget, cfg, rng),
        Counterbore => holes::counterbore(placed, budget, cfg, rng),
        CountersunkHole => holes::countersunk_hole(placed, budget, cfg, rng),
        ThreadedHole => holes::threaded_hole(placed, budget, cfg, rng),
        TriangularPassage | RectangularPassage | SixSidesPassage | TriangularPocket
        | RectangularPocket | SixSidesPocket | CircularEndPocket | ORing => {
            pockets::build(kind, placed, budget, cfg, rng)
        }
        TriangularThroughSlot | RectangularThroughSlot | CircularThroughSlot
        | RectangularBlindSlot | VCircularEndBlindSlot | HCircularEndBlindSlot => {
            slots::build(kind, placed, budget, cfg, rng)
        }
        RectangularThroughStep | TwoSidesThroughStep | SlantedThroughStep
        | TriangularBlindStep | CircularBlindStep | RectangularBlindStep => {
            steps::build(kind, placed, budget, cfg, rng)
        }
        Boss | Rib | Stud => additive::build(kind, placed, budget, cfg, rng),
        SpurGear => gears::spur_gear(placed, budget, cfg, rng),
        // Transitions are edge-sampled; stock is never sampled.
        Chamfer | Round | VariableRound | Stock => None,
    }
}

/// Cut direction for a placement: into the solid.
pub(crate) fn cut_dir(b: &Bound) -> [f64; 3] {
    [-b.normal.x, -b.normal.y, -b.normal.z]
}

/// Extrusion direction for a placement: out of the solid.
pub(crate) fn grow_dir(b: &Bound) -> [f64; 3] {
    [b.normal.x, b.normal.y, b.normal.z]
}
