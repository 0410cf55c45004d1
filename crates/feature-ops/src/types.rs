use kernel_api::EdgeKey;
use swarf_types::{FeatureKind, GenConfig, SketchLoop};

/// One kernel edit inside a feature application.
#[derive(Debug, Clone)]
pub enum Stage {
    Prism {
        profile: SketchLoop,
        direction: [f64; 3],
        /// `None` sweeps through the whole solid.
        depth: Option<f64>,
        additive: bool,
    },
    Fillet {
        edge: EdgeKey,
        r1: f64,
        r2: f64,
    },
    Chamfer {
        edge: EdgeKey,
        distance: f64,
    },
}

/// A fully parameterized feature, ready to execute stage by stage.
#[derive(Debug, Clone)]
pub struct FeaturePlan {
    pub kind: FeatureKind,
    pub stages: Vec<Stage>,
}

/// Depth room available at a placement, measured before sampling.
#[derive(Debug, Clone, Copy)]
pub struct DepthBudget {
    /// Stock extent along the placement normal; a through cut spans this.
    pub through: f64,
    /// Distance from the placement center to the first surface behind
    /// it. Blind features must stop short of this.
    pub blind_max: f64,
}

impl DepthBudget {
    /// Inclusive feasible interval for a blind depth, or `None` when the
    /// wall behind the placement is too thin.
    pub fn blind_interval(&self, cfg: &GenConfig) -> Option<(f64, f64)> {
        let hi = self.blind_max - cfg.clearance;
        (hi >= cfg.min_len).then_some((cfg.min_len, hi))
    }
}

/// Why a feature could not be parameterized.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SampleError {
    #[error("{} does not fit any candidate region", kind.name())]
    BoundInfeasible { kind: FeatureKind },

    #[error("no feasible depth for {}", kind.name())]
    DepthInfeasible { kind: FeatureKind },

    #[error("no usable edge for {}", kind.name())]
    EdgeInfeasible { kind: FeatureKind },
}

/// Errors from executing a stage against the kernel.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] kernel_api::KernelError),
}
