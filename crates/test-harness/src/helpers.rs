//! PartBuilder and shared harness error type.

use feature_ops::{sample_feature, sample_transition, FeaturePlan, SampleError};
use kernel_api::{EdgeKey, Kernel, KernelError, KernelIntrospect, MockKernel};
use label_format::{extract_labels, sidecar_json, PartLabels};
use rand::rngs::StdRng;
use rand::SeedableRng;
use swarf_types::{FeatureKind, GenConfig};
use synth_engine::{apply_feature, generate_part, ApplyError, GeneratedPart, PartState};

/// Errors raised by harness helpers and assertions.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("no stock created yet")]
    NoStock,

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Scripted part construction against the mock kernel: make stock,
/// apply chosen features one at a time, extract labels, all with a
/// seeded RNG for reproducible scenarios.
pub struct PartBuilder {
    pub kernel: MockKernel,
    pub cfg: GenConfig,
    rng: StdRng,
    state: Option<PartState>,
}

impl PartBuilder {
    pub fn mock(seed: u64) -> Self {
        Self {
            kernel: MockKernel::new(),
            cfg: GenConfig::default(),
            rng: StdRng::seed_from_u64(seed),
            state: None,
        }
    }

    pub fn with_config(mut self, cfg: GenConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Create the stock box and reset part state.
    pub fn stock(&mut self, dims: [f64; 3]) -> Result<&mut Self, HarnessError> {
        let solid = self.kernel.make_box(dims)?;
        self.state = Some(PartState::stock(&self.kernel, solid));
        Ok(self)
    }

    /// Sample parameters for one feature against the current part.
    /// `Ok(None)` means the feature is infeasible here.
    pub fn sample(&mut self, kind: FeatureKind) -> Result<Option<FeaturePlan>, HarnessError> {
        let state = self.state.as_ref().ok_or(HarnessError::NoStock)?;
        let result = if kind.is_edge_based() {
            let edges = Self::edge_lengths(&self.kernel, state);
            sample_transition(kind, &edges, &self.cfg, &mut self.rng)
        } else {
            let mesh = self
                .kernel
                .triangulate(&state.solid, self.cfg.triangulation_tol)?;
            let bbox = self.kernel.bounding_box(&state.solid);
            let bounds = self.kernel.discover_regions(&state.solid);
            sample_feature(kind, &bounds, bbox, &mesh, &self.cfg, &mut self.rng)
        };
        match result {
            Ok(plan) => Ok(Some(plan)),
            Err(
                SampleError::BoundInfeasible { .. }
                | SampleError::DepthInfeasible { .. }
                | SampleError::EdgeInfeasible { .. },
            ) => Ok(None),
        }
    }

    /// Sample and apply one feature. Returns whether it landed.
    pub fn apply(&mut self, kind: FeatureKind) -> Result<bool, HarnessError> {
        let Some(plan) = self.sample(kind)? else {
            return Ok(false);
        };
        self.apply_plan(&plan)?;
        Ok(true)
    }

    /// Apply an explicit, pre-built plan.
    pub fn apply_plan(&mut self, plan: &FeaturePlan) -> Result<(), HarnessError> {
        let state = self.state.as_ref().ok_or(HarnessError::NoStock)?.clone();
        let next = apply_feature(&mut self.kernel, &state, plan)?;
        self.state = Some(next);
        Ok(())
    }

    /// Run the full randomized generation pipeline instead of a script.
    pub fn generate(&mut self) -> Option<GeneratedPart> {
        generate_part(&mut self.kernel, &self.cfg, &mut self.rng)
    }

    pub fn state(&self) -> Result<&PartState, HarnessError> {
        self.state.as_ref().ok_or(HarnessError::NoStock)
    }

    pub fn labels(&self) -> Result<PartLabels, HarnessError> {
        let state = self.state()?;
        Ok(extract_labels(&self.kernel, state))
    }

    pub fn sidecar(&self) -> Result<String, HarnessError> {
        Ok(sidecar_json(&self.labels()?))
    }

    /// Edges of the current solid that a transition could use.
    pub fn usable_edges(&self) -> Result<Vec<(EdgeKey, f64)>, HarnessError> {
        let state = self.state()?;
        Ok(Self::edge_lengths(&self.kernel, state)
            .into_iter()
            .filter(|(_, len)| *len >= self.cfg.min_len)
            .collect())
    }

    fn edge_lengths(kernel: &MockKernel, state: &PartState) -> Vec<(EdgeKey, f64)> {
        kernel
            .list_edges(&state.solid)
            .into_iter()
            .filter_map(|e| kernel.edge_length(e).map(|len| (e, len)))
            .collect()
    }
}
