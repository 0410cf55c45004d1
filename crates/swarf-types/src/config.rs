use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Generation parameters for a dataset run.
///
/// Every field has a default tuned for stock boxes in the 10..50 unit
/// range; callers usually override only `stock_min`/`stock_max` and the
/// feature count range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Per-axis lower corner of the stock dimension range.
    pub stock_min: [f64; 3],
    /// Per-axis upper corner of the stock dimension range.
    pub stock_max: [f64; 3],
    /// Smallest meaningful dimension of any sampled feature.
    pub min_len: f64,
    /// Gap kept between a feature and the boundary of its region, and
    /// between nested profiles of two-stage features.
    pub clearance: f64,
    /// Extra margin pulled in from region edges before center shifting.
    pub inner_bounds_clearance: f64,
    /// Radius range for round transitions, inclusive bounds.
    pub round_radius: [f64; 2],
    /// Per-end radius range for variable rounds.
    pub variable_round_radius: [f64; 2],
    /// Setback range for chamfer transitions.
    pub chamfer_depth: [f64; 2],
    /// Thread groove radius as a fraction of the hole/stud radius.
    pub thread_profile_scale: [f64; 2],
    /// Stud height as a fraction of the feasible extrusion height.
    pub stud_height_scale: [f64; 2],
    /// Tooth count range for spur gears.
    pub gear_teeth: [u32; 2],
    /// Gear module (pitch diameter per tooth) range.
    pub gear_module: [f64; 2],
    /// Features per part, inclusive bounds.
    pub combo_len: [usize; 2],
    /// Chordal tolerance handed to the kernel tessellator.
    pub triangulation_tol: f64,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            stock_min: [10.0, 10.0, 10.0],
            stock_max: [50.0, 50.0, 50.0],
            min_len: 2.0,
            clearance: 1.0,
            inner_bounds_clearance: 2.0,
            round_radius: [0.1, 5.0],
            variable_round_radius: [0.1, 5.0],
            chamfer_depth: [0.1, 4.0],
            thread_profile_scale: [0.5, 0.9],
            stud_height_scale: [0.5, 1.0],
            gear_teeth: [8, 32],
            gear_module: [1.0, 3.0],
            combo_len: [1, 10],
            triangulation_tol: 0.1,
        }
    }
}

impl GenConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: GenConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in 0..3 {
            if self.stock_min[axis] <= 0.0 || self.stock_max[axis] < self.stock_min[axis] {
                return Err(ConfigError::Invalid(format!(
                    "stock range on axis {axis} is empty or non-positive"
                )));
            }
        }
        if self.min_len <= 0.0 {
            return Err(ConfigError::Invalid("min_len must be positive".into()));
        }
        if self.clearance < 0.0 {
            return Err(ConfigError::Invalid("clearance must be non-negative".into()));
        }
        for (name, range) in [
            ("round_radius", self.round_radius),
            ("variable_round_radius", self.variable_round_radius),
            ("chamfer_depth", self.chamfer_depth),
            ("thread_profile_scale", self.thread_profile_scale),
            ("stud_height_scale", self.stud_height_scale),
            ("gear_module", self.gear_module),
        ] {
            if range[0] <= 0.0 || range[1] < range[0] {
                return Err(ConfigError::Invalid(format!("{name} range is empty")));
            }
        }
        if self.gear_teeth[0] < 3 || self.gear_teeth[1] < self.gear_teeth[0] {
            return Err(ConfigError::Invalid("gear_teeth range is empty".into()));
        }
        if self.combo_len[0] == 0 || self.combo_len[1] < self.combo_len[0] {
            return Err(ConfigError::Invalid("combo_len range is empty".into()));
        }
        if self.triangulation_tol <= 0.0 {
            return Err(ConfigError::Invalid(
                "triangulation_tol must be positive".into(),
            ));
        }
        Ok(())
    }
}
