use serde::{Deserialize, Serialize};

use crate::constants::{
    LAYOUT_ANGULAR_DAMPING, LAYOUT_ANGULAR_STRENGTH, LAYOUT_COOLING, LAYOUT_GRID_SIZE, LAYOUT_GRID_SNAP_STRENGTH,
    LAYOUT_ITERATIONS, LAYOUT_LATE_STAGE_FRACTION, LAYOUT_LINK_DISTANCE, LAYOUT_OCTOLINEAR_STRENGTH, LAYOUT_REPULSION,
    LAYOUT_REPULSION_RANGE, LAYOUT_SPRING_STRENGTH, LAYOUT_STRAIGHTEN_STRENGTH, LAYOUT_VELOCITY_DAMPING,
    LAYOUT_WARMUP_FRACTION, VIEW_PADDING,
};

/// Tuning of the force simulation and the view fit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub repulsion: f64,
    pub repulsion_range: f64,
    pub link_distance: f64,
    pub spring_strength: f64,
    pub octolinear_strength: f64,
    pub straighten_strength: f64,
    pub grid_snap_strength: f64,
    pub grid_size: f64,
    pub angular_strength: f64,
    pub angular_damping: f64,
    pub warmup_fraction: f64,
    pub late_stage_fraction: f64,
    pub cooling: f64,
    pub velocity_damping: f64,
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: LAYOUT_ITERATIONS,
            repulsion: LAYOUT_REPULSION,
            repulsion_range: LAYOUT_REPULSION_RANGE,
            link_distance: LAYOUT_LINK_DISTANCE,
            spring_strength: LAYOUT_SPRING_STRENGTH,
            octolinear_strength: LAYOUT_OCTOLINEAR_STRENGTH,
            straighten_strength: LAYOUT_STRAIGHTEN_STRENGTH,
            grid_snap_strength: LAYOUT_GRID_SNAP_STRENGTH,
            grid_size: LAYOUT_GRID_SIZE,
            angular_strength: LAYOUT_ANGULAR_STRENGTH,
            angular_damping: LAYOUT_ANGULAR_DAMPING,
            warmup_fraction: LAYOUT_WARMUP_FRACTION,
            late_stage_fraction: LAYOUT_LATE_STAGE_FRACTION,
            cooling: LAYOUT_COOLING,
            velocity_damping: LAYOUT_VELOCITY_DAMPING,
            padding: VIEW_PADDING,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the grid size is not positive
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse layout config: {e}"))?;
        if config.grid_size <= 0.0 {
            return Err(format!("Grid size must be positive, got {}", config.grid_size));
        }
        Ok(config)
    }

    /// Octolinear torque is applied from this iteration on
    #[must_use]
    pub(crate) fn is_warm(&self, iteration: usize) -> bool {
        iteration as f64 >= self.iterations as f64 * self.warmup_fraction
    }

    /// Grid snapping is applied strictly after this point
    #[must_use]
    pub(crate) fn is_late(&self, iteration: usize) -> bool {
        iteration as f64 > self.iterations as f64 * self.late_stage_fraction
    }

    /// Step size for `iteration`, decreasing linearly from `cooling` to zero
    #[must_use]
    pub(crate) fn step(&self, iteration: usize) -> f64 {
        let alpha = 1.0 - iteration as f64 / self.iterations as f64;
        alpha * self.cooling
    }
}
