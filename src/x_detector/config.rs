//! Tunable parameters for the X-glyph detector

use super::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

/// Fixed heuristic parameters, threaded explicitly through every stage.
///
/// The defaults are tuned for a single close-button glyph size; change them
/// together rather than one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// How many brightness levels the base map is rounded to
    pub color_levels: u8,
    /// Brightness difference still counted as "the same line" when walking diagonals
    pub color_tolerance: u32,
    /// How far along each axis the contrast map looks for differing cells
    pub diff_distance: usize,
    /// How different the positive and negative slope lengths may be at a crossing
    pub slope_diff_tolerance: u32,
    /// Differences up to this value are treated as noise
    pub diff_threshold: u32,
    /// How far along each axis the saliency fuser looks for contrast
    pub intersect_distance: usize,
    /// Half the side of the square used to weight a cell for sitting in a cluster
    pub cluster_radius: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            color_levels: 16,
            color_tolerance: 1,
            diff_distance: 1,
            slope_diff_tolerance: 1,
            diff_threshold: 1,
            intersect_distance: 6,
            cluster_radius: 2,
        }
    }
}

impl DetectorConfig {
    /// Reject configurations the pipeline cannot evaluate
    pub fn validate(&self) -> DetectorResult<()> {
        if self.color_levels == 0 {
            return Err(DetectorError::InvalidConfig {
                description: "color_levels must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Normalisation divisor for the saliency fuser, `(intersect_distance + 1)^2`
    pub fn intersect_area(&self) -> f64 {
        let side = self.intersect_distance as f64 + 1.0;
        side * side
    }

    /// Nominal area of the cluster window, `max(1, 2 * cluster_radius)^2`
    pub fn cluster_area(&self) -> f64 {
        let side = (self.cluster_radius * 2).max(1) as f64;
        side * side
    }
}
