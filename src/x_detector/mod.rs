//! X-shaped close-button detection
//!
//! Pipeline per base map: slope maps -> crossing map, contrast map -> saliency
//! map -> best point. [`XDetector::detect`] runs it over several candidate maps
//! and keeps the single best point.

pub mod base_map;
pub mod config;
pub mod contrast;
pub mod crossing;
pub mod detector;
pub mod error;
pub mod grid;
pub mod region;
mod saliency;
pub mod slope;

#[cfg(test)]
mod tests;

// Re-export main types and functions
pub use base_map::{BaseMap, build_base_map, color_difference};
pub use config::DetectorConfig;
pub use detector::{DetectionResult, MapAnalysis, Point, XDetector, detect, find_max_point};
pub use error::{DetectorError, DetectorResult};
pub use grid::Grid;
pub use region::Region;
