//! Multi-map selection: run the pipeline over every base map and keep the best point

use super::{
    base_map::BaseMap,
    config::DetectorConfig,
    contrast::contrast_map,
    crossing::crossing_map,
    error::DetectorResult,
    grid::Grid,
    saliency::saliency_map,
    slope::{negative_slope_map, positive_slope_map},
};
use serde::Serialize;

/// A grid-local point with its saliency score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
    pub score: f64,
}

/// Winning point across all searched maps.
///
/// `map_index` is `None` when nothing was found; check [`Self::is_found`]
/// before using the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionResult {
    pub map_index: Option<usize>,
    pub x: usize,
    pub y: usize,
    pub score: f64,
}

impl DetectionResult {
    /// The "none found" sentinel; any real candidate outscores it
    pub fn none() -> Self {
        Self {
            map_index: None,
            x: 0,
            y: 0,
            score: -1.0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.map_index.is_some()
    }

    /// The winning point, if any
    pub fn point(&self) -> Option<Point> {
        self.map_index.map(|_| Point {
            x: self.x,
            y: self.y,
            score: self.score,
        })
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::none()
    }
}

/// Every intermediate grid produced for one base map
#[derive(Debug, Clone)]
pub struct MapAnalysis {
    pub positive_slope: Grid<u32>,
    pub negative_slope: Grid<u32>,
    /// `None` outside the scored interior
    pub crossing: Grid<Option<u32>>,
    pub contrast: Grid<u32>,
    /// `None` where the crossing score or its cluster window is unscored
    pub saliency: Grid<Option<f64>>,
}

impl MapAnalysis {
    /// Highest-scoring saliency cell; see [`find_max_point`]
    pub fn max_point(&self) -> Option<Point> {
        find_max_point(&self.saliency)
    }
}

/// First cell (in storage order) holding the strictly greatest positive score.
///
/// Unscored cells are skipped. Returns `None` for degenerate maps whose scores
/// never rise above 0.
pub fn find_max_point(map: &Grid<Option<f64>>) -> Option<Point> {
    let mut best: Option<Point> = None;
    for (x, y, score) in map.iter() {
        let Some(score) = score else { continue };
        if score > best.map_or(0.0, |p| p.score) {
            best = Some(Point { x, y, score });
        }
    }
    best
}

/// Close-button detector holding a validated configuration
#[derive(Debug, Clone)]
pub struct XDetector {
    config: DetectorConfig,
}

impl XDetector {
    pub fn new(config: DetectorConfig) -> DetectorResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get current configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run slopes, crossing, contrast and saliency over one base map
    pub fn analyze(&self, base: &BaseMap) -> MapAnalysis {
        let config = &self.config;
        let positive_slope = positive_slope_map(base, config);
        let negative_slope = negative_slope_map(base, config);
        let crossing = crossing_map(base, &positive_slope, &negative_slope, config);
        let contrast = contrast_map(base, config);
        let saliency = saliency_map(&crossing, &contrast, config);

        log::trace!(
            "Analyzed {}x{} map: max crossing={}, max contrast={}",
            base.width(),
            base.height(),
            crossing.cells().iter().flatten().max().copied().unwrap_or(0),
            contrast.cells().iter().max().copied().unwrap_or(0),
        );

        MapAnalysis {
            positive_slope,
            negative_slope,
            crossing,
            contrast,
            saliency,
        }
    }

    /// Best point of a single base map, `None` when the map is degenerate
    pub fn best_point(&self, base: &BaseMap) -> Option<Point> {
        self.analyze(base).max_point()
    }

    /// Find the most likely X glyph across `base_maps`.
    ///
    /// Equal scores keep the earliest map, so the result does not depend on
    /// whether the maps were processed in parallel.
    pub fn detect(&self, base_maps: &[BaseMap]) -> DetectionResult {
        let start_time = std::time::Instant::now();
        let candidates = self.best_points(base_maps);

        let mut result = DetectionResult::none();
        for (index, candidate) in candidates.into_iter().enumerate() {
            match candidate {
                Some(point) => {
                    log::debug!(
                        "Map {}: best ({},{}) score={:.3}",
                        index,
                        point.x,
                        point.y,
                        point.score
                    );
                    if point.score > result.score {
                        result = DetectionResult {
                            map_index: Some(index),
                            x: point.x,
                            y: point.y,
                            score: point.score,
                        };
                    }
                }
                None => log::warn!("Map {index} is degenerate, no candidate point"),
            }
        }

        log::debug!(
            "Detection over {} map(s) took {}ms: {:?}",
            base_maps.len(),
            start_time.elapsed().as_millis(),
            result
        );
        result
    }

    #[cfg(not(feature = "parallel"))]
    fn best_points(&self, base_maps: &[BaseMap]) -> Vec<Option<Point>> {
        base_maps.iter().map(|base| self.best_point(base)).collect()
    }

    #[cfg(feature = "parallel")]
    fn best_points(&self, base_maps: &[BaseMap]) -> Vec<Option<Point>> {
        use rayon::prelude::*;

        // collect keeps input order, the fold in detect() keeps the tie-break
        base_maps
            .par_iter()
            .map(|base| self.best_point(base))
            .collect()
    }
}

/// Detect with a one-off detector built from `config`
pub fn detect(base_maps: &[BaseMap], config: &DetectorConfig) -> DetectorResult<DetectionResult> {
    Ok(XDetector::new(config.clone())?.detect(base_maps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_max_point_keeps_first_on_ties() {
        let map = Grid::from_fn(3, 3, |x, y| Some(if x + y == 2 { 5.0 } else { 1.0 }));
        let best = find_max_point(&map).unwrap();

        // (0,2) comes before (1,1) and (2,0) in storage order
        assert_eq!((best.x, best.y, best.score), (0, 2, 5.0));
    }

    #[test]
    fn test_find_max_point_ignores_zero_maps() {
        let map = Grid::from_fn(4, 4, |_, _| Some(0.0));
        assert!(find_max_point(&map).is_none());

        let unscored: Grid<Option<f64>> = Grid::from_fn(4, 4, |_, _| None);
        assert!(find_max_point(&unscored).is_none());
    }

    #[test]
    fn test_find_max_point_skips_unscored_cells() {
        let map = Grid::from_fn(4, 3, |x, y| match (x, y) {
            (0, 1) => None,
            (2, 1) => Some(2.5),
            _ => Some(1.0),
        });
        let best = find_max_point(&map).unwrap();

        assert_eq!((best.x, best.y, best.score), (2, 1, 2.5));
    }

    #[test]
    fn test_sentinel() {
        let none = DetectionResult::none();
        assert!(!none.is_found());
        assert!(none.point().is_none());
        assert!(none.score < 0.0);
        assert_eq!(DetectionResult::default(), none);
    }

    #[test]
    fn test_new_validates_config() {
        let config = DetectorConfig {
            color_levels: 0,
            ..DetectorConfig::default()
        };
        assert!(XDetector::new(config.clone()).is_err());
        assert!(detect(&[], &config).is_err());
    }

    #[test]
    fn test_detect_empty_list_returns_sentinel() {
        let result = detect(&[], &DetectorConfig::default()).unwrap();
        assert_eq!(result, DetectionResult::none());
    }
}
