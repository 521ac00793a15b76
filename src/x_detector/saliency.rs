//! Fusion of the crossing and contrast maps into the final saliency map
//!
//! A cell is salient when it has a crossing score and sits near contrast. The
//! result is amplified by how dense the crossing scores around the cell are, so
//! coherent glyphs beat isolated decoys that happen to contain a diagonal.

use super::{
    config::DetectorConfig,
    grid::{AXIS_DIRECTIONS, Grid},
};

/// Mean crossing score in the cluster window around (x, y).
///
/// The window covers columns `[x - r, x + r)` and rows `[y - r, y + r)`, clipped
/// to the grid, and is always divided by the nominal area `max(1, 2r)^2`.
/// Density is taken from the crossing map, not the contrast map. `None` when the
/// window reaches an unscored crossing cell.
pub(crate) fn cluster_weight(
    crossing: &Grid<Option<u32>>,
    x: usize,
    y: usize,
    config: &DetectorConfig,
) -> Option<f64> {
    let radius = config.cluster_radius;
    let columns = x.saturating_sub(radius)..(x + radius).min(crossing.width());
    let rows = y.saturating_sub(radius)..(y + radius).min(crossing.height());

    let mut sum = 0u64;
    for cx in columns {
        for cy in rows.clone() {
            sum += u64::from(crossing.get(cx, cy)?);
        }
    }
    Some(sum as f64 / config.cluster_area())
}

/// Saliency of a single cell, `None` when the cell or its cluster window is
/// unscored.
///
/// `config` must have passed [`DetectorConfig::validate`]; a zero
/// `color_levels` has no defined amplification.
pub(crate) fn saliency_at(
    crossing: &Grid<Option<u32>>,
    contrast: &Grid<u32>,
    x: usize,
    y: usize,
    config: &DetectorConfig,
) -> Option<f64> {
    let center = crossing.get(x, y)?;
    if config.intersect_distance == 0 {
        return Some(f64::from(center.min(contrast.get(x, y))));
    }
    let weight = cluster_weight(crossing, x, y, config)?;

    let mut sum = 0u64;
    for (dx, dy) in AXIS_DIRECTIONS {
        for distance in 0..=config.intersect_distance as isize {
            if let Some((nx, ny)) = contrast.offset(x, y, dx * distance, dy * distance) {
                sum += u64::from(center.min(contrast.get(nx, ny)));
            }
        }
    }

    let amplification = 1.0 + weight * 2.0 / f64::from(config.color_levels);
    Some(sum as f64 * amplification / config.intersect_area())
}

/// Saliency of every cell; same preconditions as [`saliency_at`]
pub(crate) fn saliency_map(
    crossing: &Grid<Option<u32>>,
    contrast: &Grid<u32>,
    config: &DetectorConfig,
) -> Grid<Option<f64>> {
    debug_assert!(crossing.same_shape(contrast));
    Grid::from_fn(crossing.width(), crossing.height(), |x, y| {
        saliency_at(crossing, contrast, x, y, config)
    })
}
