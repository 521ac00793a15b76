//! Local contrast ("diff") map: edge strength of each cell against its axis neighbours

use super::{
    base_map::{BaseMap, color_difference},
    config::DetectorConfig,
    grid::{AXIS_DIRECTIONS, Grid},
};

/// Summed color difference between (x, y) and the cells up to `diff_distance`
/// away along each axis direction. Positions outside the grid are skipped.
pub fn contrast_at(base: &BaseMap, x: usize, y: usize, config: &DetectorConfig) -> u32 {
    let grid = base.grid();
    let origin = grid.get(x, y);
    let mut total = 0;
    for (dx, dy) in AXIS_DIRECTIONS {
        for distance in 0..=config.diff_distance as isize {
            if let Some((nx, ny)) = grid.offset(x, y, dx * distance, dy * distance) {
                total += color_difference(origin, grid.get(nx, ny), config.diff_threshold);
            }
        }
    }
    total
}

pub fn contrast_map(base: &BaseMap, config: &DetectorConfig) -> Grid<u32> {
    Grid::from_fn(base.width(), base.height(), |x, y| {
        contrast_at(base, x, y, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> BaseMap {
        let grid = Grid::from_fn(width, height, f);
        BaseMap::from_cells(width, height, grid.cells().to_vec(), &DetectorConfig::default())
            .unwrap()
    }

    #[test]
    fn test_uniform_map_has_no_contrast() {
        let map = base(6, 6, |_, _| 11);
        let contrast = contrast_map(&map, &DetectorConfig::default());
        assert!(contrast.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_isolated_bright_cell() {
        let config = DetectorConfig::default();
        let map = base(5, 5, |x, y| if (x, y) == (2, 2) { 15 } else { 0 });
        let contrast = contrast_map(&map, &config);

        // four neighbours, each 15 - 1 = 14 apart after the threshold
        assert_eq!(contrast.get(2, 2), 56);
        assert_eq!(contrast.get(1, 2), 14);
        assert_eq!(contrast.get(2, 3), 14);
        // diagonal neighbours are not compared
        assert_eq!(contrast.get(1, 1), 0);
    }

    #[test]
    fn test_diff_distance_reaches_further() {
        let config = DetectorConfig {
            diff_distance: 2,
            ..DetectorConfig::default()
        };
        let map = base(5, 5, |x, y| if (x, y) == (2, 2) { 15 } else { 0 });

        assert_eq!(contrast_at(&map, 0, 2, &config), 14);
        assert_eq!(contrast_at(&map, 2, 4, &config), 14);
        assert_eq!(contrast_at(&map, 2, 2, &config), 8 * 14);
    }

    #[test]
    fn test_threshold_above_noise_silences_contrast() {
        // noise between levels 4 and 7: pairwise differences never exceed 3
        let map = base(12, 9, |x, y| (4 + (x * 7 + y * 3) % 4) as u8);
        let noisy = contrast_map(&map, &DetectorConfig::default());
        assert!(noisy.cells().iter().any(|&v| v > 0));

        let config = DetectorConfig {
            diff_threshold: 4,
            ..DetectorConfig::default()
        };
        let silenced = contrast_map(&map, &config);
        assert!(silenced.cells().iter().all(|&v| v == 0));
    }
}
