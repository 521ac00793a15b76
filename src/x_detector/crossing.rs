//! Crossing score: how strongly two equal diagonal strokes cross at a cell

use super::{base_map::BaseMap, config::DetectorConfig, grid::Grid};

/// The cell itself plus its four axis neighbours. Single-pixel strokes cross
/// on a 2x2 block, so the matching opposite slope may sit one cell over.
pub const CROSSING_NEIGHBORHOOD: [(isize, isize); 5] = [(0, 0), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Pair the slope of (x, y) in one direction with the slope of (ox, oy) in the
/// other. Returns the shorter arm of the best pairing whose lengths agree
/// within `slope_diff_tolerance`, or 0 when the two cells differ in brightness.
pub fn matching_opposite_slope(
    base: &BaseMap,
    positive: &Grid<u32>,
    negative: &Grid<u32>,
    (x, y): (usize, usize),
    (ox, oy): (usize, usize),
    config: &DetectorConfig,
) -> u32 {
    if base.get(x, y) != base.get(ox, oy) {
        return 0;
    }
    let paired = |a: u32, b: u32| {
        if a.abs_diff(b) <= config.slope_diff_tolerance {
            a.min(b)
        } else {
            0
        }
    };
    let pos_neg = paired(positive.get(x, y), negative.get(ox, oy));
    let neg_pos = paired(negative.get(x, y), positive.get(ox, oy));
    pos_neg.max(neg_pos)
}

/// True for cells the crossing map scores: x in `[1, width - 3]`, y in `[1, height - 3]`
pub fn is_scored(x: usize, y: usize, width: usize, height: usize) -> bool {
    x >= 1 && y >= 1 && x + 2 < width && y + 2 < height
}

/// Crossing score of every cell.
///
/// Cells outside [`is_scored`] are `None`. They carry no score at all, and
/// anything derived from them later has no score either.
pub fn crossing_map(
    base: &BaseMap,
    positive: &Grid<u32>,
    negative: &Grid<u32>,
    config: &DetectorConfig,
) -> Grid<Option<u32>> {
    let (width, height) = (base.width(), base.height());

    Grid::from_fn(width, height, |x, y| {
        if !is_scored(x, y, width, height) {
            return None;
        }
        CROSSING_NEIGHBORHOOD
            .iter()
            .filter_map(|&(dx, dy)| base.grid().offset(x, y, dx, dy))
            .map(|other| matching_opposite_slope(base, positive, negative, (x, y), other, config))
            .max()
    })
}
