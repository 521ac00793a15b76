//! Diagonal run lengths ("slopes") through every cell of a base map
//!
//! A slope is measured by walking outward from a cell along both arms of one
//! diagonal at once. Each successful step requires both new cells to stay
//! within `color_tolerance` of the starting cell's brightness. The two strokes
//! of an X each show up as a long run in one of the two directions.

use super::{
    base_map::{BaseMap, color_difference},
    config::DetectorConfig,
    grid::Grid,
};

/// Which diagonal a slope is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// The `/` diagonal: arms step (x+1, y-1) and (x-1, y+1)
    Positive,
    /// The `\` diagonal: arms step (x+1, y+1) and (x-1, y-1)
    Negative,
}

impl Diagonal {
    /// Unit step of the first arm; the second arm walks the opposite way
    pub fn step(self) -> (isize, isize) {
        match self {
            Diagonal::Positive => (1, -1),
            Diagonal::Negative => (1, 1),
        }
    }
}

/// Number of full symmetric steps from (x, y) along `diagonal`
pub fn slope_span(
    base: &BaseMap,
    x: usize,
    y: usize,
    diagonal: Diagonal,
    config: &DetectorConfig,
) -> u32 {
    let grid = base.grid();
    let origin = grid.get(x, y);
    let (dx, dy) = diagonal.step();
    let similar = |(px, py): (usize, usize)| {
        color_difference(origin, grid.get(px, py), config.diff_threshold) <= config.color_tolerance
    };

    let mut span = 0u32;
    loop {
        let reach = span as isize + 1;
        let arms = grid
            .offset(x, y, dx * reach, dy * reach)
            .zip(grid.offset(x, y, -dx * reach, -dy * reach));
        match arms {
            Some((ahead, behind)) if similar(ahead) && similar(behind) => span += 1,
            _ => return span,
        }
    }
}

/// Slope span of every cell along one diagonal
pub fn slope_map(base: &BaseMap, diagonal: Diagonal, config: &DetectorConfig) -> Grid<u32> {
    Grid::from_fn(base.width(), base.height(), |x, y| {
        slope_span(base, x, y, diagonal, config)
    })
}

pub fn positive_slope_map(base: &BaseMap, config: &DetectorConfig) -> Grid<u32> {
    slope_map(base, Diagonal::Positive, config)
}

pub fn negative_slope_map(base: &BaseMap, config: &DetectorConfig) -> Grid<u32> {
    slope_map(base, Diagonal::Negative, config)
}
