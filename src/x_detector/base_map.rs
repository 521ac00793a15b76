//! Quantized brightness grid built from raw color samples

use super::{
    config::DetectorConfig,
    error::{DetectorError, DetectorResult},
    grid::Grid,
    region::Region,
};
use image::Rgb;

/// Largest possible `R + G + B` sum
const MAX_COLOR_SUM: u32 = 255 * 3;

/// Brightness grid with every cell in `[0, color_levels]`
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMap {
    grid: Grid<u8>,
}

impl BaseMap {
    /// Build from a flat x-major buffer (`cells[x * height + y]`)
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<u8>,
        config: &DetectorConfig,
    ) -> DetectorResult<Self> {
        if width == 0 || height == 0 {
            return Err(DetectorError::EmptyGrid { width, height });
        }
        if cells.len() != width * height {
            return Err(DetectorError::SampleCountMismatch {
                width,
                height,
                expected: width * height,
                actual: cells.len(),
            });
        }
        let grid = Grid::from_raw(width, height, cells);
        if let Some((x, y, value)) = grid.iter().find(|&(_, _, v)| v > config.color_levels) {
            return Err(DetectorError::ValueOutOfRange {
                x,
                y,
                value,
                color_levels: config.color_levels,
            });
        }
        Ok(Self { grid })
    }

    /// Build from nested columns, `columns[x][y]`
    pub fn from_columns(columns: Vec<Vec<u8>>, config: &DetectorConfig) -> DetectorResult<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if let Some((column, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(DetectorError::RaggedGrid {
                column,
                expected: height,
                actual: col.len(),
            });
        }
        Self::from_cells(width, height, columns.concat(), config)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }
}

/// Quantize one color to `round((r + g + b) * levels / 765)`, rounding halves up
pub fn quantize(color: &Rgb<u8>, color_levels: u8) -> u8 {
    let sum: u32 = color.0.iter().map(|&c| u32::from(c)).sum();
    let scaled = (sum * u32::from(color_levels) * 2 + MAX_COLOR_SUM) / (MAX_COLOR_SUM * 2);
    scaled as u8
}

/// Convert the raw samples of `region` into a [`BaseMap`].
///
/// `samples` must hold one color per cell in x-major order.
pub fn build_base_map(
    region: &Region,
    samples: &[Rgb<u8>],
    config: &DetectorConfig,
) -> DetectorResult<BaseMap> {
    let width = region.width as usize;
    let height = region.height as usize;
    if width == 0 || height == 0 {
        return Err(DetectorError::EmptyGrid { width, height });
    }
    if samples.len() != width * height {
        return Err(DetectorError::SampleCountMismatch {
            width,
            height,
            expected: width * height,
            actual: samples.len(),
        });
    }

    let cells = samples
        .iter()
        .map(|color| quantize(color, config.color_levels))
        .collect();
    Ok(BaseMap {
        grid: Grid::from_raw(width, height, cells),
    })
}

/// Brightness difference with small differences suppressed:
/// `max(0, |a - b| - threshold)`
#[inline]
pub fn color_difference(a: u8, b: u8, threshold: u32) -> u32 {
    u32::from(a.abs_diff(b)).saturating_sub(threshold)
}
