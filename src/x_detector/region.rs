//! Screen regions sampled into base maps

use super::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a full-screen region
    pub fn full_screen(screen_width: u32, screen_height: u32) -> Self {
        Self::new(0, 0, screen_width, screen_height)
    }

    /// Parse `x,y,width,height`, optionally wrapped in brackets as embedded in
    /// capture filenames (e.g. `img-[300,1682,50,50].png`)
    pub fn parse(input: &str) -> DetectorResult<Self> {
        let inner = match (input.find('['), input.find(']')) {
            (Some(start), Some(end)) if end > start => &input[start + 1..end],
            _ => input,
        };
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() == 4
            && let (Ok(x), Ok(y), Ok(width), Ok(height)) = (
                parts[0].parse::<u32>(),
                parts[1].parse::<u32>(),
                parts[2].parse::<u32>(),
                parts[3].parse::<u32>(),
            )
        {
            return Ok(Self::new(x, y, width, height));
        }
        Err(DetectorError::InvalidRegion {
            input: input.to_string(),
        })
    }

    /// Clip region to screen boundaries
    pub fn clip_to_screen(mut self, screen_width: u32, screen_height: u32) -> Self {
        self.x = self.x.min(screen_width.saturating_sub(1));
        self.y = self.y.min(screen_height.saturating_sub(1));
        self.width = self.width.min(screen_width.saturating_sub(self.x));
        self.height = self.height.min(screen_height.saturating_sub(self.y));
        self
    }

    /// True if the whole region lies inside a `source_width` x `source_height` area
    pub fn fits_within(&self, source_width: u32, source_height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(source_width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(source_height)
    }

    /// Check if this region contains a screen point
    pub fn contains_point(&self, x: u32, y: u32) -> bool {
        let (x, y) = (u64::from(x), u64::from(y));
        x >= u64::from(self.x)
            && x < u64::from(self.x) + u64::from(self.width)
            && y >= u64::from(self.y)
            && y < u64::from(self.y) + u64::from(self.height)
    }

    /// Get the center point of this region, saturating at `u32::MAX`
    pub fn center(&self) -> (u32, u32) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Check if this region is valid (non-zero dimensions)
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of cells (and color samples) the region covers
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Translate a grid-local point back to screen coordinates, `None` if the
    /// result does not fit in `u32`
    pub fn to_screen(&self, grid_x: usize, grid_y: usize) -> Option<(u32, u32)> {
        let x = self.x.checked_add(u32::try_from(grid_x).ok()?)?;
        let y = self.y.checked_add(u32::try_from(grid_y).ok()?)?;
        Some((x, y))
    }
}
