// Pixel sampling for the detector.
// A PixelSource hands back the raw colors of a screen region; the detector
// itself never touches images or screens directly.

use crate::x_detector::{
    BaseMap, DetectorConfig, DetectorError, DetectorResult, Region, build_base_map,
};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Anything that can report the colors of a rectangular region
pub trait PixelSource {
    /// Width and height of the whole source
    fn dimensions(&self) -> (u32, u32);

    /// Colors of every cell in `region`, x-major: cell (x, y) at `x * height + y`
    fn sample_region(&self, region: &Region) -> DetectorResult<Vec<Rgb<u8>>>;
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn sample_region(&self, region: &Region) -> DetectorResult<Vec<Rgb<u8>>> {
        let (source_width, source_height) = (self.width(), self.height());
        if !region.fits_within(source_width, source_height) {
            return Err(DetectorError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                source_width,
                source_height,
            });
        }

        let mut samples = Vec::with_capacity(region.cell_count());
        for dx in 0..region.width {
            for dy in 0..region.height {
                samples.push(*self.get_pixel(region.x + dx, region.y + dy));
            }
        }
        Ok(samples)
    }
}

/// Sample `region` from `source` and quantize it into a base map
pub fn base_map_for_region(
    source: &impl PixelSource,
    region: &Region,
    config: &DetectorConfig,
) -> DetectorResult<BaseMap> {
    let samples = source.sample_region(region)?;
    log::trace!(
        "Sampled {} colors from region [{},{},{},{}]",
        samples.len(),
        region.x,
        region.y,
        region.width,
        region.height
    );
    build_base_map(region, &samples, config)
}

/// Load a screenshot from disk as RGB
pub fn load_screenshot(path: impl AsRef<Path>) -> DetectorResult<RgbImage> {
    let image = image::open(path.as_ref())?;
    log::debug!(
        "Loaded screenshot {} ({}x{})",
        path.as_ref().display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgb8())
}
