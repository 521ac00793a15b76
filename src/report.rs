// Debug output for detections: saliency heatmaps and annotated screenshots.

use crate::x_detector::{DetectorResult, Grid, Region};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use std::path::Path;

const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 255]);

/// Render a saliency map as grayscale, scaled so the maximum is white.
/// Unscored cells are black.
pub fn saliency_image(saliency: &Grid<Option<f64>>) -> GrayImage {
    let max = saliency.cells().iter().flatten().copied().fold(0.0, f64::max);
    let mut img = GrayImage::new(saliency.width() as u32, saliency.height() as u32);
    for (x, y, score) in saliency.iter() {
        let level = match score {
            Some(score) if max > 0.0 => score / max * 255.0,
            _ => 0.0,
        };
        img.put_pixel(x as u32, y as u32, Luma([level.round().clamp(0.0, 255.0) as u8]));
    }
    img
}

pub fn save_saliency_png(
    saliency: &Grid<Option<f64>>,
    path: impl AsRef<Path>,
) -> DetectorResult<()> {
    saliency_image(saliency).save(path.as_ref())?;
    log::info!("Saliency map written to {}", path.as_ref().display());
    Ok(())
}

/// Copy of `screenshot` with the searched region outlined and a cross at `(x, y)`
pub fn annotate(screenshot: &RgbImage, region: &Region, x: u32, y: u32) -> RgbImage {
    let mut annotated = screenshot.clone();
    if region.is_valid() {
        let outline = Rect::at(region.x as i32, region.y as i32).of_size(region.width, region.height);
        draw_hollow_rect_mut(&mut annotated, outline, MARKER_COLOR);
    }
    draw_cross_mut(&mut annotated, MARKER_COLOR, x as i32, y as i32);
    annotated
}

pub fn save_annotated_png(
    screenshot: &RgbImage,
    region: &Region,
    x: u32,
    y: u32,
    path: impl AsRef<Path>,
) -> DetectorResult<()> {
    annotate(screenshot, region, x, y).save(path.as_ref())?;
    log::info!("Annotated screenshot written to {}", path.as_ref().display());
    Ok(())
}
