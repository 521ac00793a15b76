pub mod args;
pub mod capture;
pub mod report;
pub mod x_detector;

pub use capture::PixelSource;
pub use x_detector::{BaseMap, DetectionResult, DetectorConfig, DetectorError, Region, XDetector};
