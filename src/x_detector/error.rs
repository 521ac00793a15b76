use thiserror::Error;

/// A specialized `Result` type for detector operations.
pub type DetectorResult<T> = Result<T, DetectorError>;

/// Precondition violations raised while building grids or sampling pixels.
///
/// "Nothing found" is not an error; see [`super::DetectionResult::is_found`].
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Expected {expected} color samples for a {width}x{height} region, got {actual}")]
    SampleCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Grid must have non-zero width and height, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("Column {column} has {actual} cells, expected {expected}")]
    RaggedGrid {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cell ({x},{y}) has value {value}, above color_levels={color_levels}")]
    ValueOutOfRange {
        x: usize,
        y: usize,
        value: u8,
        color_levels: u8,
    },

    #[error("Invalid detector configuration: {description}")]
    InvalidConfig { description: String },

    #[error(
        "Region [{x},{y},{width},{height}] does not fit in {source_width}x{source_height} source"
    )]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("Could not parse region from '{input}', expected x,y,width,height")]
    InvalidRegion { input: String },

    #[error("Failed to load image: {source}")]
    ImageLoad {
        #[from]
        source: image::ImageError,
    },
}

impl DetectorError {
    /// Check if this error came from malformed grid input rather than I/O
    pub fn is_precondition_violation(&self) -> bool {
        !matches!(self, DetectorError::ImageLoad { .. })
    }
}
