use crate::x_detector::{DetectorConfig, Region};
use std::env;
use std::str::FromStr;

#[derive(Debug)]
pub struct Args {
    pub screenshot: String,
    pub regions: Vec<Region>,
    pub config: DetectorConfig,
    pub saliency_out: Option<String>,
    pub annotate_out: Option<String>,
    pub debug_mode: bool,
}

impl Args {
    /// Parse process arguments. `Ok(None)` means help or version was printed,
    /// `Err` carries the reason the input was rejected.
    pub fn parse() -> Result<Option<Self>, String> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, String> {
        let mut screenshot: Option<String> = None;
        let mut regions = Vec::new();
        let mut config = DetectorConfig::default();
        let mut saliency_out = None;
        let mut annotate_out = None;
        let mut debug_mode = false;

        for arg in args {
            if arg == "--help" || arg == "-h" {
                print_help();
                return Ok(None);
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "X Button Finder v{} (built {})",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return Ok(None);
            } else if arg == "--debug" {
                debug_mode = true;
            } else if let Some(val) = arg.strip_prefix("--region=") {
                regions.push(Region::parse(val).map_err(|e| e.to_string())?);
            } else if let Some(val) = arg.strip_prefix("--saliency-out=") {
                saliency_out = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--annotate=") {
                annotate_out = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--color-levels=") {
                config.color_levels = parse_value("--color-levels", val)?;
            } else if let Some(val) = arg.strip_prefix("--color-tolerance=") {
                config.color_tolerance = parse_value("--color-tolerance", val)?;
            } else if let Some(val) = arg.strip_prefix("--diff-distance=") {
                config.diff_distance = parse_value("--diff-distance", val)?;
            } else if let Some(val) = arg.strip_prefix("--slope-diff-tolerance=") {
                config.slope_diff_tolerance = parse_value("--slope-diff-tolerance", val)?;
            } else if let Some(val) = arg.strip_prefix("--diff-threshold=") {
                config.diff_threshold = parse_value("--diff-threshold", val)?;
            } else if let Some(val) = arg.strip_prefix("--intersect-distance=") {
                config.intersect_distance = parse_value("--intersect-distance", val)?;
            } else if let Some(val) = arg.strip_prefix("--cluster-radius=") {
                config.cluster_radius = parse_value("--cluster-radius", val)?;
            } else if arg.starts_with('-') {
                return Err(format!("Unknown argument: {}", arg));
            } else if screenshot.is_none() {
                screenshot = Some(arg);
            } else {
                return Err(format!("Only one screenshot can be searched at a time: {}", arg));
            }
        }

        let Some(screenshot) = screenshot else {
            return Err("Missing screenshot path".to_string());
        };

        Ok(Some(Args {
            screenshot,
            regions,
            config,
            saliency_out,
            annotate_out,
            debug_mode,
        }))
    }
}

fn parse_value<T: FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse::<T>().map_err(|_| format!("Invalid value for {}: {}", flag, val))
}

pub fn print_help() {
    println!("❎ X Button Finder");
    println!();
    println!("USAGE:");
    println!("    x-button-finder <SCREENSHOT> [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --region=x,y,w,h          Region to search; repeat for several crops (default: whole image)");
    println!("    --saliency-out=PATH       Write the winning map's saliency as a grayscale PNG");
    println!("    --annotate=PATH           Write a copy of the screenshot with the detection marked");
    println!("    --color-levels=N          Brightness levels of the base map (default: 16)");
    println!("    --color-tolerance=N       Tolerance when following diagonal strokes (default: 1)");
    println!("    --diff-distance=N         Reach of the contrast map (default: 1)");
    println!("    --slope-diff-tolerance=N  Allowed arm length mismatch at a crossing (default: 1)");
    println!("    --diff-threshold=N        Differences up to N count as noise (default: 1)");
    println!("    --intersect-distance=N    Reach of the saliency fusion (default: 6)");
    println!("    --cluster-radius=N        Half side of the cluster window (default: 2)");
    println!("    --debug                   Enable debug logging");
    println!("    --help, -h                Show this help message");
    println!("    --version, -v             Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    x-button-finder screenshot.png");
    println!("    x-button-finder screenshot.png --region=900,100,120,120 --region=880,80,160,160");
    println!("    x-button-finder 'img-[900,100,120,120].png' --annotate=found.png --debug");
}
