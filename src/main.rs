use std::process::ExitCode;
use x_button_finder::args::{Args, print_help};
use x_button_finder::capture::{PixelSource, base_map_for_region, load_screenshot};
use x_button_finder::report::{save_annotated_png, save_saliency_png};
use x_button_finder::x_detector::{DetectorError, DetectorResult, Region, XDetector};

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("❌ {message}");
            print_help();
            return ExitCode::from(2);
        }
    };

    let default_level = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("❌ {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether an X was found
fn run(args: &Args) -> DetectorResult<bool> {
    let detector = XDetector::new(args.config.clone())?;
    let screenshot = load_screenshot(&args.screenshot)?;
    let (screen_width, screen_height) = PixelSource::dimensions(&screenshot);

    let regions = search_regions(args, screen_width, screen_height);
    let base_maps = regions
        .iter()
        .map(|region| base_map_for_region(&screenshot, region, detector.config()))
        .collect::<DetectorResult<Vec<_>>>()?;

    let result = detector.detect(&base_maps);
    let Some(index) = result.map_index else {
        println!("❌ No X button found in {} region(s)", regions.len());
        return Ok(false);
    };

    let region = &regions[index];
    let (screen_x, screen_y) = region
        .to_screen(result.x, result.y)
        .ok_or(DetectorError::RegionOutOfBounds {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            source_width: screen_width,
            source_height: screen_height,
        })?;
    println!(
        "✅ X button in region #{} [{},{},{},{}] at grid ({},{}) -> screen ({},{}) score={:.3}",
        index,
        region.x,
        region.y,
        region.width,
        region.height,
        result.x,
        result.y,
        screen_x,
        screen_y,
        result.score
    );

    if let Some(path) = &args.saliency_out {
        let analysis = detector.analyze(&base_maps[index]);
        save_saliency_png(&analysis.saliency, path)?;
    }
    if let Some(path) = &args.annotate_out {
        save_annotated_png(&screenshot, region, screen_x, screen_y, path)?;
    }
    Ok(true)
}

/// Regions from the command line, else one embedded in the screenshot filename,
/// else the whole screenshot. All are clipped to the screenshot.
fn search_regions(args: &Args, screen_width: u32, screen_height: u32) -> Vec<Region> {
    let requested = if !args.regions.is_empty() {
        args.regions.clone()
    } else if let Ok(region) = Region::parse(&args.screenshot) {
        log::debug!("Using region from filename: {:?}", region);
        vec![region]
    } else {
        vec![Region::full_screen(screen_width, screen_height)]
    };

    requested
        .into_iter()
        .map(|region| region.clip_to_screen(screen_width, screen_height))
        .filter(|region| {
            let valid = region.is_valid();
            if !valid {
                log::warn!("Skipping empty region {:?}", region);
            }
            valid
        })
        .collect()
}
