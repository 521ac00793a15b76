//! Pipeline-level tests for X glyph detection

use crate::x_detector::{BaseMap, DetectionResult, DetectorConfig, Grid, XDetector, detect};

const BACKGROUND: u8 = 0;
const GLYPH: u8 = 15;

fn map_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> BaseMap {
    let grid = Grid::from_fn(width, height, f);
    BaseMap::from_cells(width, height, grid.cells().to_vec(), &DetectorConfig::default())
        .expect("fixture within color levels")
}

/// Single-pixel X: two diagonals of length 7 crossing at (10,10) on a 20x20 map
fn thin_x_map() -> BaseMap {
    map_from_fn(20, 20, |x, y| {
        let (dx, dy) = (x.abs_diff(10), y.abs_diff(10));
        if dx == dy && dx <= 3 { GLYPH } else { BACKGROUND }
    })
}

/// Two-pixel-wide strokes, as a real close button renders, crossing at (10,10)
fn thick_x_map() -> BaseMap {
    map_from_fn(20, 20, |x, y| {
        let on_stroke = |sx: usize| {
            let dy = y.abs_diff(10);
            dy <= 3 && (sx == 10 + dy || sx + dy == 10)
        };
        let stroke = on_stroke(x) || (x > 0 && on_stroke(x - 1));
        if stroke { GLYPH } else { BACKGROUND }
    })
}

fn detector() -> XDetector {
    XDetector::new(DetectorConfig::default()).unwrap()
}

fn distance(a: (usize, usize), b: (usize, usize)) -> f64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Largest saliency more than `radius` cells from `center`
fn max_score_outside(saliency: &Grid<Option<f64>>, center: (usize, usize), radius: f64) -> f64 {
    saliency
        .iter()
        .filter(|&(x, y, _)| distance((x, y), center) > radius)
        .filter_map(|(_, _, score)| score)
        .fold(0.0, f64::max)
}

/// Busy 10x9 pattern whose strongest response sits in the unscored border
fn border_decoy_map() -> BaseMap {
    map_from_fn(10, 9, |x, y| ((2 * x + y * y + 5 * x * y) % 7 * 2) as u8)
}

/// Busy 10x9 pattern with one positive saliency cell inside the scored area
fn border_and_interior_map() -> BaseMap {
    map_from_fn(10, 9, |x, y| ((2 * x + 5 * y * y + 2 * x * y) % 7 * 2) as u8)
}

#[test]
fn test_thick_x_found_at_center() {
    let map = thick_x_map();
    let detector = detector();
    let result = detector.detect(std::slice::from_ref(&map));

    assert_eq!(result.map_index, Some(0));
    assert!(result.x.abs_diff(10) <= 1, "x={} not near 10", result.x);
    assert!(result.y.abs_diff(10) <= 1, "y={} not near 10", result.y);

    let saliency = detector.analyze(&map).saliency;
    assert!(result.score > max_score_outside(&saliency, (10, 10), 5.0));
}

#[test]
fn test_thin_x_found_near_center() {
    // With single-pixel strokes the background cells hugging the crossing
    // score as high as the crossing itself, so the peak lands beside the
    // center rather than on it.
    let map = thin_x_map();
    let detector = detector();
    let result = detector.detect(std::slice::from_ref(&map));

    assert!(result.is_found());
    assert!(result.x.abs_diff(10) <= 2, "x={} not near 10", result.x);
    assert!(result.y.abs_diff(10) <= 2, "y={} not near 10", result.y);

    let saliency = detector.analyze(&map).saliency;
    assert!(result.score > max_score_outside(&saliency, (10, 10), 5.0));
}

#[test]
fn test_detection_score_matches_saliency_map() {
    let map = thick_x_map();
    let detector = detector();
    let result = detector.detect(std::slice::from_ref(&map));
    let saliency = detector.analyze(&map).saliency;

    assert_eq!(saliency.get(result.x, result.y), Some(result.score));
    assert!(saliency.cells().iter().flatten().all(|&s| s <= result.score));
}

#[test]
fn test_uniform_map_has_zero_saliency() {
    let map = map_from_fn(16, 12, |_, _| 9);
    let analysis = detector().analyze(&map);

    // long diagonals everywhere but no contrast to intersect with
    assert!(analysis.crossing.cells().iter().flatten().any(|&c| c > 0));
    for x in 3..=12 {
        for y in 3..=8 {
            assert_eq!(analysis.saliency.get(x, y), Some(0.0));
        }
    }
    assert!(analysis.saliency.cells().iter().flatten().all(|&s| s == 0.0));
}

#[test]
fn test_only_cells_with_scored_cluster_window_have_saliency() {
    // default cluster radius 2: window columns [x - 2, x + 2) must lie in the
    // scored crossing interior [1, width - 3]
    let analysis = detector().analyze(&border_decoy_map());

    for (x, y, score) in analysis.saliency.iter() {
        let candidate = (3..=6).contains(&x) && (3..=5).contains(&y);
        assert_eq!(score.is_some(), candidate, "cell ({x},{y}) = {score:?}");
    }
}

#[test]
fn test_border_response_is_never_selected() {
    let map = border_decoy_map();
    let analysis = detector().analyze(&map);

    // the border cell has crossing and contrast but no complete cluster window
    assert!(analysis.crossing.get(1, 2).is_some_and(|c| c > 0));
    assert!(analysis.contrast.get(1, 2) > 0);
    assert_eq!(analysis.saliency.get(1, 2), None);

    let result = detector().detect(&[map]);
    assert_eq!(result, DetectionResult::none());
}

#[test]
fn test_interior_point_beats_stronger_border_response() {
    let result = detector().detect(&[border_and_interior_map()]);

    assert_eq!(result.map_index, Some(0));
    assert_eq!((result.x, result.y), (5, 3));
}

#[test]
fn test_uniform_map_is_no_detection() {
    let map = map_from_fn(16, 12, |_, _| 9);
    let result = detector().detect(&[map]);

    assert!(!result.is_found());
    assert_eq!(result, DetectionResult::none());
}

#[test]
fn test_detect_empty_list() {
    let result = detector().detect(&[]);
    assert!(result.map_index.is_none());
    assert!(result.score < 0.0);
}

#[test]
fn test_identical_maps_first_wins() {
    let detector = detector();
    let single = detector.detect(&[thick_x_map()]);
    let doubled = detector.detect(&[thick_x_map(), thick_x_map()]);

    assert_eq!(doubled.map_index, Some(0));
    assert_eq!((doubled.x, doubled.y), (single.x, single.y));
    assert_eq!(doubled.score, single.score);
}

#[test]
fn test_best_map_wins_across_list() {
    let uniform = map_from_fn(20, 20, |_, _| 4);
    let result = detector().detect(&[uniform.clone(), thick_x_map(), uniform]);

    assert_eq!(result.map_index, Some(1));
}

#[test]
fn test_map_order_does_not_change_winner_location() {
    let detector = detector();
    let forward = detector.detect(&[thin_x_map(), thick_x_map()]);
    let backward = detector.detect(&[thick_x_map(), thin_x_map()]);

    assert_eq!(forward.score, backward.score);
    assert_eq!((forward.x, forward.y), (backward.x, backward.y));
    assert_ne!(forward.map_index, backward.map_index);
}

#[test]
fn test_all_maps_share_base_dimensions() {
    let map = map_from_fn(13, 7, |x, y| ((x * 3 + y) % 17) as u8 % 16);
    let analysis = detector().analyze(&map);

    for (w, h) in [
        (analysis.positive_slope.width(), analysis.positive_slope.height()),
        (analysis.negative_slope.width(), analysis.negative_slope.height()),
        (analysis.crossing.width(), analysis.crossing.height()),
        (analysis.contrast.width(), analysis.contrast.height()),
        (analysis.saliency.width(), analysis.saliency.height()),
    ] {
        assert_eq!((w, h), (13, 7));
    }
}

#[test]
fn test_free_detect_matches_detector() {
    let config = DetectorConfig::default();
    let via_fn = detect(&[thick_x_map()], &config).unwrap();
    let via_detector = detector().detect(&[thick_x_map()]);
    assert_eq!(via_fn, via_detector);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_identical_maps_first_wins() {
    let detector = detector();
    let single = detector.detect(&[thick_x_map()]);
    // enough maps to spread across the pool
    let maps = vec![thick_x_map(); 16];
    let result = detector.detect(&maps);

    assert_eq!(result.map_index, Some(0));
    assert_eq!((result.x, result.y), (single.x, single.y));
    assert_eq!(result.score, single.score);
}
