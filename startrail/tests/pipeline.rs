use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use common::test_utils::test_output_path;
use imaginarium::{ColorFormat, Image, ImageDesc};
use startrail::pivot::pixel_from_horizontal;
use startrail::{Config, Error, MaskSizePolicy, Pipeline, PixelPoint};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];
const GROUND: [u8; 4] = [90, 90, 90, 255];

/// Black sky with one star at (60, 50) and a gray foreground from row 80 down.
fn night_scene() -> Image {
    let mut image = Image::new_black(100, 100);
    image.pixel_u8_mut(60, 50).copy_from_slice(&WHITE);
    for y in 80..100 {
        for x in 0..100 {
            image.pixel_u8_mut(x, y).copy_from_slice(&GROUND);
        }
    }
    image
}

fn ground_mask(width: u32, height: u32, horizon: u32) -> Image {
    let bytes = (0..height)
        .flat_map(|y| std::iter::repeat_n(if y >= horizon { 255 } else { 0 }, width as usize))
        .collect();
    Image::new_with_data(ImageDesc::new(width, height, ColorFormat::L_U8), bytes).unwrap()
}

fn quarter_turn_config(name: &str) -> Config {
    let input_path = test_output_path(&format!("{}_input.png", name));
    night_scene().save_file(&input_path).unwrap();

    Config {
        input_path,
        output_path: test_output_path(&format!("{}/trails.png", name)),
        step_rotation_degrees: 90.0,
        total_rotation_degrees: 360.0,
        pivot_override: Some(PixelPoint::new(50, 50)),
        ..Config::default()
    }
}

#[test]
fn trails_are_written_with_configured_pivot() {
    let config = quarter_turn_config("pipeline_pivot_override");
    let _ = std::fs::remove_dir_all(config.output_path.parent().unwrap());

    let summary = Pipeline::default().run(&config).unwrap();

    assert_eq!(summary.pivot, PixelPoint::new(50, 50));
    assert!(summary.horizontal.is_none());
    assert_eq!(summary.total_layers, 4);
    assert_eq!(summary.layers_merged, 4);
    assert!(!summary.cancelled);
    assert!(!summary.masked);

    let output = Image::read_file(&summary.output_path).unwrap();
    for (x, y) in [(60, 50), (50, 40), (40, 50), (50, 60)] {
        assert_eq!(output.pixel_u8(x, y), WHITE, "({}, {})", x, y);
    }
    assert_eq!(output.pixel_u8(45, 45), BLACK);
}

#[test]
fn masked_foreground_is_restored_over_trails() {
    let mut config = quarter_turn_config("pipeline_masked");
    let mask_path = test_output_path("pipeline_masked_mask.png");
    ground_mask(100, 100, 80).save_file(&mask_path).unwrap();
    config.mask_path = Some(mask_path);

    let summary = Pipeline::from_config(&config).run(&config).unwrap();
    assert!(summary.masked);

    let output = Image::read_file(&summary.output_path).unwrap();
    assert_eq!(output.pixel_u8(10, 90), GROUND);
    assert_eq!(output.pixel_u8(99, 80), GROUND);
    assert_eq!(output.pixel_u8(50, 40), WHITE);
    assert_eq!(output.pixel_u8(50, 60), WHITE);
    // The foreground is removed before rotating, so it leaves no trail in the sky.
    assert_eq!(output.pixel_u8(10, 10), BLACK);
    assert_eq!(output.pixel_u8(90, 20), BLACK);
}

#[test]
fn small_mask_is_resized_when_allowed() {
    let mut config = quarter_turn_config("pipeline_resized_mask");
    let mask_path = test_output_path("pipeline_resized_mask_mask.png");
    ground_mask(50, 50, 40).save_file(&mask_path).unwrap();
    config.mask_path = Some(mask_path);

    let failing = Pipeline::from_config(&config).run(&config);
    assert!(matches!(failing, Err(Error::DimensionMismatch { .. })));

    config.mask_size_policy = MaskSizePolicy::Resize;
    let summary = Pipeline::from_config(&config).run(&config).unwrap();

    let output = Image::read_file(&summary.output_path).unwrap();
    assert_eq!(output.pixel_u8(50, 90), GROUND);
}

#[test]
fn pivot_is_derived_from_polaris() {
    let input_path = test_output_path("pipeline_polaris_input.png");
    Image::new_filled_u8(60, 40, [20, 30, 40, 255])
        .save_file(&input_path)
        .unwrap();
    let config = Config {
        input_path,
        output_path: test_output_path("pipeline_polaris_trails.png"),
        latitude: 44.5,
        longitude: -69.0,
        elevation: 30.0,
        observation_time: "2024-12-01T22:00:00".to_string(),
        step_rotation_degrees: 1.0,
        total_rotation_degrees: 3.0,
        ..Config::default()
    };

    let summary = Pipeline::default().run(&config).unwrap();

    let horizontal = summary.horizontal.unwrap();
    assert!((horizontal.altitude - 44.5).abs() < 1.0);
    assert_eq!(summary.pivot, pixel_from_horizontal(60, 40, horizontal));
    assert_eq!(summary.total_layers, 3);
    assert!(summary.output_path.exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let config = Config {
        input_path: test_output_path("pipeline_does_not_exist.png"),
        output_path: test_output_path("pipeline_never_written.png"),
        pivot_override: Some(PixelPoint::new(0, 0)),
        ..Config::default()
    };

    assert!(matches!(
        Pipeline::default().run(&config),
        Err(Error::Io { .. })
    ));
}

#[test]
fn unknown_target_fails_before_accumulation() {
    let mut config = quarter_turn_config("pipeline_unknown_target");
    config.pivot_override = None;
    config.target = "Vulcan".to_string();
    config.latitude = 10.0;
    config.observation_time = "2024-01-01T00:00:00Z".to_string();

    assert!(matches!(
        Pipeline::default().run(&config),
        Err(Error::Resolution { .. })
    ));
    assert!(!config.output_path.exists());
}

#[test]
fn cancelled_run_still_writes_partial_result() {
    let config = quarter_turn_config("pipeline_cancelled");

    let summary = Pipeline::default()
        .with_cancel(Arc::new(AtomicBool::new(true)))
        .run(&config)
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.layers_merged, 0);
    let output = Image::read_file(&summary.output_path).unwrap();
    assert_eq!(output, Image::new_black(100, 100));
}
