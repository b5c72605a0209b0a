use std::f32::consts::FRAC_PI_2;

use strum::IntoEnumIterator;

use crate::prelude::*;

fn black_with_white_pixel(width: u32, height: u32, x: u32, y: u32) -> Image {
    let mut img = Image::new_black(width, height);
    img.pixel_u8_mut(x, y).copy_from_slice(&[255, 255, 255, 255]);
    img
}

fn checkerboard(size: u32) -> Image {
    let mut img = Image::new_black(size, size);
    for y in 0..size {
        for x in 0..size {
            let v = if (x + y) % 2 == 0 { 230 } else { 20 };
            img.pixel_u8_mut(x, y).copy_from_slice(&[v, v / 2, 255 - v, 255]);
        }
    }
    img
}

#[test]
fn identity_reproduces_input_for_every_filter() {
    let input = checkerboard(9);

    for filter in FilterMode::iter() {
        let mut output = Image::new_empty(*input.desc()).unwrap();
        Transform::new()
            .filter(filter)
            .apply_cpu(&input, &mut output)
            .unwrap();
        assert_eq!(output, input, "filter {}", filter);
    }
}

#[test]
fn zero_rotation_about_center_is_exact() {
    let input = checkerboard(16);
    let mut output = Image::new_empty(*input.desc()).unwrap();

    Transform::new()
        .rotate_around(0.0, Vec2::new(8.0, 8.0))
        .apply_cpu(&input, &mut output)
        .unwrap();

    assert_eq!(output, input);
}

#[test]
fn quarter_turn_moves_pixel_clockwise_as_displayed() {
    let input = black_with_white_pixel(21, 21, 15, 10);
    let mut output = Image::new_empty(*input.desc()).unwrap();

    Transform::new()
        .rotate_around(FRAC_PI_2, Vec2::new(10.0, 10.0))
        .filter(FilterMode::Bicubic)
        .apply_cpu(&input, &mut output)
        .unwrap();

    // (15, 10) is 5 px right of the center; a clockwise quarter turn puts it 5 px below.
    assert_eq!(output.pixel_u8(10, 15), &[255, 255, 255, 255]);
    assert_eq!(output.pixel_u8(15, 10), &[0, 0, 0, 255]);
}

#[test]
fn samples_outside_input_are_transparent() {
    let input = Image::new_filled_u8(10, 10, [200, 200, 200, 255]);
    let mut output = Image::new_empty(*input.desc()).unwrap();

    Transform::new()
        .translate(Vec2::new(6.0, 0.0))
        .filter(FilterMode::Nearest)
        .apply_cpu(&input, &mut output)
        .unwrap();

    assert_eq!(output.pixel_u8(0, 5), &[0, 0, 0, 0]);
    assert_eq!(output.pixel_u8(5, 5), &[0, 0, 0, 0]);
    assert_eq!(output.pixel_u8(6, 5), &[200, 200, 200, 255]);
    assert_eq!(output.pixel_u8(9, 5), &[200, 200, 200, 255]);
}

#[test]
fn bilinear_half_pixel_shift_averages_neighbors() {
    let desc = ImageDesc::new(2, 1, ColorFormat::L_U8);
    let input = Image::new_with_data(desc, vec![100, 200]).unwrap();
    let mut output = Image::new_empty(desc).unwrap();

    Transform::new()
        .translate(Vec2::new(-0.5, 0.0))
        .filter(FilterMode::Bilinear)
        .apply_cpu(&input, &mut output)
        .unwrap();

    assert_eq!(output.bytes()[0], 150);
}

#[test]
fn scale_resizes_into_larger_output() {
    let desc = ImageDesc::new(2, 2, ColorFormat::L_U8);
    let input = Image::new_with_data(desc, vec![10, 10, 10, 10]).unwrap();
    let mut output = Image::new_empty(ImageDesc::new(4, 4, ColorFormat::L_U8)).unwrap();

    Transform::new()
        .scale(Vec2::new(2.0, 2.0))
        .filter(FilterMode::Nearest)
        .apply_cpu(&input, &mut output)
        .unwrap();

    assert!(output.bytes()[..2].iter().all(|&v| v == 10));
}

#[test]
fn singular_matrix_is_rejected() {
    let input = Image::new_black(4, 4);
    let mut output = Image::new_black(4, 4);

    let result = Transform::new()
        .scale(Vec2::new(0.0, 1.0))
        .apply_cpu(&input, &mut output);

    assert!(matches!(result, Err(Error::InvalidTransform(_))));
}

#[test]
fn mismatched_formats_are_rejected() {
    let input = Image::new_black(4, 4);
    let mut output = Image::new_empty(ImageDesc::new(4, 4, ColorFormat::RGB_U8)).unwrap();

    let result = Transform::new().apply_cpu(&input, &mut output);
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn filter_mode_names() {
    assert_eq!("lanczos3".parse::<FilterMode>().unwrap(), FilterMode::Lanczos3);
    assert_eq!("Bicubic".parse::<FilterMode>().unwrap(), FilterMode::Bicubic);
    assert_eq!(FilterMode::default(), FilterMode::Bicubic);
    assert!("sinc".parse::<FilterMode>().is_err());
}

#[test]
fn resize_keeps_flat_regions_flat() {
    let desc = ImageDesc::new(4, 3, ColorFormat::L_U8);
    let input = Image::new_with_data(desc, vec![77; 12]).unwrap();

    let output = resize(&input, 8, 6, FilterMode::Bilinear).unwrap();
    assert_eq!(output.desc().width, 8);
    assert_eq!(output.desc().height, 6);
    assert!(output.bytes().iter().all(|&v| v == 77));
}

#[test]
fn rotated_flat_image_never_exceeds_source() {
    let gray = [100, 100, 100, 255];
    let input = Image::new_filled_u8(40, 30, gray);

    for filter in [FilterMode::Bicubic, FilterMode::Lanczos3] {
        let mut output = Image::new_empty(*input.desc()).unwrap();
        Transform::new()
            .rotate_around(2f32.to_radians(), Vec2::new(20.0, 15.0))
            .filter(filter)
            .apply_cpu(&input, &mut output)
            .unwrap();

        for px in output.bytes().chunks_exact(4) {
            assert!(px == gray || px == [0, 0, 0, 0], "filter {}: {:?}", filter, px);
        }
        assert!(output.bytes().chunks_exact(4).any(|px| px == [0, 0, 0, 0]));
        assert_eq!(output.pixel_u8(20, 15), &gray, "filter {}", filter);
    }
}

#[test]
fn edge_taps_repeat_the_border_pixel() {
    let desc = ImageDesc::new(3, 1, ColorFormat::L_U8);
    let input = Image::new_with_data(desc, vec![200, 200, 200]).unwrap();
    let mut output = Image::new_empty(desc).unwrap();

    Transform::new()
        .translate(Vec2::new(0.25, 0.0))
        .filter(FilterMode::Bicubic)
        .apply_cpu(&input, &mut output)
        .unwrap();

    assert_eq!(output.bytes(), &[200, 200, 200]);
}

#[test]
fn resize_to_zero_is_rejected() {
    let input = Image::new_black(4, 4);
    assert!(matches!(
        resize(&input, 0, 4, FilterMode::Bilinear),
        Err(Error::InvalidTransform(_))
    ));
}
