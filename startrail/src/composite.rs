//! Mask compositing around the trail accumulation.

use imaginarium::{Blend, BlendMode, ColorFormat, Image, mask};

use crate::error::{Error, Result};

fn ensure_same_size(expected: &Image, actual: &Image) -> Result<()> {
    if (expected.width(), expected.height()) != (actual.width(), actual.height()) {
        return Err(Error::DimensionMismatch {
            expected: (expected.width(), expected.height()),
            actual: (actual.width(), actual.height()),
        });
    }
    Ok(())
}

/// Sky-only copy of `image` over opaque black; `mask` is 255 on foreground.
pub fn isolate_sky(image: &Image, mask: &Image) -> Result<Image> {
    ensure_same_size(image, mask)?;

    let sky = mask::put_alpha(image, &mask::invert(mask)?)?;
    let mut output = Image::new_black(image.width(), image.height());
    Blend::new(BlendMode::Normal, 1.0).apply_onto(&sky, &mut output)?;

    Ok(output)
}

/// `trails * (1 - m) + original * m`, as opaque 8-bit RGBA.
pub fn overlay_foreground(trails: &Image, original: &Image, mask: &Image) -> Result<Image> {
    ensure_same_size(trails, original)?;
    ensure_same_size(trails, mask)?;

    let foreground = mask::put_alpha(original, mask)?;
    let mut output = trails.clone().convert(ColorFormat::RGBA_U8)?;
    Blend::new(BlendMode::Normal, 1.0).apply_onto(&foreground, &mut output)?;

    tracing::debug!("foreground composited over trails");

    Ok(output)
}
