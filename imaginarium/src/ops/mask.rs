//! Single-channel mask helpers: extraction, inversion and attaching a mask as alpha.

use rayon::prelude::*;

use crate::common::color_format::{ChannelCount, ColorFormat};
use crate::common::error::{Error, Result};
use crate::image::{Image, ImageDesc};

fn ensure_mask(mask: &Image) -> Result<()> {
    if mask.desc().color_format != ColorFormat::L_U8 {
        return Err(Error::UnsupportedFormat(format!(
            "mask must be {}, got {}",
            ColorFormat::L_U8,
            mask.desc().color_format
        )));
    }
    Ok(())
}

/// Alpha channel of an image as an `L` 8-bit mask.
pub fn extract_alpha(image: &Image) -> Result<Image> {
    let format = image.desc().color_format;
    if !format.has_alpha() {
        return Err(Error::UnsupportedFormat(format!(
            "image has no alpha channel: {}",
            format
        )));
    }

    let alpha_format = match format.channel_count {
        ChannelCount::LA => ColorFormat::LA_U8,
        _ => ColorFormat::RGBA_U8,
    };
    let image = image.clone().convert(alpha_format)?;
    let channels = alpha_format.channel_count.channel_count() as usize;

    let bytes = image
        .bytes()
        .chunks_exact(channels)
        .map(|px| px[channels - 1])
        .collect();
    let desc = ImageDesc::new(image.width(), image.height(), ColorFormat::L_U8);

    Image::new_with_data(desc, bytes)
}

/// Rec. 709 luminance of an image as an `L` 8-bit mask.
pub fn luminance(image: &Image) -> Result<Image> {
    image.clone().convert(ColorFormat::L_U8)
}

/// 255 - v for every mask value.
pub fn invert(mask: &Image) -> Result<Image> {
    ensure_mask(mask)?;

    let mut inverted = mask.clone();
    inverted
        .bytes_mut()
        .par_iter_mut()
        .for_each(|v| *v = u8::MAX - *v);

    Ok(inverted)
}

/// Copy of `image` as 8-bit RGBA with its alpha channel replaced by `mask`.
pub fn put_alpha(image: &Image, mask: &Image) -> Result<Image> {
    ensure_mask(mask)?;
    image.ensure_same_size(mask)?;

    let mut rgba = image.clone().convert(ColorFormat::RGBA_U8)?;
    rgba.bytes_mut()
        .par_chunks_exact_mut(4)
        .zip(mask.bytes().par_iter())
        .for_each(|(px, &m)| px[3] = m);

    Ok(rgba)
}
