use rayon::prelude::*;

use crate::common::color_format::*;
use crate::common::error::{Error, Result};
use crate::image::Image;

/// Rec. 709 luminance weights.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

#[inline]
pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Reads channel `index` of a row as a normalized value in [0, 1].
#[inline]
fn read_channel(row: &[u8], format: ColorFormat, index: usize) -> f32 {
    match (format.channel_size, format.channel_type) {
        (ChannelSize::_8bit, _) => row[index] as f32 / u8::MAX as f32,
        (ChannelSize::_16bit, _) => {
            let offset = index * 2;
            let value = u16::from_ne_bytes([row[offset], row[offset + 1]]);
            value as f32 / u16::MAX as f32
        }
        (ChannelSize::_32bit, ChannelType::Float) => {
            let offset = index * 4;
            f32::from_ne_bytes([row[offset], row[offset + 1], row[offset + 2], row[offset + 3]])
        }
        (ChannelSize::_32bit, ChannelType::UInt) => {
            let offset = index * 4;
            let value =
                u32::from_ne_bytes([row[offset], row[offset + 1], row[offset + 2], row[offset + 3]]);
            (value as f64 / u32::MAX as f64) as f32
        }
    }
}

#[inline]
fn write_channel(row: &mut [u8], format: ColorFormat, index: usize, value: f32) {
    match (format.channel_size, format.channel_type) {
        (ChannelSize::_8bit, _) => {
            row[index] = (value * u8::MAX as f32).round().clamp(0.0, u8::MAX as f32) as u8;
        }
        (ChannelSize::_16bit, _) => {
            let value = (value * u16::MAX as f32).round().clamp(0.0, u16::MAX as f32) as u16;
            row[index * 2..index * 2 + 2].copy_from_slice(&value.to_ne_bytes());
        }
        (ChannelSize::_32bit, ChannelType::Float) => {
            row[index * 4..index * 4 + 4].copy_from_slice(&value.to_ne_bytes());
        }
        (ChannelSize::_32bit, ChannelType::UInt) => {
            let value = (value as f64 * u32::MAX as f64).round().clamp(0.0, u32::MAX as f64) as u32;
            row[index * 4..index * 4 + 4].copy_from_slice(&value.to_ne_bytes());
        }
    }
}

/// Reads pixel `x` of a row as normalized RGBA. Gray is replicated, missing alpha is opaque.
#[inline]
fn read_rgba(row: &[u8], format: ColorFormat, x: usize) -> [f32; 4] {
    let channels = format.channel_count.channel_count() as usize;
    let base = x * channels;

    match format.channel_count {
        ChannelCount::L => {
            let l = read_channel(row, format, base);
            [l, l, l, 1.0]
        }
        ChannelCount::LA => {
            let l = read_channel(row, format, base);
            [l, l, l, read_channel(row, format, base + 1)]
        }
        ChannelCount::Rgb => [
            read_channel(row, format, base),
            read_channel(row, format, base + 1),
            read_channel(row, format, base + 2),
            1.0,
        ],
        ChannelCount::Rgba => [
            read_channel(row, format, base),
            read_channel(row, format, base + 1),
            read_channel(row, format, base + 2),
            read_channel(row, format, base + 3),
        ],
    }
}

#[inline]
fn write_rgba(row: &mut [u8], format: ColorFormat, x: usize, rgba: [f32; 4]) {
    let channels = format.channel_count.channel_count() as usize;
    let base = x * channels;

    match format.channel_count {
        ChannelCount::L => {
            write_channel(row, format, base, luminance(rgba[0], rgba[1], rgba[2]));
        }
        ChannelCount::LA => {
            write_channel(row, format, base, luminance(rgba[0], rgba[1], rgba[2]));
            write_channel(row, format, base + 1, rgba[3]);
        }
        ChannelCount::Rgb => {
            for (c, value) in rgba.iter().take(3).enumerate() {
                write_channel(row, format, base + c, *value);
            }
        }
        ChannelCount::Rgba => {
            for (c, value) in rgba.iter().enumerate() {
                write_channel(row, format, base + c, *value);
            }
        }
    }
}

/// Converts pixel data of `from` into the color format of `to`.
pub(crate) fn convert_image(from: &Image, to: &mut Image) -> Result<()> {
    let from_desc = *from.desc();
    let to_desc = *to.desc();

    if from_desc.width != to_desc.width || from_desc.height != to_desc.height {
        return Err(Error::DimensionMismatch {
            expected: (from_desc.width, from_desc.height),
            actual: (to_desc.width, to_desc.height),
        });
    }

    if to_desc.size_in_bytes() == 0 {
        return Ok(());
    }

    let width = from_desc.width as usize;
    let from_bytes = from.bytes();

    to.bytes_mut()
        .par_chunks_mut(to_desc.stride)
        .enumerate()
        .for_each(|(y, to_row)| {
            let from_row = &from_bytes[y * from_desc.stride..(y + 1) * from_desc.stride];
            for x in 0..width {
                let rgba = read_rgba(from_row, from_desc.color_format, x);
                write_rgba(to_row, to_desc.color_format, x, rgba);
            }
        });

    Ok(())
}
