use std::fs::File;
use std::mem::size_of;
use std::path::Path;

use bytemuck::Pod;
use tiff::encoder::{TiffEncoder, TiffValue, colortype};

use crate::prelude::*;

macro_rules! dispatch_tiff {
    ($image:expr, $filename:expr, {
        $( ($count:ident, $size:ident, $type:ident) => $color_type:ty ),+ $(,)?
    }) => {{
        let format = $image.desc().color_format;
        match (format.channel_count, format.channel_size, format.channel_type) {
            $(
                (ChannelCount::$count, ChannelSize::$size, ChannelType::$type) => {
                    save_tiff_internal::<$color_type, _>($image, $filename)?
                }
            )+
            _ => {
                return Err(Error::UnsupportedFormat(format!("TIFF color format: {}", format)));
            }
        }
    }};
}

pub(crate) fn save_tiff<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    // The encoder has no gray+alpha color type; widen to RGBA of the same depth.
    if image.desc().color_format.channel_count == ChannelCount::LA {
        let format = image.desc().color_format;
        let widened = ColorFormat::from((ChannelCount::Rgba, format.channel_size, format.channel_type));
        return save_tiff(&image.clone().convert(widened)?, filename);
    }

    dispatch_tiff!(image, filename, {
        (L, _8bit, UInt) => colortype::Gray8,
        (L, _16bit, UInt) => colortype::Gray16,
        (L, _32bit, Float) => colortype::Gray32Float,
        (Rgb, _8bit, UInt) => colortype::RGB8,
        (Rgb, _16bit, UInt) => colortype::RGB16,
        (Rgb, _32bit, Float) => colortype::RGB32Float,
        (Rgba, _8bit, UInt) => colortype::RGBA8,
        (Rgba, _16bit, UInt) => colortype::RGBA16,
        (Rgba, _32bit, Float) => colortype::RGBA32Float,
    });

    Ok(())
}

fn save_tiff_internal<CT, P: AsRef<Path>>(image: &Image, filename: P) -> Result<()>
where
    CT: colortype::ColorType,
    CT::Inner: Pod,
    [CT::Inner]: TiffValue,
{
    // Byte buffers are not guaranteed to be aligned for wider samples.
    let samples: Vec<CT::Inner> = image
        .bytes()
        .chunks_exact(size_of::<CT::Inner>())
        .map(bytemuck::pod_read_unaligned)
        .collect();

    let mut file = File::create(filename)?;
    let mut tiff = TiffEncoder::new(&mut file)?;
    let img = tiff.new_image::<CT>(image.width(), image.height())?;

    img.write_data(&samples)?;

    Ok(())
}
