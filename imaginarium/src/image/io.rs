use std::fs::File;
use std::path::Path;

use image as image_lib;
use tiff::decoder::DecodingResult;

use crate::prelude::*;

pub(crate) fn load_png_jpeg<P: AsRef<Path>>(filename: P) -> Result<Image> {
    let img = image_lib::open(filename)?;

    let color_format = match img.color() {
        image_lib::ColorType::L8 => ColorFormat::L_U8,
        image_lib::ColorType::L16 => ColorFormat::L_U16,
        image_lib::ColorType::La8 => ColorFormat::LA_U8,
        image_lib::ColorType::La16 => ColorFormat::LA_U16,
        image_lib::ColorType::Rgb8 => ColorFormat::RGB_U8,
        image_lib::ColorType::Rgb16 => ColorFormat::RGB_U16,
        image_lib::ColorType::Rgba8 => ColorFormat::RGBA_U8,
        image_lib::ColorType::Rgba16 => ColorFormat::RGBA_U16,
        image_lib::ColorType::Rgb32F => ColorFormat::RGB_F32,
        image_lib::ColorType::Rgba32F => ColorFormat::RGBA_F32,
        other => return Err(Error::UnsupportedColorType(format!("{:?}", other))),
    };

    let desc = ImageDesc::new(img.width(), img.height(), color_format);

    Image::new_with_data(desc, img.into_bytes())
}

pub(crate) fn load_tiff<P: AsRef<Path>>(filename: P) -> Result<Image> {
    // Astrophotography frames easily exceed the default decoder limits.
    let limits = tiff::decoder::Limits::unlimited();
    let mut decoder = tiff::decoder::Decoder::new(File::open(filename)?)?.with_limits(limits);

    let (channel_bits, channel_count) = match decoder.colortype()? {
        tiff::ColorType::Gray(b) => (b, ChannelCount::L),
        tiff::ColorType::GrayA(b) => (b, ChannelCount::LA),
        tiff::ColorType::RGB(b) => (b, ChannelCount::Rgb),
        tiff::ColorType::RGBA(b) => (b, ChannelCount::Rgba),
        other => return Err(Error::UnsupportedColorType(format!("{:?}", other))),
    };

    let (width, height) = decoder.dimensions()?;

    let (bytes, channel_type): (Vec<u8>, ChannelType) = match decoder.read_image()? {
        DecodingResult::U8(buf) => (buf, ChannelType::UInt),
        DecodingResult::U16(buf) => (bytemuck::cast_slice(&buf).to_vec(), ChannelType::UInt),
        DecodingResult::F32(buf) => (bytemuck::cast_slice(&buf).to_vec(), ChannelType::Float),
        _ => {
            return Err(Error::UnsupportedFormat(
                "TIFF sample format not supported".to_string(),
            ));
        }
    };

    let channel_size = ChannelSize::from_bit_count(channel_bits)?;
    let color_format = ColorFormat::from((channel_count, channel_size, channel_type));
    let desc = ImageDesc::new(width, height, color_format);

    Image::new_with_data(desc, bytes)
}

pub(crate) fn save_jpg<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    let format = image.desc().color_format;

    // JPEG has neither alpha nor deep channels; flatten to 8-bit RGB or gray.
    let flattened = match format.channel_count {
        ChannelCount::L | ChannelCount::LA => image.clone().convert(ColorFormat::L_U8)?,
        ChannelCount::Rgb | ChannelCount::Rgba => image.clone().convert(ColorFormat::RGB_U8)?,
    };

    let color_type = match flattened.desc().color_format.channel_count {
        ChannelCount::L => image_lib::ColorType::L8,
        _ => image_lib::ColorType::Rgb8,
    };

    image_lib::save_buffer_with_format(
        filename,
        flattened.bytes(),
        flattened.width(),
        flattened.height(),
        color_type,
        image_lib::ImageFormat::Jpeg,
    )?;

    Ok(())
}

pub(crate) fn save_png<P: AsRef<Path>>(image: &Image, filename: P) -> Result<()> {
    let format = image.desc().color_format;

    if format.channel_type != ChannelType::UInt || format.channel_size == ChannelSize::_32bit {
        return Err(Error::UnsupportedFormat(format!("PNG color format: {}", format)));
    }

    let color_type = match (format.channel_size, format.channel_count) {
        (ChannelSize::_8bit, ChannelCount::L) => image_lib::ColorType::L8,
        (ChannelSize::_8bit, ChannelCount::LA) => image_lib::ColorType::La8,
        (ChannelSize::_8bit, ChannelCount::Rgb) => image_lib::ColorType::Rgb8,
        (ChannelSize::_8bit, ChannelCount::Rgba) => image_lib::ColorType::Rgba8,
        (_, ChannelCount::L) => image_lib::ColorType::L16,
        (_, ChannelCount::LA) => image_lib::ColorType::La16,
        (_, ChannelCount::Rgb) => image_lib::ColorType::Rgb16,
        (_, ChannelCount::Rgba) => image_lib::ColorType::Rgba16,
    };

    image_lib::save_buffer_with_format(
        filename,
        image.bytes(),
        image.width(),
        image.height(),
        color_type,
        image_lib::ImageFormat::Png,
    )?;

    Ok(())
}

pub(crate) use super::tiff::save_tiff;
