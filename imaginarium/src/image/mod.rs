mod io;
mod tiff;


use std::path::Path;

use crate::common::conversion::convert_image;
use crate::common::{ColorFormat, Error, Result};

/// Supported image file extensions for reading and writing.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif"];

/// Pixel layout of an [`Image`]. Rows are tightly packed, `stride` is bytes per row.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub color_format: ColorFormat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    desc: ImageDesc,
    bytes: Vec<u8>,
}

impl Image {
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Zero-filled image: black and, for alpha formats, fully transparent.
    pub fn new_empty(desc: ImageDesc) -> Result<Image> {
        desc.color_format.validate()?;

        let bytes = vec![0; desc.size_in_bytes()];

        Ok(Image { desc, bytes })
    }

    /// Opaque black 8-bit RGBA image.
    pub fn new_black(width: u32, height: u32) -> Image {
        Self::new_filled_u8(width, height, [0, 0, 0, u8::MAX])
    }

    /// 8-bit RGBA image with every pixel set to `rgba`.
    pub fn new_filled_u8(width: u32, height: u32, rgba: [u8; 4]) -> Image {
        let desc = ImageDesc::new(width, height, ColorFormat::RGBA_U8);
        let pixel_count = width as usize * height as usize;

        let mut bytes = Vec::with_capacity(desc.size_in_bytes());
        for _ in 0..pixel_count {
            bytes.extend_from_slice(&rgba);
        }

        Image { desc, bytes }
    }

    pub fn new_with_data(desc: ImageDesc, bytes: Vec<u8>) -> Result<Image> {
        desc.color_format.validate()?;

        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::InvalidColorFormat(format!(
                "bytes length {} does not match expected size {}",
                bytes.len(),
                desc.size_in_bytes()
            )));
        }

        Ok(Image { desc, bytes })
    }

    pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Image> {
        let extension = lowercase_extension(filename.as_ref())?;

        let image = match extension.as_str() {
            "png" | "jpeg" | "jpg" => io::load_png_jpeg(&filename)?,
            "tiff" | "tif" => io::load_tiff(&filename)?,

            _ => return Err(Error::InvalidExtension(extension)),
        };

        tracing::debug!(
            "loaded {} ({})",
            filename.as_ref().display(),
            image.desc
        );

        Ok(image)
    }

    pub fn save_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let extension = lowercase_extension(filename.as_ref())?;

        match extension.as_str() {
            "png" => io::save_png(self, &filename)?,
            "jpeg" | "jpg" => io::save_jpg(self, &filename)?,
            "tiff" | "tif" => io::save_tiff(self, &filename)?,

            _ => return Err(Error::InvalidExtension(extension)),
        };

        tracing::debug!("saved {} ({})", filename.as_ref().display(), self.desc);

        Ok(())
    }

    pub fn convert(self, color_format: ColorFormat) -> Result<Image> {
        color_format.validate()?;

        if self.desc.color_format == color_format {
            return Ok(self);
        }

        let desc = ImageDesc::new(self.desc.width, self.desc.height, color_format);

        let mut result = Image::new_empty(desc)?;

        convert_image(&self, &mut result)?;

        Ok(result)
    }

    pub fn bytes_per_pixel(&self) -> u8 {
        self.desc.color_format.byte_count()
    }

    /// Raw bytes of pixel (x, y). Panics when the coordinates are out of range.
    pub fn pixel_u8(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.bytes_per_pixel() as usize;
        let offset = self.desc.pixel_offset(x, y);
        &self.bytes[offset..offset + bpp]
    }

    pub fn pixel_u8_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let bpp = self.bytes_per_pixel() as usize;
        let offset = self.desc.pixel_offset(x, y);
        &mut self.bytes[offset..offset + bpp]
    }

    /// Fails with [`Error::DimensionMismatch`] unless `other` has the same width and height.
    pub fn ensure_same_size(&self, other: &Image) -> Result<()> {
        if self.desc.width != other.desc.width || self.desc.height != other.desc.height {
            return Err(Error::DimensionMismatch {
                expected: (self.desc.width, self.desc.height),
                actual: (other.desc.width, other.desc.height),
            });
        }

        Ok(())
    }
}

impl ImageDesc {
    pub fn new(width: u32, height: u32, color_format: ColorFormat) -> Self {
        Self {
            width,
            height,
            stride: width as usize * color_format.byte_count() as usize,
            color_format,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.height as usize * self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub(crate) fn pixel_offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.stride + x as usize * self.color_format.byte_count() as usize
    }
}

impl std::fmt::Display for ImageDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.color_format)
    }
}

fn lowercase_extension(filename: &Path) -> Result<String> {
    let extension = filename
        .extension()
        .and_then(|os_str| os_str.to_str())
        .ok_or_else(|| Error::InvalidExtension("missing extension".to_string()))?
        .to_ascii_lowercase();

    Ok(extension)
}
