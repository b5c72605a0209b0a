mod cpu;
mod kernel;

#[cfg(test)]
mod tests;

pub use glam::{Affine2, Vec2};

use crate::common::color_format::ColorFormat;
use crate::common::error::{Error, Result};
use crate::image::{Image, ImageDesc};

const SUPPORTED_CPU_FORMATS: &[ColorFormat] = &[
    ColorFormat::L_U8,
    ColorFormat::LA_U8,
    ColorFormat::RGB_U8,
    ColorFormat::RGBA_U8,
];

/// Filter mode for image sampling during transformation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Nearest neighbor sampling.
    Nearest,
    /// Bilinear interpolation over 2x2 pixels.
    Bilinear,
    /// Catmull-Rom bicubic interpolation over 4x4 pixels.
    #[default]
    Bicubic,
    /// Normalized Lanczos (a = 3) over 6x6 pixels.
    Lanczos3,
}

/// Image transformation parameters.
///
/// `transform` maps input pixel coordinates to output pixel coordinates, with
/// pixel (x, y) addressed at integer coordinates and the y axis pointing down.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub transform: Affine2,
    pub filter: FilterMode,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            filter: FilterMode::default(),
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn affine(mut self, transform: Affine2) -> Self {
        self.transform = transform;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.transform *= Affine2::from_scale(scale);
        self
    }

    /// Rotation about the origin, angle in radians.
    ///
    /// With the y axis pointing down, positive angles turn clockwise as displayed.
    pub fn rotate(mut self, angle: f32) -> Self {
        self.transform *= Affine2::from_angle(angle);
        self
    }

    /// Rotation around a center point, angle in radians (clockwise as displayed).
    pub fn rotate_around(mut self, angle: f32, center: Vec2) -> Self {
        self.transform *= Affine2::from_translation(center)
            * Affine2::from_angle(angle)
            * Affine2::from_translation(-center);
        self
    }

    pub fn translate(mut self, translation: Vec2) -> Self {
        self.transform *= Affine2::from_translation(translation);
        self
    }

    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Resamples `input` into `output` through the inverse of the transform.
    ///
    /// The output image dimensions determine the size of the result. Output
    /// pixels whose sample lands outside every input pixel footprint are
    /// transparent (all channels 0). Inside, filter taps past the edge reuse
    /// the nearest edge pixel. Input and output must share an 8-bit color
    /// format.
    pub fn apply_cpu(&self, input: &Image, output: &mut Image) -> Result<()> {
        let format = input.desc().color_format;
        if format != output.desc().color_format {
            return Err(Error::UnsupportedFormat(format!(
                "transform color format mismatch: {} vs {}",
                format,
                output.desc().color_format
            )));
        }
        if !SUPPORTED_CPU_FORMATS.contains(&format) {
            return Err(Error::UnsupportedFormat(format!(
                "transform color format: {}",
                format
            )));
        }

        let determinant = self.transform.matrix2.determinant();
        if !determinant.is_finite() || determinant.abs() < f32::EPSILON {
            return Err(Error::InvalidTransform(format!(
                "matrix is not invertible (determinant {})",
                determinant
            )));
        }

        cpu::apply(self, input, output);

        Ok(())
    }
}

/// Resamples `input` to `width` x `height`, aligning pixel centers of both grids.
pub fn resize(input: &Image, width: u32, height: u32, filter: FilterMode) -> Result<Image> {
    if input.desc().is_empty() || width == 0 || height == 0 {
        return Err(Error::InvalidTransform(format!(
            "cannot resize {} to {}x{}",
            input.desc(),
            width,
            height
        )));
    }

    let scale = Vec2::new(
        width as f32 / input.width() as f32,
        height as f32 / input.height() as f32,
    );
    let half = Vec2::splat(0.5);
    let transform = Affine2::from_translation(-half)
        * Affine2::from_scale(scale)
        * Affine2::from_translation(half);

    let desc = ImageDesc::new(width, height, input.desc().color_format);
    let mut output = Image::new_empty(desc)?;

    Transform::new()
        .affine(transform)
        .filter(filter)
        .apply_cpu(input, &mut output)?;

    Ok(output)
}
