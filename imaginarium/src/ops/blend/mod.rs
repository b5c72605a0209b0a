mod cpu;


use crate::common::color_format::ColorFormat;
use crate::common::error::{Error, Result};
use crate::image::Image;

const SUPPORTED_CPU_FORMATS: &[ColorFormat] = &[
    ColorFormat::L_U8,
    ColorFormat::LA_U8,
    ColorFormat::RGB_U8,
    ColorFormat::RGBA_U8,
];

/// Blend modes for combining two images.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BlendMode {
    /// Alpha compositing: result = src * a + dst * (1 - a), a = src alpha * blend alpha.
    #[default]
    Normal,
    /// Per-channel maximum. Fully transparent source pixels leave dst untouched.
    Lighten,
}

/// Parameters for image blending.
#[derive(Debug, Clone, Copy)]
pub struct Blend {
    pub mode: BlendMode,
    /// Strength of the source in [0.0, 1.0].
    pub alpha: f32,
}

impl Default for Blend {
    fn default() -> Self {
        Self {
            mode: BlendMode::Normal,
            alpha: 1.0,
        }
    }
}

impl Blend {
    pub fn new(mode: BlendMode, alpha: f32) -> Self {
        Self { mode, alpha }
    }

    /// Blends `src` (top) over `dst` (bottom) into `output`.
    ///
    /// All three images must share dimensions and an 8-bit color format.
    pub fn apply_cpu(&self, src: &Image, dst: &Image, output: &mut Image) -> Result<()> {
        validate(src, dst)?;
        validate(src, output)?;

        output.bytes_mut().copy_from_slice(dst.bytes());
        cpu::apply_onto(self, src, output);

        Ok(())
    }

    /// Blends `src` over `dst` in place.
    pub fn apply_onto(&self, src: &Image, dst: &mut Image) -> Result<()> {
        validate(src, dst)?;

        cpu::apply_onto(self, src, dst);

        Ok(())
    }
}

fn validate(a: &Image, b: &Image) -> Result<()> {
    a.ensure_same_size(b)?;

    let format = a.desc().color_format;
    if format != b.desc().color_format {
        return Err(Error::UnsupportedFormat(format!(
            "blend color format mismatch: {} vs {}",
            format,
            b.desc().color_format
        )));
    }
    if !SUPPORTED_CPU_FORMATS.contains(&format) {
        return Err(Error::UnsupportedFormat(format!("blend color format: {}", format)));
    }

    Ok(())
}
