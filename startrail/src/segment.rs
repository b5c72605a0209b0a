//! Foreground/sky separation.
//!
//! The segmentation model runs outside this crate; a [`Segmenter`] only has to
//! turn an image into a soft `L` 8-bit mask where 255 marks foreground (land)
//! and 0 marks sky.

use std::path::{Path, PathBuf};

use imaginarium::{ColorFormat, FilterMode, Image, mask};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub trait Segmenter: Send + Sync {
    /// Soft foreground mask with the same dimensions as `image`.
    fn predict(&self, image: &Image) -> Result<Image>;
}

/// What to do when a mask does not match the image it is applied to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaskSizePolicy {
    #[default]
    Fail,
    /// Bilinear rescale to the image size.
    Resize,
}

/// Reads a mask written by an earlier segmentation run.
///
/// The alpha channel is used when the file has one, luminance otherwise.
#[derive(Debug, Clone)]
pub struct MaskFileSegmenter {
    path: PathBuf,
    policy: MaskSizePolicy,
}

impl MaskFileSegmenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: MaskSizePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MaskSizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> MaskSizePolicy {
        self.policy
    }

    fn load_mask(&self) -> Result<Image> {
        let file = Image::read_file(&self.path).map_err(|e| Error::image_file(&self.path, e))?;

        let mask = if file.desc().color_format.has_alpha() {
            mask::extract_alpha(&file)
        } else {
            mask::luminance(&file)
        };

        mask.map_err(|e| Error::image_file(&self.path, e))
    }
}

impl Segmenter for MaskFileSegmenter {
    fn predict(&self, image: &Image) -> Result<Image> {
        let mask = self.load_mask()?;
        tracing::debug!(
            "loaded mask {} ({}x{})",
            self.path.display(),
            mask.width(),
            mask.height()
        );

        conform_mask(mask, image.width(), image.height(), self.policy)
    }
}

/// Brings `mask` to `width` x `height` according to `policy`.
pub fn conform_mask(mask: Image, width: u32, height: u32, policy: MaskSizePolicy) -> Result<Image> {
    let actual = (mask.width(), mask.height());
    if actual == (width, height) {
        return Ok(mask);
    }

    match policy {
        MaskSizePolicy::Fail => Err(Error::DimensionMismatch {
            expected: (width, height),
            actual,
        }),
        MaskSizePolicy::Resize => {
            tracing::info!(
                "resizing mask from {}x{} to {}x{}",
                actual.0,
                actual.1,
                width,
                height
            );
            let mask = mask.convert(ColorFormat::L_U8)?;
            Ok(imaginarium::resize(&mask, width, height, FilterMode::Bilinear)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use common::test_utils::test_output_path;
    use imaginarium::ImageDesc;

    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> Image {
        Image::new_with_data(
            ImageDesc::new(width, height, ColorFormat::L_U8),
            vec![value; (width * height) as usize],
        )
        .unwrap()
    }

    #[test]
    fn alpha_channel_is_preferred() {
        let path = test_output_path("segment_alpha_mask.png");
        let mut rgba = Image::new_filled_u8(6, 4, [255, 255, 255, 0]);
        for x in 0..6 {
            rgba.pixel_u8_mut(x, 3)[3] = 255;
        }
        rgba.save_file(&path).unwrap();

        let segmenter = MaskFileSegmenter::new(&path);
        let mask = segmenter.predict(&Image::new_black(6, 4)).unwrap();

        assert_eq!(mask.desc().color_format, ColorFormat::L_U8);
        assert_eq!(mask.pixel_u8(0, 0), [0]);
        assert_eq!(mask.pixel_u8(5, 3), [255]);
    }

    #[test]
    fn luminance_is_used_without_alpha() {
        let path = test_output_path("segment_gray_mask.png");
        gray(5, 5, 200).save_file(&path).unwrap();

        let mask = MaskFileSegmenter::new(&path)
            .predict(&Image::new_black(5, 5))
            .unwrap();

        assert!(mask.bytes().iter().all(|&v| v == 200));
    }

    #[test]
    fn size_mismatch_fails_by_default() {
        let path = test_output_path("segment_small_mask.png");
        gray(4, 4, 255).save_file(&path).unwrap();

        let result = MaskFileSegmenter::new(&path).predict(&Image::new_black(8, 6));

        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: (8, 6),
                actual: (4, 4)
            })
        ));
    }

    #[test]
    fn size_mismatch_resizes_when_allowed() {
        let mask = conform_mask(gray(4, 4, 255), 8, 6, MaskSizePolicy::Resize).unwrap();

        assert_eq!((mask.width(), mask.height()), (8, 6));
        assert_eq!(mask.pixel_u8(3, 3), [255]);
    }

    #[test]
    fn missing_mask_file_is_an_io_error() {
        let segmenter = MaskFileSegmenter::new(test_output_path("segment_missing_mask.png"));
        assert!(matches!(
            segmenter.predict(&Image::new_black(2, 2)),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!("resize".parse::<MaskSizePolicy>().unwrap(), MaskSizePolicy::Resize);
        assert_eq!("FAIL".parse::<MaskSizePolicy>().unwrap(), MaskSizePolicy::Fail);
        assert_eq!(MaskSizePolicy::Resize.to_string(), "resize");
    }
}
