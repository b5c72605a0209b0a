pub(crate) mod color_format;
pub(crate) mod conversion;
pub(crate) mod error;

pub use color_format::{
    ALL_FORMATS, ALPHA_FORMATS, ChannelCount, ChannelSize, ChannelType, ColorFormat,
};
pub use error::{Error, Result};
