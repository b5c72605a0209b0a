// Color formats
pub use crate::common::{
    ALL_FORMATS, ALPHA_FORMATS, ChannelCount, ChannelSize, ChannelType, ColorFormat,
};

// Error handling
pub use crate::common::{Error, Result};

// Image types
pub use crate::image::{Image, ImageDesc, SUPPORTED_EXTENSIONS};

// Operations
pub use crate::ops::mask;
pub use crate::ops::{Affine2, Blend, BlendMode, FilterMode, Transform, Vec2, resize};
