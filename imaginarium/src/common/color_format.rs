use crate::common::error::{Error, Result};

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelCount {
    L = 1,
    LA = 2,
    Rgb = 3,
    #[default]
    Rgba = 4,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelSize {
    #[default]
    _8bit = 1,
    _16bit = 2,
    _32bit = 4,
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
#[repr(u8)]
pub enum ChannelType {
    #[default]
    UInt,
    Float,
}

#[derive(Clone, Copy, Debug, Hash, Default, PartialEq, Eq)]
pub struct ColorFormat {
    pub channel_count: ChannelCount,
    pub channel_size: ChannelSize,
    pub channel_type: ChannelType,
}

impl ChannelCount {
    pub fn channel_count(&self) -> u8 {
        *self as u8
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, ChannelCount::LA | ChannelCount::Rgba)
    }

    /// Number of channels carrying color (or gray) information.
    pub fn color_channels(&self) -> u8 {
        if self.has_alpha() {
            self.channel_count() - 1
        } else {
            self.channel_count()
        }
    }
}

impl ChannelSize {
    pub fn byte_count(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn from_bit_count(bit_count: u8) -> Result<ChannelSize> {
        match bit_count {
            8 => Ok(ChannelSize::_8bit),
            16 => Ok(ChannelSize::_16bit),
            32 => Ok(ChannelSize::_32bit),
            _ => Err(Error::InvalidColorFormat(format!(
                "invalid channel size: {} bits",
                bit_count
            ))),
        }
    }
}

impl ColorFormat {
    pub fn byte_count(&self) -> u8 {
        self.channel_count.channel_count() * self.channel_size.byte_count()
    }

    pub fn has_alpha(&self) -> bool {
        self.channel_count.has_alpha()
    }

    pub fn is_supported(&self) -> bool {
        ALL_FORMATS.contains(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.is_supported() {
            return Err(Error::InvalidColorFormat(format!(
                "unsupported color format: {:?}",
                self
            )));
        }
        Ok(())
    }
}

impl From<(ChannelCount, ChannelSize, ChannelType)> for ColorFormat {
    fn from(value: (ChannelCount, ChannelSize, ChannelType)) -> Self {
        ColorFormat {
            channel_count: value.0,
            channel_size: value.1,
            channel_type: value.2,
        }
    }
}

macro_rules! define_color_formats {
    ($(($prefix:ident, $count:ident)),+ $(,)?) => {
        paste::paste! {
            impl ColorFormat {
                $(
                    pub const [<$prefix _U8>]:  ColorFormat = ColorFormat { channel_count: ChannelCount::$count, channel_size: ChannelSize::_8bit,  channel_type: ChannelType::UInt };
                    pub const [<$prefix _U16>]: ColorFormat = ColorFormat { channel_count: ChannelCount::$count, channel_size: ChannelSize::_16bit, channel_type: ChannelType::UInt };
                    pub const [<$prefix _F32>]: ColorFormat = ColorFormat { channel_count: ChannelCount::$count, channel_size: ChannelSize::_32bit, channel_type: ChannelType::Float };
                )+
            }

            /// All supported color formats.
            pub const ALL_FORMATS: &[ColorFormat] = &[
                $(
                    ColorFormat::[<$prefix _U8>],
                    ColorFormat::[<$prefix _U16>],
                    ColorFormat::[<$prefix _F32>],
                )+
            ];
        }
    };
}

define_color_formats!((L, L), (LA, LA), (RGB, Rgb), (RGBA, Rgba),);

/// Formats with alpha channel (LA and RGBA).
pub const ALPHA_FORMATS: &[ColorFormat] = &[
    ColorFormat::LA_U8,
    ColorFormat::LA_U16,
    ColorFormat::LA_F32,
    ColorFormat::RGBA_U8,
    ColorFormat::RGBA_U16,
    ColorFormat::RGBA_F32,
];

impl std::fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = match self.channel_count {
            ChannelCount::L => "L",
            ChannelCount::LA => "LA",
            ChannelCount::Rgb => "RGB",
            ChannelCount::Rgba => "RGBA",
        };
        let kind = match self.channel_type {
            ChannelType::UInt => "u",
            ChannelType::Float => "f",
        };

        write!(f, "{} {}{}", count, kind, self.channel_size.byte_count() as u32 * 8)
    }
}
