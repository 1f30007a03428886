use std::str::FromStr;

use palette::WithAlpha;

use super::error::Error;

macro_rules! c {
    ($name:ident = $value:tt) => {
        pub const $name: palette::Srgb<u8> = palette::Srgb::new(
            ($value as u32 >> 16 & 0xFF) as u8,
            ($value as u32 >> 8 & 0xFF) as u8,
            ($value as u32 & 0xFF) as u8,
        );
    };
}

c!(SPIRAL_PINK = 0xFF22CC);

/// Parses `#rgb` or `#rrggbb` into an opaque color.
pub fn parse_color(value: &str) -> Result<palette::Srgba<f32>, Error> {
    palette::Srgb::<u8>::from_str(value)
        .map(|color| color.into_format::<f32>().with_alpha(1.0))
        .map_err(|error| Error::InvalidConfig(format!("color {value:?}: {error}")))
}
