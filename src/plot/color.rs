//! Palette colour parsing.
//!
//! Palette entries are `#RRGGBB` or `#RRGGBBAA`. Translucent entries are
//! flattened onto the background, since the display has no alpha channel.

use crate::error::{DistError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 0xFF, g: 0xFF, b: 0xFF };
}

/// Parse a palette entry, blending `#RRGGBBAA` onto `background`.
pub fn parse_color(text: &str, background: Rgb) -> Result<Rgb> {
    let hex = text.trim().trim_start_matches('#');
    let invalid = || DistError::configuration(format!("invalid colour '{text}': expected #RRGGBB or #RRGGBBAA"));

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        }),
        8 => {
            let fg = Rgb {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            };
            Ok(blend(background, fg, channel(6)?))
        }
        _ => Err(invalid()),
    }
}

/// Alpha-composite `fg` over `bg`; `alpha` is out of 256.
pub fn blend(bg: Rgb, fg: Rgb, alpha: u8) -> Rgb {
    let a = alpha as f64 / 256.0;
    let mix = |f: u8, b: u8| (f as f64 * a + b as f64 * (1.0 - a)) as u8;
    Rgb {
        r: mix(fg.r, bg.r),
        g: mix(fg.g, bg.g),
        b: mix(fg.b, bg.b),
    }
}
