use std::fmt;

use anyhow::{bail, Result};
use palette::FromColor;

/// An RGBA color parsed from a `#RRGGBB` or `#RRGGBBAA` literal.
///
/// Theme documents only ever carry colors in these two hex forms; shorthand
/// notations like `#abc` are rejected so that `validate` can report them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    /// Red channel, in the range `0.0..=1.0`.
    pub r: f32,
    /// Green channel, in the range `0.0..=1.0`.
    pub g: f32,
    /// Blue channel, in the range `0.0..=1.0`.
    pub b: f32,
    /// Alpha channel, in the range `0.0..=1.0`. Defaults to fully opaque.
    pub a: f32,
}

impl Rgba {
    /// Returns the perceived lightness of the color, in the range `0.0..=1.0`.
    ///
    /// Used to cross-check a document's declared appearance against its
    /// editor background.
    pub fn lightness(self) -> f32 {
        let srgba = palette::rgb::Srgba::from_components((self.r, self.g, self.b, self.a));
        palette::Hsla::from_color(srgba).lightness
    }

    /// Formats the color back into its hex literal form.
    ///
    /// The alpha component is included only when it is not fully opaque, so a
    /// color parsed from `#RRGGBB` round-trips without growing an `ff` tail.
    pub fn to_hex(self) -> String {
        let r = (self.r * 255.).round() as u8;
        let g = (self.g * 255.).round() as u8;
        let b = (self.b * 255.).round() as u8;
        let a = (self.a * 255.).round() as u8;

        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<&str> for Rgba {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> Result<Self> {
        try_parse_color(color)
    }
}

pub(crate) fn try_parse_color(color: &str) -> Result<Rgba> {
    let Some(hex) = color.strip_prefix('#') else {
        bail!("color {color:?} is missing a leading `#`");
    };

    if hex.len() != 6 && hex.len() != 8 {
        bail!("color {color:?} is not a `#RRGGBB` or `#RRGGBBAA` literal");
    }

    let mut channels = [0u8; 4];
    channels[3] = u8::MAX;
    for (index, pair) in hex.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(pair)?;
        channels[index] = u8::from_str_radix(pair, 16)
            .map_err(|_| anyhow::anyhow!("color {color:?} contains a non-hex digit"))?;
    }

    let [r, g, b, a] = channels;
    Ok(Rgba {
        r: r as f32 / 255.,
        g: g as f32 / 255.,
        b: b as f32 / 255.,
        a: a as f32 / 255.,
    })
}
