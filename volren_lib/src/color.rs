use std::{fmt, str::FromStr};

use nalgebra::{vector, Vector4};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map, map_res},
    sequence::{preceded, tuple},
    IResult,
};

use crate::VolumeError;

/// Color as consumed by shaders, components in <0;1>
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// 8-bit color picked by the user
///
/// Parsed from `#rrggbb` or `#rgb`, printed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Opaque shader color
    pub fn to_rgba(self) -> RGBA {
        new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match all_consuming(hex_color)(s) {
            Ok((_, color)) => Ok(color),
            Err(_) => Err(VolumeError::ContractViolation(format!(
                "'{s}' is not a #rrggbb or #rgb color"
            ))),
        }
    }
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

// `f` expands to `ff`
fn hex_single(input: &str) -> IResult<&str, u8> {
    map(
        map_res(take_while_m_n(1, 1, is_hex_digit), |s| {
            u8::from_str_radix(s, 16)
        }),
        |v| v * 17,
    )(input)
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    let long = all_consuming(tuple((hex_pair, hex_pair, hex_pair)));
    let short = all_consuming(tuple((hex_single, hex_single, hex_single)));
    map(preceded(tag("#"), alt((long, short))), |(r, g, b)| {
        Color::new(r, g, b)
    })(input)
}
