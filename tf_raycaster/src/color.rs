//! Colors and parsing of color strings
//!
//! All four channels are kept in range `<0;1>`.
//! Accepted string forms are `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` with
//! byte channels and `rgba(r, g, b, a)` with alpha in `<0;1>`.

use nalgebra::{vector, Vector4};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, hex_digit1, multispace0},
    combinator::{all_consuming, map_res, verify},
    number::complete::float,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::TfError;

pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

/// Linear interpolation of all four channels, `t` in `<0;1>`
pub fn lerp(from: &RGBA, to: &RGBA, t: f32) -> RGBA {
    from + (to - from) * t
}

/// Quantize color to 8 bits per channel
pub fn to_rgba8(color: &RGBA) -> [u8; 4] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color.x), q(color.y), q(color.z), q(color.w)]
}

/// Format color as hex string.
/// Alpha is written only if the color is not fully opaque.
pub fn to_hex(color: &RGBA) -> String {
    let [r, g, b, a] = to_rgba8(color);
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Parse color string, surrounding whitespace is ignored
pub fn parse(input: &str) -> Result<RGBA, TfError> {
    match all_consuming(color_value)(input.trim()) {
        Ok((_, color)) => Ok(color),
        Err(_) => Err(TfError::InvalidColor(input.to_owned())),
    }
}

fn color_value(s: &str) -> IResult<&str, RGBA> {
    alt((hex_color, rgba_function, rgb_function))(s)
}

fn hex_color(s: &str) -> IResult<&str, RGBA> {
    map_res(preceded(char('#'), hex_digit1), hex_to_rgba)(s)
}

fn hex_to_rgba(digits: &str) -> Result<RGBA, TfError> {
    let invalid = || TfError::InvalidColor(format!("#{digits}"));
    let byte = |from: usize, len: usize| {
        u8::from_str_radix(&digits[from..from + len], 16)
            .map(|v| if len == 1 { v * 17 } else { v })
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };

    match digits.len() {
        3 => Ok(new(byte(0, 1)?, byte(1, 1)?, byte(2, 1)?, 1.0)),
        6 => Ok(new(byte(0, 2)?, byte(2, 2)?, byte(4, 2)?, 1.0)),
        8 => Ok(new(byte(0, 2)?, byte(2, 2)?, byte(4, 2)?, byte(6, 2)?)),
        _ => Err(invalid()),
    }
}

fn comma(s: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(s)
}

fn byte_channel(s: &str) -> IResult<&str, f32> {
    map_res(digit1, |d: &str| d.parse::<u8>().map(|v| v as f32 / 255.0))(s)
}

fn unit_channel(s: &str) -> IResult<&str, f32> {
    verify(float, |a: &f32| (0.0..=1.0).contains(a))(s)
}

fn rgb_function(s: &str) -> IResult<&str, RGBA> {
    let (s, _) = tag_no_case("rgb")(s)?;
    let (s, (r, g, b)) = delimited(
        pair(char('('), multispace0),
        tuple((
            terminated(byte_channel, comma),
            terminated(byte_channel, comma),
            byte_channel,
        )),
        pair(multispace0, char(')')),
    )(s)?;
    Ok((s, new(r, g, b, 1.0)))
}

fn rgba_function(s: &str) -> IResult<&str, RGBA> {
    let (s, _) = tag_no_case("rgba")(s)?;
    let (s, (r, g, b, a)) = delimited(
        pair(char('('), multispace0),
        tuple((
            terminated(byte_channel, comma),
            terminated(byte_channel, comma),
            terminated(byte_channel, comma),
            unit_channel,
        )),
        pair(multispace0, char(')')),
    )(s)?;
    Ok((s, new(r, g, b, a)))
}
