// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color parsing and the hex encoding used on the wire.

use alloc::format;
use alloc::string::String;

use peniko::Color;
use peniko::color::{ParseError, Srgb, parse_color};

/// Parses a CSS color: hex (`#RGB`, `#RRGGBB`, `#RRGGBBAA`), a named color, or a CSS
/// color function such as `rgb(78 121 167)`.
///
/// The result is quantized to 8 bits per channel so that parsed colors compare equal to
/// the same color built with [`Color::from_rgba8`].
pub fn parse(s: &str) -> Result<Color, ParseError> {
    let rgba = parse_color(s)?.to_alpha_color::<Srgb>().to_rgba8();
    Ok(Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a))
}

/// Formats a color as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
pub fn to_hex(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
    }
}

/// `serialize_with` adapter writing a [`Color`] as a hex string.
pub fn serialize<S: serde::Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(*color))
}

/// `serialize_with` adapter for optional colors.
pub fn serialize_option<S: serde::Serializer>(
    color: &Option<Color>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match color {
        Some(c) => serializer.serialize_some(&to_hex(*c)),
        None => serializer.serialize_none(),
    }
}
