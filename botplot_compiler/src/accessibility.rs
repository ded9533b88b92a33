// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WCAG 2.1 relative luminance, contrast ratios and the theme contrast gate.

use alloc::format;
use alloc::string::String;

use botplot_core::color::to_hex;
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::CompileError;
use crate::scale::ColorScale;
use crate::theme::Theme;

/// Minimum contrast for body text.
pub const MIN_BODY_TEXT: f64 = 4.5;
/// Minimum contrast for large or bold text.
pub const MIN_LARGE_TEXT: f64 = 3.0;
/// Minimum contrast for marks and axis lines.
pub const MIN_GRAPHICS: f64 = 3.0;
/// Text at or above this size counts as large.
pub const LARGE_TEXT_SIZE: f64 = 18.0;

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn delinearize(v: f64) -> u8 {
    let v = v.clamp(0.0, 1.0);
    let c = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=255 before the cast")]
    #[allow(clippy::cast_sign_loss, reason = "clamped to 0..=255 before the cast")]
    let byte = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    byte
}

/// Composites a translucent `fg` over an opaque `bg`.
fn flatten(fg: Color, bg: Color) -> [u8; 3] {
    let f = fg.to_rgba8();
    let b = bg.to_rgba8();
    if f.a == 255 {
        return [f.r, f.g, f.b];
    }
    let a = f64::from(f.a) / 255.0;
    let mix = |x: u8, y: u8| {
        let v = f64::from(x) * a + f64::from(y) * (1.0 - a);
        #[allow(clippy::cast_possible_truncation, reason = "a convex mix of two bytes")]
        #[allow(clippy::cast_sign_loss, reason = "a convex mix of two bytes")]
        let byte = v.round().clamp(0.0, 255.0) as u8;
        byte
    };
    [mix(f.r, b.r), mix(f.g, b.g), mix(f.b, b.b)]
}

fn luminance_rgb([r, g, b]: [u8; 3]) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// WCAG relative luminance of an opaque color.
pub fn relative_luminance(color: Color) -> f64 {
    let c = color.to_rgba8();
    luminance_rgb([c.r, c.g, c.b])
}

/// WCAG contrast ratio of `fg` drawn on `bg`, in `1.0..=21.0`.
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let l1 = luminance_rgb(flatten(fg, bg));
    let l2 = relative_luminance(bg);
    let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (hi + 0.05) / (lo + 0.05)
}

/// Interpolates between two colors in linear light.
pub fn mix_linear(a: Color, b: Color, t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let a = a.to_rgba8();
    let b = b.to_rgba8();
    let ch = |x: u8, y: u8| delinearize(linearize(x) + (linearize(y) - linearize(x)) * t);
    Color::from_rgb8(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// Picks whichever candidate contrasts more with `fill`, with its ratio.
///
/// Ties go to the first candidate.
pub fn best_text_color(fill: Color, candidates: [Color; 2]) -> (Color, f64) {
    let r0 = contrast_ratio(candidates[0], fill);
    let r1 = contrast_ratio(candidates[1], fill);
    if r1 > r0 {
        (candidates[1], r1)
    } else {
        (candidates[0], r0)
    }
}

/// Minimum contrast for text of the given size and boldness.
pub fn text_minimum(font_size: f64, bold: bool) -> f64 {
    if bold || font_size >= LARGE_TEXT_SIZE {
        MIN_LARGE_TEXT
    } else {
        MIN_BODY_TEXT
    }
}

fn require(element: &str, fg: Color, bg: Color, minimum: f64) -> Result<(), CompileError> {
    let ratio = contrast_ratio(fg, bg);
    if ratio + 1e-9 >= minimum {
        Ok(())
    } else {
        Err(CompileError::ContrastViolation {
            element: element.into(),
            foreground: to_hex(fg),
            background: to_hex(bg),
            ratio,
            minimum,
        })
    }
}

/// Checks every themed color pair against the background.
///
/// Text is checked first (body text before large text), then the axis line, each palette
/// entry, and finally the continuous color ramp when `colors` is one. The first failing
/// pair is reported.
pub fn check_theme(theme: &Theme, colors: &ColorScale) -> Result<(), CompileError> {
    let bg = theme.background;
    let title_bold = theme.title_weight.is_bold();
    let texts: [(&str, Color, f64, bool); 7] = [
        ("tick label text", theme.text, theme.tick_size, false),
        ("axis title text", theme.text, theme.label_size, false),
        ("legend text", theme.text, theme.legend_size, false),
        ("value label text", theme.text, theme.tick_size, false),
        ("footnote text", theme.text_muted, theme.footnote_size, false),
        ("subtitle text", theme.text_muted, theme.subtitle_size, false),
        ("title text", theme.text, theme.title_size, title_bold),
    ];
    for (element, fg, size, bold) in texts {
        require(element, fg, bg, text_minimum(size, bold))?;
    }

    require("axis line", theme.axis, bg, MIN_GRAPHICS)?;
    for (i, &c) in theme.palette.iter().enumerate() {
        require(&format!("palette[{i}]"), c, bg, MIN_GRAPHICS)?;
    }

    if let ColorScale::Continuous { from, to, .. } = colors {
        let (color, ratio) = ramp_minimum(*from, *to, bg);
        if ratio + 1e-9 < MIN_GRAPHICS {
            return Err(CompileError::ContrastViolation {
                element: String::from("continuous color ramp"),
                foreground: to_hex(color),
                background: to_hex(bg),
                ratio,
                minimum: MIN_GRAPHICS,
            });
        }
    }
    Ok(())
}

/// The lowest-contrast color on a linear-light ramp against `bg`, with its ratio.
///
/// Luminance is linear in the mix parameter, so the minimum sits at an endpoint unless the
/// background luminance lies strictly between the endpoints.
fn ramp_minimum(from: Color, to: Color, bg: Color) -> (Color, f64) {
    let l0 = relative_luminance(from);
    let l1 = relative_luminance(to);
    let lb = relative_luminance(bg);
    let (lo, hi) = if l0 <= l1 { (l0, l1) } else { (l1, l0) };
    if lo < lb && lb < hi {
        let t = (lb - l0) / (l1 - l0);
        let c = mix_linear(from, to, t);
        return (c, contrast_ratio(c, bg));
    }
    let r0 = contrast_ratio(from, bg);
    let r1 = contrast_ratio(to, bg);
    if r1 < r0 { (to, r1) } else { (from, r0) }
}
