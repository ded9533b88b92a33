// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and value labels.

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value using the precision implied by the tick step.
///
/// Integral values print without a decimal point; other values use the step's decimal
/// places with trailing zeros stripped.
pub fn format_tick(value: f64, step: f64) -> String {
    if let Some(i) = as_integer(value) {
        return i.to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    if !(step.is_finite() && step > 0.0) {
        return format_general(value);
    }
    #[allow(clippy::cast_possible_truncation, reason = "log10 of a finite step fits in i32")]
    let decimals = (-(step.log10() + 1e-9).floor() as i32).clamp(0, 15);
    #[allow(clippy::cast_sign_loss, reason = "clamped to 0..=15")]
    let decimals = decimals as usize;
    strip_zeros(format!("{value:.decimals$}"))
}

/// Formats a value the way a general `{:g}` conversion would: integers without a
/// decimal point, otherwise six significant digits with trailing zeros stripped.
pub fn format_general(value: f64) -> String {
    match as_integer(value) {
        Some(i) => i.to_string(),
        None => format_significant(value, 6),
    }
}

/// Rounds `value` to `digits` significant digits (at least one) and prints it in fixed
/// notation with trailing zeros stripped.
///
/// Unlike a C-style `%g` this never switches to exponent notation: `1234` at two digits
/// prints as `1200`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".into();
    }
    #[allow(clippy::cast_possible_truncation, reason = "clamped to 1..=15")]
    #[allow(clippy::cast_possible_wrap, reason = "clamped to 1..=15")]
    let digits = digits.clamp(1, 15) as i32;
    #[allow(clippy::cast_possible_truncation, reason = "log10 of a finite value fits in i32")]
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = digits - 1 - magnitude;
    if decimals >= 0 {
        #[allow(clippy::cast_sign_loss, reason = "non-negative and clamped to 15")]
        let decimals = decimals.min(15) as usize;
        return strip_zeros(format!("{value:.decimals$}"));
    }
    let unit = 10_f64.powi(-decimals);
    let rounded = (value / unit).round() * unit;
    match as_integer(rounded) {
        Some(i) => i.to_string(),
        None => format!("{rounded:.0}"),
    }
}

fn as_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < 1e15 && value.round() == value {
        #[allow(clippy::cast_possible_truncation, reason = "integral and below 1e15")]
        Some(value as i64)
    } else {
        None
    }
}

fn strip_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".into() } else { s }
}

/// Inserts `,` thousands separators into the integer part of a formatted number.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presentation {
    General,
    Fixed,
    Integer,
    Percent,
}

/// A value label template such as `"${:,.0f}"` or `"{:.1%}"`.
///
/// The template holds exactly one `{}` placeholder with an optional format spec made of
/// an optional `,` (thousands separators), an optional `.N` precision and an optional
/// presentation type: `f` (fixed), `d` (integer), `%` (percent) or `g` (general). `{{`
/// and `}}` produce literal braces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelFormat {
    prefix: String,
    suffix: String,
    thousands: bool,
    precision: Option<usize>,
    presentation: Presentation,
}

impl LabelFormat {
    /// Parses a template, returning a description of the problem on failure.
    pub fn parse(template: &str) -> Result<Self, String> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<String> = None;
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            let out = if spec.is_some() { &mut suffix } else { &mut prefix };
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    if spec.is_some() {
                        return Err(format!(
                            "label format {template:?} has more than one {{}} placeholder"
                        ));
                    }
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => inner.push(c),
                            None => {
                                return Err(format!("label format {template:?} has an unclosed {{"));
                            }
                        }
                    }
                    spec = Some(inner);
                }
                '}' => {
                    return Err(format!("label format {template:?} has an unmatched }}"));
                }
                c => out.push(c),
            }
        }
        let Some(inner) = spec else {
            return Err(format!(
                "label format {template:?} needs a {{}} placeholder for the value"
            ));
        };
        let field_spec = match inner.split_once(':') {
            Some(("" | "0", spec)) => spec,
            None if inner.is_empty() || inner == "0" => "",
            _ => {
                return Err(format!(
                    "label format {template:?}: placeholder {{{inner}}} must be {{}} or {{:spec}}"
                ));
            }
        };
        let (thousands, precision, presentation) = parse_spec(field_spec).ok_or_else(|| {
            format!(
                "label format {template:?}: unsupported spec {field_spec:?} \
                 (expected [,][.N][f|d|%|g])"
            )
        })?;
        Ok(Self {
            prefix,
            suffix,
            thousands,
            precision,
            presentation,
        })
    }

    /// Formats `value` through the template.
    pub fn apply(&self, value: f64) -> String {
        let body = match self.presentation {
            Presentation::General => match self.precision {
                Some(p) => format_significant(value, p),
                None => format_general(value),
            },
            Presentation::Fixed => {
                let p = self.precision.unwrap_or(6);
                format!("{value:.p$}")
            }
            Presentation::Integer => format!("{:.0}", value.round()),
            Presentation::Percent => {
                let p = self.precision.unwrap_or(6);
                format!("{:.p$}", value * 100.0)
            }
        };
        let body = if self.thousands {
            group_thousands(&body)
        } else {
            body
        };
        let percent = if self.presentation == Presentation::Percent {
            "%"
        } else {
            ""
        };
        format!("{}{body}{percent}{}", self.prefix, self.suffix)
    }
}

fn parse_spec(spec: &str) -> Option<(bool, Option<usize>, Presentation)> {
    let mut rest = spec;
    let thousands = if let Some(r) = rest.strip_prefix(',') {
        rest = r;
        true
    } else {
        false
    };
    let mut precision = None;
    if let Some(r) = rest.strip_prefix('.') {
        let digits = r.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        precision = Some(r[..digits].parse::<usize>().ok()?.min(15));
        rest = &r[digits..];
    }
    let presentation = match rest {
        "" | "g" => Presentation::General,
        "f" => Presentation::Fixed,
        "d" => Presentation::Integer,
        "%" => Presentation::Percent,
        _ => return None,
    };
    Some((thousands, precision, presentation))
}

/// Formats a value label: through `format` when given, otherwise [`format_general`].
pub fn format_value(value: f64, format: Option<&LabelFormat>) -> String {
    match format {
        Some(f) => f.apply(value),
        None => format_general(value),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn tick_labels_use_step_precision() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
    }

    #[test]
    fn general_format_matches_g() {
        assert_eq!(format_general(42.0), "42");
        assert_eq!(format_general(3.14159265), "3.14159");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(-12.25), "-12.25");
    }

    #[test]
    fn general_precision_counts_significant_digits() {
        let g3 = LabelFormat::parse("{:.3g}").unwrap();
        assert_eq!(g3.apply(3.14159), "3.14", "fraction");
        assert_eq!(g3.apply(1234.5), "1230", "rounded above the decimal point");
        assert_eq!(g3.apply(0.012345), "0.0123", "leading zeros are not significant");
        assert_eq!(g3.apply(-2.5), "-2.5", "trailing zeros stripped");
        assert_eq!(LabelFormat::parse("{:.0}").unwrap().apply(7.6), "8", ".0 means one digit");
        assert_eq!(format_significant(9.96, 2), "10", "carry into the next decade");
        assert_eq!(format_significant(0.0, 3), "0", "zero");
    }

    #[test]
    fn currency_template() {
        let f = LabelFormat::parse("${:,.0f}").unwrap();
        assert_eq!(f.apply(1234567.4), "$1,234,567");
        assert_eq!(f.apply(-9876.0), "$-9,876");
        assert_eq!(f.apply(12.0), "$12");
    }

    #[test]
    fn percent_and_suffix_templates() {
        assert_eq!(LabelFormat::parse("{:.1%}").unwrap().apply(0.1234), "12.3%");
        assert_eq!(LabelFormat::parse("{:.2f} kg").unwrap().apply(3.0), "3.00 kg");
        assert_eq!(LabelFormat::parse("{}").unwrap().apply(2.5), "2.5");
        assert_eq!(LabelFormat::parse("{{{}}}").unwrap().apply(1.0), "{1}");
        assert_eq!(LabelFormat::parse("{:,}").unwrap().apply(12345.0), "12,345");
    }

    #[test]
    fn bad_templates_are_rejected_with_reason() {
        let err = LabelFormat::parse("no placeholder").unwrap_err();
        assert!(err.contains("placeholder"), "{err}");
        assert!(LabelFormat::parse("{:x}").is_err(), "hex is unsupported");
        assert!(LabelFormat::parse("{} and {}").is_err(), "two placeholders");
        assert!(LabelFormat::parse("{name}").is_err(), "named fields are unsupported");
        assert!(LabelFormat::parse("{:.f}").is_err(), "precision needs digits");
        assert!(LabelFormat::parse("{").is_err(), "unclosed");
    }
}
