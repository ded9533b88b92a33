// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for plot layout.
//!
//! The botplot compiler needs text extents to size margins, place titles and keep
//! labels from colliding. Glyph tables and shaping live outside the compiler, so the
//! compiler only depends on the tiny [`TextMeasurer`] interface defined here.
//!
//! This crate is `no_std` (it uses `alloc` for owned font family names) and renderer
//! agnostic: a shaping engine, a browser canvas or the built-in
//! [`HeuristicTextMeasurer`] can all sit behind the same trait.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A minimal text measurement interface used by the layout engine.
///
/// Implementations must be deterministic: the same text and style always measure
/// the same, otherwise compiled plots stop being reproducible.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family or a full CSS fallback list (e.g. `"Inter, sans-serif"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }

    /// Parses a CSS family declaration.
    ///
    /// A bare generic keyword maps to its generic variant; anything else is kept
    /// verbatim as [`FontFamily::Named`].
    #[must_use]
    pub fn from_css(css: &str) -> Self {
        match css.trim() {
            "serif" => Self::Serif,
            "sans-serif" | "" => Self::SansSerif,
            "monospace" => Self::Monospace,
            other => Self::Named(Arc::from(other)),
        }
    }

    /// Returns the generic family the declaration falls back to.
    ///
    /// For a named list this is the last generic keyword in it, or sans-serif.
    #[must_use]
    pub fn generic(&self) -> Self {
        match self {
            Self::Named(list) => list
                .rsplit(',')
                .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
                .find_map(|f| match f {
                    "serif" => Some(Self::Serif),
                    "monospace" => Some(Self::Monospace),
                    "sans-serif" => Some(Self::SansSerif),
                    _ => None,
                })
                .unwrap_or(Self::SansSerif),
            generic => generic.clone(),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);

    /// Returns `true` for weights of 600 and above.
    #[must_use]
    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A heuristic text measurer for demos, tests and headless compiles.
///
/// Average glyph width is ~0.6em for sans-serif (0.55em serif, 0.6em monospace),
/// widened by 10% for bold text. Baseline sits at 0.8em and the line height is
/// 1.2em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl HeuristicTextMeasurer {
    fn glyph_width(style: &TextStyle) -> f64 {
        let base = match style.font_family.generic() {
            FontFamily::Serif => 0.55,
            _ => 0.6,
        };
        if style.font_weight.is_bold() {
            base * 1.1
        } else {
            base
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let advance_width =
            Self::glyph_width(style) * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.2 * style.font_size,
        }
    }
}
