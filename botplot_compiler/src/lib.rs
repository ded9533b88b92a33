// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative plot compiler.
//!
//! Takes a [`PlotSpec`](botplot_core::PlotSpec) (data columns, layers, labels, legend, size
//! and theme) and deterministically produces a [`CompiledPlot`](botplot_core::CompiledPlot):
//! an ordered list of positioned primitives in pixel space.
//!
//! The pipeline is:
//! - **Validate**: theme, column lengths, geom lookup, referenced columns.
//! - **Resolve scales**: one shared domain per axis across all layers ([`scale`], [`ticks`]).
//! - **Compute layout**: a measure/arrange box model driven by a
//!   [`TextMeasurer`](botplot_text::TextMeasurer) ([`layout`]).
//! - **Accessibility gate**: WCAG contrast checks against the theme ([`accessibility`]).
//! - **Compile layers**: each layer's [`Geom`] turns rows into primitives ([`geom`]).
//! - **Assemble**: paint order plus text label collision resolution ([`labels`]).
//!
//! Any failure is a [`CompileError`]; a partial plot is never returned.
//!
//! Rendering is out of scope; see the `botplot_svg_demo` crate for a minimal SVG writer.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod accessibility;
pub mod axis;
#[cfg(test)]
mod compile_tests;
mod compiler;
mod error;
#[cfg(not(feature = "std"))]
mod float;
pub mod format;
pub mod geom;
pub mod labels;
pub mod layout;
pub mod legend;
pub mod scale;
pub mod text;
pub mod theme;
pub mod ticks;
pub mod title;

pub use accessibility::{check_theme, contrast_ratio, relative_luminance};
pub use compiler::{Compiler, compile};
pub use error::{CompileError, ErrorKind};
pub use format::LabelFormat;
pub use geom::{Geom, GeomRegistry, LayerContext, LayerInput};
pub use scale::{ColorScale, PositionScale, ResolvedScales, ScaleHint, ScaleKind};
pub use theme::{Theme, ThemeStore};
pub use ticks::{Ticks, nice_ticks};
