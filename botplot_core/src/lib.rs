// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model for the botplot compiler.
//!
//! This crate holds the two ends of a compile:
//! - the **input**: a [`PlotSpec`] describing data columns, layers, labels, legend, size and
//!   theme, deserialized from JSON and treated as immutable once handed to the compiler;
//! - the **output**: a [`CompiledPlot`], an ordered list of fully positioned [`Primitive`]s
//!   in pixel space that a renderer can draw without knowing anything about the data.
//!
//! Everything here is plain data. Scale resolution, layout and the geom protocol live in
//! `botplot_compiler`.

#![no_std]

extern crate alloc;

pub mod color;
mod primitive;
mod spec;
mod value;

pub use primitive::{
    CompiledPlot, LinePrimitive, PathPrimitive, PointPrimitive, Primitive, RectPrimitive,
    TextAnchor, TextBaseline, TextPrimitive, TextRole, path_to_svg,
};
pub use spec::{
    DataSpec, Labels, Layer, Legend, LegendPosition, PlotSpec, Size, ThemeOverride, ThemeRef,
};
pub use value::{ColumnKind, ColumnTable, Value};
