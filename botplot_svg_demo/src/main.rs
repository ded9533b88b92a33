// Copyright 2025 the Botplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiles a botplot spec and writes it as SVG.
//!
//! Without a spec file a built-in sample is compiled to `botplot_demo.svg`.

mod svg;

use std::error::Error;
use std::path::{Path, PathBuf};

use botplot_compiler::{Compiler, GeomRegistry};
use clap::Parser;
use botplot_core::{ColumnTable, Labels, Layer, PlotSpec, Value};

const DEFAULT_OUTPUT: &str = "botplot_demo.svg";

#[derive(Debug, Parser)]
#[command(name = "botplot_svg_demo")]
#[command(about = "Compile a botplot JSON spec and write it as SVG")]
struct Args {
    /// Print the compiled primitives as JSON instead of writing SVG
    #[arg(long)]
    json: bool,

    /// Spec file; the built-in sample when omitted
    input: Option<PathBuf>,

    /// Output SVG path; defaults to the input path with an `.svg` extension
    output: Option<PathBuf>,
}

/// Quarterly revenue with value labels plus a running-total breakdown.
fn sample_spec() -> PlotSpec {
    let quarters = ["Q1", "Q2", "Q3", "Q4"];
    PlotSpec::new(
        ColumnTable::new()
            .with_column("quarter", quarters)
            .with_column("revenue", [120_500.0, 98_250.0, 143_900.0, 171_300.0])
            .with_column(
                "region",
                quarters.map(|q| Value::from(if q < "Q3" { "first half" } else { "second half" })),
            ),
    )
    .with_layer(
        Layer::new("bar", "quarter", "revenue")
            .with_color("region")
            .with_value_labels(Some("${:,.0f}")),
    )
    .with_labels(Labels {
        title: Some("Revenue by quarter".into()),
        subtitle: Some("Fiscal year, USD".into()),
        x: Some("Quarter".into()),
        y: Some("Revenue".into()),
        footnote: Some("Source: internal ledger".into()),
    })
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("svg")
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let registry = GeomRegistry::with_builtins();
    let compiler = Compiler::new(&registry);
    let plot = match &args.input {
        Some(path) => {
            log::info!("compiling {}", path.display());
            compiler.compile_json(&std::fs::read_to_string(path)?)?
        }
        None => {
            log::info!("compiling the built-in sample");
            compiler.compile(&sample_spec())?
        }
    };

    if args.json {
        println!("{}", plot.to_json_pretty()?);
        return Ok(());
    }

    let output = match (&args.output, &args.input) {
        (Some(out), _) => out.clone(),
        (None, Some(input)) => default_output(input),
        (None, None) => PathBuf::from(DEFAULT_OUTPUT),
    };
    std::fs::write(&output, svg::render(&plot))?;
    log::info!("{} primitives", plot.primitives.len());
    println!("wrote {}", output.display());
    Ok(())
}
