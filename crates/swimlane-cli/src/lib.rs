//! CLI logic for the Swimlane pipeline diagram tool.
//!
//! This module contains the core CLI logic: load configuration, lay out the
//! pipeline definition and write the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use swimlane::{
    PipelineBuilder, SwimlaneError, geometry::Size, layout::PipelineLayout, semantic::Pipeline,
};

/// Run the Swimlane CLI application
///
/// This function processes the input file through the Swimlane pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SwimlaneError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Cyclic graphs and empty viewports
/// - Rendering errors, including an unknown `--status`
pub fn run(args: &Args) -> Result<(), SwimlaneError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing pipeline"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let configured = app_config.layout().viewport();
    let viewport = Size::new(
        args.width.unwrap_or(configured.width()),
        args.height.unwrap_or(configured.height()),
    );
    debug!(width = viewport.width(), height = viewport.height(); "Viewport selected");

    let source = fs::read_to_string(&args.input)?;

    let builder = PipelineBuilder::new(app_config);
    let pipeline = builder.parse(&source)?;
    let layout = builder.layout_with_viewport(&pipeline, viewport)?;

    if args.describe {
        describe(&pipeline, &layout, &mut io::stdout().lock())?;
    }

    let svg = builder.render_svg(&pipeline, &layout, args.status.as_deref())?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Write the report block of every node in declaration order.
fn describe(
    pipeline: &Pipeline,
    layout: &PipelineLayout,
    out: &mut impl Write,
) -> Result<(), SwimlaneError> {
    for placement in layout.nodes() {
        if let Some(report) = layout.report(pipeline, placement.id()) {
            writeln!(out, "{report}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_every_node() {
        let source = r#"
[[zone]]
name = "Design"

[[node]]
id = 1
title = "CAD"
kind = "software"
zone = 1

[[node]]
id = 2
title = "STEP"
kind = "file_format"
zone = 1

[[edge]]
from = 1
to = 2
"#;
        let builder = PipelineBuilder::default();
        let pipeline = builder.parse(source).unwrap();
        let layout = builder.layout(&pipeline).unwrap();

        let mut out = Vec::new();
        describe(&pipeline, &layout, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("----- Node 1 -----"));
        assert!(text.contains("----- Node 2 -----"));
        assert!(text.find("Node 1").unwrap() < text.find("Node 2").unwrap());
    }
}
