//! Swimlane CLI library
//!
//! This module contains the core CLI logic for the swimlane process tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io, path::Path};

use log::{info, warn};

use swimlane::{ProcessBuilder, ProcessModel, RuleTagger, SwimlaneError};

use error_adapter::warnings_to_reportables;

/// File name of the compiled PlantUML diagram.
pub const DIAGRAM_FILE: &str = "process.puml";
/// File name of the interaction heatmap.
pub const HEATMAP_FILE: &str = "heatmap.svg";
/// File name of the flow diagram.
pub const FLOW_FILE: &str = "flow.svg";
/// File name of the highlighted entity view.
pub const ENTITIES_FILE: &str = "entities.svg";
/// File name of the full result as JSON.
pub const RESULT_FILE: &str = "result.json";

/// Run the swimlane CLI application
///
/// Reads the input, runs it through the pipeline and writes the diagram,
/// the analysis artifacts and a JSON copy of the whole result into the
/// output directory. Artifacts that are absent (no actors, no handoffs, no
/// entity spans) are not written.
///
/// # Errors
///
/// Returns `SwimlaneError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Token-file parse errors
/// - Encoding and rendering errors
pub fn run(args: &Args) -> Result<ProcessModel, SwimlaneError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir,
        rules = args.rules;
        "Processing process description"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = ProcessBuilder::new(app_config);
    let model = if args.rules {
        builder.analyze_text(&source, &RuleTagger::new())?
    } else {
        let file = builder.parse_token_file(&source)?;
        report_warnings(file.warnings(), &source);
        builder.analyze_tokens(file.tokens())?
    };

    write_outputs(Path::new(&args.output_dir), &model)?;

    info!(output_dir = args.output_dir; "Outputs written successfully");

    Ok(model)
}

fn write_outputs(dir: &Path, model: &ProcessModel) -> Result<(), SwimlaneError> {
    fs::create_dir_all(dir)?;

    fs::write(dir.join(DIAGRAM_FILE), model.diagram())?;
    if let Some(heatmap) = model.heatmap() {
        fs::write(dir.join(HEATMAP_FILE), heatmap.content())?;
    }
    if let Some(flow) = model.flow() {
        fs::write(dir.join(FLOW_FILE), flow.content())?;
    }
    if let Some(entities) = model.entity_view() {
        fs::write(dir.join(ENTITIES_FILE), entities.content())?;
    }

    let json = serde_json::to_string_pretty(model).map_err(io::Error::from)?;
    fs::write(dir.join(RESULT_FILE), json)?;

    Ok(())
}

/// Logs token-file warnings with their source context.
fn report_warnings(warnings: &[swimlane_parser::Diagnostic], source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warnings_to_reportables(warnings, source) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }
}
