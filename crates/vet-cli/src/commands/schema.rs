use schemars::schema_for;
use vet_core::OcrReport;

use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `vetrec schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Report => schema_for!(OcrReport),
    };

    // Tables make no sense for a schema document.
    let format = if flags.format == OutputFormat::Raw {
        OutputFormat::Raw
    } else {
        OutputFormat::Json
    };
    output(&schema, format)
}
