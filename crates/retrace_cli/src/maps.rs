//! `retrace compose` and `retrace lookup`.

use std::fs;

use retrace_common::Position;
use retrace_sourcemap::{compose as compose_maps, OriginalSource, OutputMap, Translator};
use tracing::debug;

use crate::{ComposeArgs, GlobalArgs, LookupArgs};

fn read_map(path: &str) -> Result<OutputMap, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    Ok(OutputMap::from_json(value)?)
}

/// Composes the maps named by `args` and returns the result as JSON text.
pub fn compose_files(args: &ComposeArgs) -> Result<String, Box<dyn std::error::Error>> {
    let stage1_text = fs::read_to_string(&args.intermediate)
        .map_err(|e| format!("cannot read {}: {e}", args.intermediate))?;
    let stage1 = Translator::parse(&stage1_text)?;
    let stage2 = read_map(&args.final_map)?;
    let source_text =
        fs::read_to_string(&args.source).map_err(|e| format!("cannot read {}: {e}", args.source))?;
    let file_name = args.source.as_str();

    debug!(stage1 = stage1.len(), file = file_name, "composing");
    let composed = compose_maps(
        &stage1,
        &stage2,
        OriginalSource {
            file_name,
            text: &source_text,
        },
    );
    Ok(serde_json::to_string(&composed.to_json()?)?)
}

/// Runs `retrace compose`.
pub fn compose(args: &ComposeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let json = compose_files(args)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            if !global.quiet {
                eprintln!("   Wrote {path}");
            }
        }
        None => println!("{json}"),
    }
    Ok(0)
}

/// Translates one position through the map at `path`.
pub fn lookup_in(path: &str, position: Position) -> Result<Option<Position>, Box<dyn std::error::Error>> {
    Ok(read_map(path)?.translator().original_position_for(position))
}

/// Runs `retrace lookup`.
///
/// Exits with 1 when the position has no mapping.
pub fn lookup(args: &LookupArgs) -> Result<i32, Box<dyn std::error::Error>> {
    match lookup_in(&args.map, args.position)? {
        Some(original) => {
            println!("{original}");
            Ok(0)
        }
        None => {
            eprintln!("no mapping for {}", args.position);
            Ok(1)
        }
    }
}
