//! Event inspection.

use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use mxkinds_core::RawEvent;

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{EventSummary, write_rows};

/// Parses a single event object or an array of events.
pub fn parse_events(input: &str) -> CliResult<Vec<RawEvent>> {
    let value: Value = serde_json::from_str(input)?;
    let events = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<RawEvent>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    debug!(count = events.len(), "parsed events");
    Ok(events)
}

/// Reads the events from `file`, or from `stdin` when no file (or `-`)
/// is given.
pub fn read_input<R: Read>(file: Option<&Path>, mut stdin: R) -> CliResult<String> {
    let mut buf = String::new();
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::File::open(path)
                .and_then(|mut f| f.read_to_string(&mut buf))
                .map_err(|source| CliError::Input {
                    input: path.display().to_string(),
                    source,
                })?;
        }
        _ => {
            stdin
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Input {
                    input: "stdin".to_string(),
                    source,
                })?;
        }
    }
    Ok(buf)
}

/// Print the typed views of each event.
pub fn run<W: Write>(out: &mut W, input: &str, format: OutputFormat) -> CliResult<()> {
    let summaries: Vec<EventSummary> = parse_events(input)?
        .iter()
        .map(EventSummary::from)
        .collect();
    write_rows(out, &summaries, format)
}
