//! Classification commands.

use std::io::Write;

use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::output::{Classification, write_rows};

/// Classify event type identifiers.
pub fn event_types<W: Write>(
    out: &mut W,
    identifiers: &[String],
    format: OutputFormat,
) -> CliResult<()> {
    let rows: Vec<_> = identifiers
        .iter()
        .map(|identifier| Classification::event_type(identifier))
        .collect();
    write_rows(out, &rows, format)
}

/// Classify message types.
pub fn message_types<W: Write>(
    out: &mut W,
    identifiers: &[String],
    format: OutputFormat,
) -> CliResult<()> {
    let rows: Vec<_> = identifiers
        .iter()
        .map(|identifier| Classification::message_type(identifier))
        .collect();
    write_rows(out, &rows, format)
}

/// Resolve membership codes or strings.
pub fn memberships<W: Write>(
    out: &mut W,
    values: &[String],
    format: OutputFormat,
) -> CliResult<()> {
    let rows: Vec<_> = values
        .iter()
        .map(|value| Classification::membership(value))
        .collect();
    write_rows(out, &rows, format)
}
