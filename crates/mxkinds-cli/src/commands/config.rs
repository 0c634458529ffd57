//! Configuration commands.

use std::io::Write;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Dump the current configuration as TOML.
pub fn dump<W: Write>(out: &mut W, config: &CliConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)?;
    writeln!(out, "# config.toml ({})", CliConfig::default_path().display())?;
    write!(out, "{toml_str}")?;
    Ok(())
}

/// Show the configuration file path.
pub fn path<W: Write>(out: &mut W) -> CliResult<()> {
    writeln!(out, "config: {}", CliConfig::default_path().display())?;
    Ok(())
}
