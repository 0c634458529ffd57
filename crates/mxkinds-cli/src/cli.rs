//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{CliConfig, OutputFormat};

/// mxkinds - classify Matrix event types, message types and memberships
#[derive(Debug, Parser)]
#[command(name = "mxkinds")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "MXKINDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the output format, with `--json` overriding the config file.
    pub fn output_format(&self, config: &CliConfig) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            config.output.format
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify event type identifiers (e.g. m.room.message)
    Event {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Classify message types (e.g. m.text)
    Msgtype {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Resolve memberships from native codes (e.g. 2) or strings (e.g. join)
    Membership {
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Show the typed views of JSON events read from a file or stdin
    Inspect {
        /// Event file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },

    /// List the known values of a domain
    Known {
        #[arg(value_enum)]
        domain: Domain,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Classification domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    Event,
    Msgtype,
    Membership,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
