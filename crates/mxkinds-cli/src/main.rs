//! mxkinds CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use mxkinds_cli::cli::{Cli, Command, ConfigAction};
use mxkinds_cli::commands;
use mxkinds_cli::config::CliConfig;
use mxkinds_cli::error::CliResult;
use mxkinds_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    let tracing = match init_tracing(tracing_config) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: {e}");
            None
        }
    };

    let config = match cli.config {
        Some(ref path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    };

    // `debug = true` in the config file can only raise the level once it is read.
    let config_debug = config.as_ref().is_ok_and(|config| config.debug);
    if let Some(ref handle) = tracing {
        if config_debug && !cli.debug {
            if let Err(e) = handle.apply(&TracingConfig::cli_debug()) {
                eprintln!("warning: {e}");
            }
        }
    }

    match config.and_then(|config| run(&cli, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &CliConfig) -> CliResult<()> {
    let format = cli.output_format(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Event { ref identifiers } => {
            commands::classify::event_types(&mut out, identifiers, format)?;
        }
        Command::Msgtype { ref identifiers } => {
            commands::classify::message_types(&mut out, identifiers, format)?;
        }
        Command::Membership { ref values } => {
            commands::classify::memberships(&mut out, values, format)?;
        }
        Command::Inspect { ref file } => {
            let input = commands::inspect::read_input(file.as_deref(), std::io::stdin().lock())?;
            commands::inspect::run(&mut out, &input, format)?;
        }
        Command::Known { domain } => commands::known::run(&mut out, domain, format)?,
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(&mut out, config)?,
            ConfigAction::Path => commands::config::path(&mut out)?,
        },
    }

    out.flush()?;
    Ok(())
}
