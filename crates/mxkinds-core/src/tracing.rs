//! Logging setup shared by the mxkinds binaries.
//!
//! Logs always go to stderr so that command output on stdout stays
//! machine-readable.
//!
//! The filter stays reloadable, so a level that is only known after the
//! subscriber is installed (e.g. from a config file) can still be applied.
//!
//! ```ignore
//! use mxkinds_core::tracing::{init_tracing, TracingConfig};
//!
//! let handle = init_tracing(TracingConfig::default()).expect("failed to initialize tracing");
//! handle.apply(&TracingConfig::cli_debug())?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Directive used by `--debug`; takes precedence over `RUST_LOG`.
pub const DEBUG_DIRECTIVE: &str = "mxkinds=trace";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber is already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive could not be parsed
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),

    /// The installed subscriber is gone
    #[error("failed to reload tracing filter: {0}")]
    Reload(#[from] reload::Error),
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Single-line human-readable output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for mxkinds targets when `RUST_LOG` is not set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Include file and line of the callsite
    pub include_location: bool,
    /// Include the module path of the callsite
    pub include_target: bool,
    /// Explicit filter directive, takes precedence over `RUST_LOG`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    /// Verbose preset used by `--debug`.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::TRACE,
            include_location: true,
            include_target: true,
            env_filter: Some(DEBUG_DIRECTIVE.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the filter: explicit directive, then `RUST_LOG`, then the
    /// default level scoped to mxkinds targets.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit directive is invalid.
    pub fn build_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(ref filter) = self.env_filter {
            return Ok(EnvFilter::try_new(filter)?);
        }
        Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("mxkinds={}", self.default_level))))
    }
}

/// Handle to the filter of the installed subscriber.
#[derive(Debug, Clone)]
pub struct TracingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl TracingHandle {
    /// Replaces the active filter with the one built from `config`.
    ///
    /// Output format and callsite details are fixed at install time.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive is invalid or the subscriber has
    /// been dropped.
    pub fn apply(&self, config: &TracingConfig) -> Result<(), TracingError> {
        let filter = config.build_filter()?;
        self.filter.reload(filter)?;
        Ok(())
    }
}

/// Installs the global subscriber.
///
/// Call once at startup, before anything worth logging happens.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set or if the
/// filter directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<TracingHandle, TracingError> {
    let (filter_layer, filter) = reload::Layer::new(config.build_filter()?);

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    match config.output_format {
        TracingOutputFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(filter_layer)
                .with(layer.compact().without_time());
            tracing::subscriber::set_global_default(subscriber)?;
        }
        TracingOutputFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(filter_layer)
                .with(layer.json());
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(TracingHandle { filter })
}

#[cfg(test)]
pub(crate) mod capture {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` under a TRACE-level subscriber and returns what it logged.
    pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (value, output)
    }
}
