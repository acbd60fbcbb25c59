use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

/// Console and log-file verbosity for a `barrier` invocation.
///
/// From `-vv` upward every closed `barrier_pass` span is logged with its `step` and
/// `particles` fields and the time the pass took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub pass_timing: bool,
}

impl LogSettings {
    pub fn from_flags(verbosity: u8, quiet: bool) -> Self {
        if quiet {
            return Self {
                level: LevelFilter::ERROR,
                pass_timing: false,
            };
        }
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            pass_timing: verbosity >= 2,
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.pass_timing {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let settings = LogSettings::from_flags(verbosity, quiet);

    let file = log_file.map(File::create).transpose().map_err(CliError::Io)?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(settings.span_events())
        .compact();

    tracing_subscriber::registry()
        .with(settings.level)
        .with(stderr_layer)
        .with(file.map(|file| file_layer(file, settings)))
        .init();

    Ok(())
}

fn file_layer<S>(file: File, settings: LogSettings) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_span_events(settings.span_events())
}
