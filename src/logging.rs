//! Tracing setup.
//!
//! Headless commands log to stderr. The TUI owns the terminal, so it logs to
//! `<cache dir>/robot-garage/robot-garage.log` instead. Warnings are on by
//! default; `RUST_LOG` adds or overrides directives.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{
    filter::LevelFilter,
    fmt::writer::BoxMakeWriter,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter from `directives`, with warnings enabled when they say nothing else
fn filter_with(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn subscriber(
    filter: EnvFilter,
    writer: BoxMakeWriter,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .with(filter)
}

/// Where the TUI writes its log
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("robot-garage").join("robot-garage.log"))
}

fn log_file_writer() -> Option<BoxMakeWriter> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
    Some(BoxMakeWriter::new(Mutex::new(file)))
}

pub fn init(tui: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = filter_with(&directives);

    let (writer, ansi) = if tui {
        // Nothing may reach the terminal while ratatui draws on it
        match log_file_writer() {
            Some(writer) => (writer, false),
            None => (BoxMakeWriter::new(io::sink), false),
        }
    } else {
        (BoxMakeWriter::new(io::stderr), true)
    };

    subscriber(filter, writer, ansi).init();
}
