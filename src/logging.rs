use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::Config;

/// Where log lines may go without corrupting the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The full-screen UI owns stdout, so only the configured file is used.
    Interactive,
    /// One-shot commands log to stderr unless a file is configured.
    Stderr,
}

pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// Installs the global tracing subscriber. Call once, early in `main`.
pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    let writer = match (&config.log_file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        (None, LogTarget::Interactive) => BoxMakeWriter::new(io::sink),
        (None, LogTarget::Stderr) => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.log_level))
        .with_target(true)
        .with_ansi(target == LogTarget::Stderr && config.log_file.is_none())
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}
