use anyhow::Context;
use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};
use std::fs::{File, OpenOptions};
use std::path::Path;

// The terminal belongs to the calendar while the program runs, so records
// only ever go to a file.
fn config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install a logger that appends to the file at `path`.  Without a call to
/// this function, log records are discarded.
pub(crate) fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = open(path)?;
    WriteLogger::init(level, config(), file).context("failed to install logger")
}
