//! Console output and the dated log file.
//!
//! Every `print_*!` line goes to the terminal and, through `tracing`, to the
//! log file installed by [`install_file_logger`], so both carry the same
//! messages.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use colored::{Colorize, CustomColor};
use tracing_core::{Level, LevelFilter};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, registry};

use crate::scenario::StageStatus;

pub const TTDATA_TEAL: CustomColor = CustomColor {
    r: 0,
    g: 150,
    b: 136,
};

const LOG_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// `log_<YYYYMMDD>` inside `log_dir`.
pub fn log_file_path(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("log_{}", date.format("%Y%m%d")))
}

/// Open today's log file for appending, creating `log_dir` if needed.
pub fn open_log_file(log_dir: &Path, date: NaiveDate) -> anyhow::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let path = log_file_path(log_dir, date);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok((path, file))
}

/// Install the global file logger. Returns the path of the log file.
pub fn install_file_logger(log_dir: &Path) -> anyhow::Result<PathBuf> {
    let (path, file) = open_log_file(log_dir, Local::now().date_naive())?;

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::INFO)
        .with_filter(filter_fn(|m| {
            // Only our own events; HTTP stack internals stay out of the file.
            m.module_path()
                .is_some_and(|path| path.starts_with("ttdata"))
                || *m.level() <= Level::WARN
        }));

    registry()
        .with(layer)
        .try_init()
        .map_err(|_| anyhow::anyhow!("Failed to install the file logger."))?;

    Ok(path)
}

pub fn print_err(err_message: &str) {
    tracing::error!("{err_message}");
    eprintln!(
        "[{}] {}: {}",
        "ttdata".custom_color(TTDATA_TEAL),
        "error".red().bold(),
        err_message
    );
}

#[macro_export]
macro_rules! print_err {
    ($($arg:tt)*) => {
        $crate::logging::print_err(&format!($($arg)*))
    };
}

pub fn print_warn(warn_message: &str) {
    tracing::warn!("{warn_message}");
    println!(
        "[{}] {}: {}",
        "ttdata".custom_color(TTDATA_TEAL),
        "warning".yellow().bold(),
        warn_message
    );
}

#[macro_export]
macro_rules! print_warn {
    ($($arg:tt)*) => {
        $crate::logging::print_warn(&format!($($arg)*))
    };
}

pub fn print_info(info_message: &str) {
    tracing::info!("{info_message}");
    println!(
        "[{}] {}: {}",
        "ttdata".custom_color(TTDATA_TEAL),
        "info".cyan().bold(),
        info_message
    );
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        $crate::logging::print_info(&format!($($arg)*))
    };
}

pub fn print_success(success_message: &str) {
    tracing::info!("{success_message}");
    println!(
        "[{}] {}: {}",
        "ttdata".custom_color(TTDATA_TEAL),
        "success".green().bold(),
        success_message
    );
}

#[macro_export]
macro_rules! print_success {
    ($($arg:tt)*) => {
        $crate::logging::print_success(&format!($($arg)*))
    };
}

/// `<stage>: pass` or `<stage>: failed`.
pub fn print_stage(stage: &str, status: StageStatus) {
    tracing::info!("{stage}: {status}");
    let status_label = match status {
        StageStatus::Pass => status.to_string().green().bold(),
        StageStatus::Failed => status.to_string().red().bold(),
    };
    println!(
        "[{}] {}: {}",
        "ttdata".custom_color(TTDATA_TEAL),
        stage,
        status_label
    );
}
