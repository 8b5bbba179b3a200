//! Logger module
//!
//! Provides logging utilities for the request helpers including:
//! - Redirect and download directive logging with multiple formats
//! - Error, warning and debug logging
//! - File-based logging support
//!
//! Until [`init`] is called, directive and debug lines are discarded and
//! warnings/errors go to stderr.

mod format;
pub mod writer;

pub use format::{DirectiveKind, DirectiveLogEntry};
pub use writer::Level;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        Level::parse(&config.logging.level),
        &config.logging.format,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info log
fn write_info(level: Level, message: &str) {
    if let Some(writer) = writer::get() {
        writer.write_info(level, message);
    }
}

/// Write to error log
fn write_error(level: Level, message: &str) {
    match writer::get() {
        Some(writer) => writer.write_error(level, message),
        None => eprintln!("{message}"),
    }
}

/// Log an issued redirect or download in the configured format
pub fn log_directive(entry: &DirectiveLogEntry) {
    if let Some(writer) = writer::get() {
        if writer.enabled(Level::Info) {
            writer.write_info(Level::Info, &entry.format(writer.format()));
        }
    }
}

pub fn log_error(message: &str) {
    write_error(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(Level::Warn, &format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    write_info(Level::Debug, &format!("[DEBUG] {message}"));
}
