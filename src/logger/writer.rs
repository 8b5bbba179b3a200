//! Log writer module
//!
//! Process-wide writer with an info target (stdout or file) and an error
//! target (stderr or file), filtered by level.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// Parse a level name; unknown names mean `Info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" | "trace" => Self::Debug,
            _ => Self::Info,
        }
    }
}

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(File),
}

impl LogTarget {
    fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(path) => open_log_file(path).map(Self::File),
            None => Ok(fallback),
        }
    }

    fn write_line(&mut self, message: &str) {
        // A failing log sink must not fail the request
        let _ = match self {
            Self::Stdout => writeln!(io::stdout().lock(), "{message}"),
            Self::Stderr => writeln!(io::stderr().lock(), "{message}"),
            Self::File(file) => writeln!(file, "{message}"),
        };
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    info: Mutex<LogTarget>,
    error: Mutex<LogTarget>,
    level: Level,
    format: String,
}

impl LogWriter {
    fn new(
        level: Level,
        format: &str,
        info_file: Option<&str>,
        error_file: Option<&str>,
    ) -> io::Result<Self> {
        Ok(Self {
            info: Mutex::new(LogTarget::open(info_file, LogTarget::Stdout)?),
            error: Mutex::new(LogTarget::open(error_file, LogTarget::Stderr)?),
            level,
            format: format.to_string(),
        })
    }

    /// Whether messages at `level` are written
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Directive log format name or pattern
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Write to the info target
    pub fn write_info(&self, level: Level, message: &str) {
        if self.enabled(level) {
            self.info
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_line(message);
        }
    }

    /// Write to the error target
    pub fn write_error(&self, level: Level, message: &str) {
        if self.enabled(level) {
            self.error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .write_line(message);
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Returns an error if a log file cannot be opened or the writer was
/// already installed.
pub fn init(
    level: Level,
    format: &str,
    info_file: Option<&str>,
    error_file: Option<&str>,
) -> io::Result<()> {
    let writer = LogWriter::new(level, format, info_file, error_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// The global log writer, if installed
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_and_order() {
        assert_eq!(Level::parse("ERROR"), Level::Error);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse("debug"), Level::Debug);
        assert_eq!(Level::parse("whatever"), Level::Info);
        assert!(Level::Error < Level::Debug);
    }

    #[test]
    fn test_file_target_and_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/info.log");
        let path_str = path.to_str().unwrap();

        let writer = LogWriter::new(Level::Info, "common", Some(path_str), None).unwrap();
        writer.write_info(Level::Info, "kept");
        writer.write_info(Level::Debug, "dropped");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "kept\n");
        assert_eq!(writer.format(), "common");
    }
}
