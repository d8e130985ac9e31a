//! Logging init. Stderr only shows warnings unless `RUST_LOG` asks for more;
//! the optional state-dir log file records every transfer at `info`.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const STDERR_FILTER: &str = "warn";
const FILE_FILTER: &str = "info";
const LOG_FILE: &str = "kfetch.log";

/// Per-record writer for the log file. Falls back to stderr for a record
/// whose file handle could not be cloned.
enum LogWriter {
    File(File),
    Stderr(io::Stderr),
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::File(f) => f.write(buf),
            LogWriter::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::File(f) => f.flush(),
            LogWriter::Stderr(e) => e.flush(),
        }
    }
}

/// Append-only log file shared by every record.
struct AppendLog(File);

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogWriter::File(f),
            Err(_) => LogWriter::Stderr(io::stderr()),
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_append(path: &Path) -> io::Result<File> {
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// `$XDG_STATE_HOME/kfetch/kfetch.log`, creating the directory if needed.
pub fn state_log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kfetch")?;
    xdg_dirs
        .place_state_file(LOG_FILE)
        .context("failed to create kfetch state directory")
}

/// Log to the state-dir file. Errors are returned so the caller can fall
/// back to [`init_stderr`].
pub fn init_state_file() -> Result<PathBuf> {
    let path = state_log_path()?;
    let file = open_append(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(FILE_FILTER))
        .with_writer(AppendLog(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("logging to {}", path.display());
    Ok(path)
}

/// Log to stderr. A second initialization is ignored.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(STDERR_FILTER))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
