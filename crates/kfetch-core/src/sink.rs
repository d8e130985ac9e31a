//! Output sinks for the response body.
//!
//! The file sink persists every chunk; the terminal sink mirrors it for live
//! viewing. `Tee` composes the two so each can be exercised on its own.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Error opening the output file. Raised before any network activity.
#[derive(Debug, thiserror::Error)]
#[error("failed to open output file {}: {source}", .path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Receives body chunks as they arrive.
pub trait BodySink {
    /// Consume `chunk` and return how many bytes were accepted. Anything less than
    /// `chunk.len()` makes the transfer abort with a write error.
    fn accept(&mut self, chunk: &[u8]) -> usize;

    /// Flush buffered data.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// The I/O error behind the last short write, if one was recorded.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

impl<S: BodySink + ?Sized> BodySink for Box<S> {
    fn accept(&mut self, chunk: &[u8]) -> usize {
        (**self).accept(chunk)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        (**self).take_error()
    }
}

/// Writes the body to the output file. The file is closed when the sink is dropped.
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
    error: Option<io::Error>,
}

impl FileSink {
    /// Create or truncate `path` for writing.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened output file");
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            error: None,
        })
    }
}

impl BodySink for FileSink {
    fn accept(&mut self, chunk: &[u8]) -> usize {
        match self.writer.write_all(chunk) {
            Ok(()) => chunk.len(),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "output write failed: {}", e);
                self.error = Some(e);
                0
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

/// Mirrors the body to a terminal (or any writer). Failures here never abort
/// the transfer.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> BodySink for TerminalSink<W> {
    fn accept(&mut self, chunk: &[u8]) -> usize {
        if let Err(e) = self.out.write_all(chunk) {
            tracing::trace!("terminal mirror write failed: {}", e);
        }
        chunk.len()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Fan-out: every chunk goes to both sinks; only the primary's count is reported.
pub struct Tee<A, B> {
    primary: A,
    mirror: B,
}

impl<A: BodySink, B: BodySink> Tee<A, B> {
    pub fn new(primary: A, mirror: B) -> Self {
        Self { primary, mirror }
    }

    #[cfg(test)]
    pub(crate) fn primary(&self) -> &A {
        &self.primary
    }

    pub fn mirror(&self) -> &B {
        &self.mirror
    }
}

impl<A: BodySink, B: BodySink> BodySink for Tee<A, B> {
    fn accept(&mut self, chunk: &[u8]) -> usize {
        let accepted = self.primary.accept(chunk);
        self.mirror.accept(chunk);
        accepted
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Err(e) = self.mirror.flush() {
            tracing::trace!("terminal mirror flush failed: {}", e);
        }
        self.primary.flush()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.primary.take_error()
    }
}
