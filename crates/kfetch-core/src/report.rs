//! Final outcome of a run and how it is shown to the user.

use crate::style::{self, Style};
use crate::transfer::{TransferError, TransferSummary};
use std::io::{self, Write};
use std::path::PathBuf;

/// Process exit status for a completed run.
pub const EXIT_OK: i32 = 0;
/// Process exit status for usage, resource and transfer failures.
pub const EXIT_FAILURE: i32 = 1;

/// Result of the Transferring state.
#[derive(Debug)]
pub enum Outcome {
    Saved {
        path: PathBuf,
        summary: TransferSummary,
    },
    Failed {
        error: TransferError,
    },
}

impl Outcome {
    /// A failed transfer exits non-zero, unlike the historical behaviour of
    /// this tool which exited 0 after printing the failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Saved { .. } => EXIT_OK,
            Outcome::Failed { .. } => EXIT_FAILURE,
        }
    }
}

/// Writes outcomes and errors. Normal output goes to `out`, failures to `err`.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    colored_out: bool,
    colored_err: bool,
}

impl Reporter<io::Stdout, io::Stderr> {
    /// Reporter on stdout/stderr, colored where the terminal supports it.
    pub fn terminal() -> Self {
        Self::new(
            io::stdout(),
            io::stderr(),
            style::stdout_colored(),
            style::stderr_colored(),
        )
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, colored_out: bool, colored_err: bool) -> Self {
        Self {
            out,
            err,
            colored_out,
            colored_err,
        }
    }

    /// Print the outcome. Both lines start with a newline so they land below
    /// the progress bar and any mirrored body.
    pub fn report(&mut self, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Saved { path, .. } => {
                let line = format!("Output saved to: {}", path.display());
                writeln!(
                    self.out,
                    "\n{}",
                    style::paint(Style::Success, &line, self.colored_out)
                )?;
                self.out.flush()
            }
            Outcome::Failed { error } => {
                let line = format!("Transfer failed: {}", error);
                writeln!(
                    self.err,
                    "\n{}",
                    style::paint(Style::Error, &line, self.colored_err)
                )?;
                self.err.flush()
            }
        }
    }

    /// Print a usage or resource error.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(
            self.err,
            "{}",
            style::paint(Style::Error, message, self.colored_err)
        )?;
        self.err.flush()
    }
}
