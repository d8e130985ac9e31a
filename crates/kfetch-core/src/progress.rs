//! In-place textual progress bar driven by byte counts.
//!
//! `render_bar` holds the arithmetic; `ProgressRenderer` draws the result on a
//! single terminal line, overwriting it on every update.

use crate::style::{self, Style};
use std::io::{self, Write};

/// Bar width used when the config file does not set one.
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// One computed frame of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Cells drawn as filled; never more than `width`.
    pub filled: usize,
    pub width: usize,
    /// Completion in percent, clamped to `0.0..=100.0`.
    pub percent: f64,
}

impl Bar {
    /// Render as `\r[####----] 42.00%`. The leading carriage return makes the
    /// terminal overwrite the previous frame.
    pub fn render(&self, colored: bool) -> String {
        let filled = "#".repeat(self.filled);
        let empty = "-".repeat(self.width - self.filled);
        format!(
            "\r[{}{}] {:.2}%",
            style::paint(Style::ProgressFilled, &filled, colored),
            style::paint(Style::ProgressEmpty, &empty, colored),
            self.percent
        )
    }
}

/// Compute a frame for `downloaded` of `total` bytes. Returns `None` when the
/// total is unknown (zero), in which case nothing is drawn.
///
/// Counts above the total are clamped so the bar never overflows its width.
pub fn render_bar(downloaded: u64, total: u64, width: usize) -> Option<Bar> {
    if total == 0 {
        return None;
    }
    let done = downloaded.min(total);
    let filled = (done as u128 * width as u128 / total as u128) as usize;
    let percent = done as f64 / total as f64 * 100.0;
    Some(Bar {
        filled,
        width,
        percent,
    })
}

/// Draws progress frames to a writer (stdout in the CLI).
pub struct ProgressRenderer<W: Write> {
    out: W,
    width: usize,
    colored: bool,
    last: Option<String>,
}

impl ProgressRenderer<io::Stdout> {
    /// Renderer on stdout, colored when stdout supports it.
    pub fn stdout(width: usize) -> Self {
        Self::new(io::stdout(), width, style::stdout_colored())
    }
}

impl<W: Write> ProgressRenderer<W> {
    pub fn new(out: W, width: usize, colored: bool) -> Self {
        Self {
            out,
            width: width.max(1),
            colored,
            last: None,
        }
    }

    /// Redraw for the given counts. Identical consecutive frames are written
    /// only once; every written frame is flushed immediately.
    pub fn update(&mut self, downloaded: u64, total: u64) -> io::Result<()> {
        let Some(bar) = render_bar(downloaded, total, self.width) else {
            return Ok(());
        };
        let line = bar.render(self.colored);
        if self.last.as_deref() == Some(line.as_str()) {
            return Ok(());
        }
        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;
        self.last = Some(line);
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}
