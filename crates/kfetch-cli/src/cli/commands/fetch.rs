//! Fetch: open the output file, run the transfer, return the outcome.

use anyhow::Result;
use kfetch_core::config::KfetchConfig;
use kfetch_core::progress::ProgressRenderer;
use kfetch_core::report::Outcome;
use kfetch_core::request::RequestConfig;
use kfetch_core::sink::{BodySink, FileSink, Tee, TerminalSink};
use kfetch_core::transfer::{DownloadEvents, Transfer, TransferError};

/// Perform the request. Errors opening the output file are returned before any
/// network activity; transfer failures come back as `Outcome::Failed`.
pub fn run_fetch(request: &RequestConfig, cfg: &KfetchConfig) -> Result<Outcome> {
    let file = FileSink::create(&request.output_path)?;
    let sink: Box<dyn BodySink> = if cfg.echo_body {
        Box::new(Tee::new(file, TerminalSink::stdout()))
    } else {
        Box::new(file)
    };
    let progress = cfg
        .show_progress
        .then(|| ProgressRenderer::stdout(cfg.bar_width));
    let events = DownloadEvents::new(sink, progress);

    let mut transfer = match Transfer::configure(request, &cfg.transfer_options(), events) {
        Ok(t) => t,
        Err(error) => return Ok(Outcome::Failed { error }),
    };

    let outcome = match transfer.perform() {
        Ok(summary) => match transfer.events_mut().finish() {
            Ok(()) => Outcome::Saved {
                path: request.output_path.clone(),
                summary,
            },
            Err(e) => Outcome::Failed {
                error: TransferError::Sink(e),
            },
        },
        Err(error) => Outcome::Failed { error },
    };
    // Closes the output file.
    drop(transfer);
    Ok(outcome)
}
