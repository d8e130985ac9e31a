//! Single HTTP(S) request through libcurl's easy interface.
//!
//! All protocol work (TLS, redirects, chunked encoding, methods) stays in
//! libcurl. This module configures one `Easy2` handle from a `RequestConfig`
//! and forwards its body and progress callbacks to a `TransferEvents` sink.
//! Runs on the calling thread; callbacks fire synchronously inside `perform`.

mod diagnostics;
mod error;
mod handler;

pub use error::TransferError;

use crate::progress::ProgressRenderer;
use crate::request::RequestConfig;
use crate::sink::BodySink;
use curl::easy::{Easy2, List};
use handler::EventHandler;
use std::io::{self, Write};
use std::time::Duration;

/// Receives transfer callbacks.
pub trait TransferEvents {
    /// A fragment of the response body arrived. Return the number of bytes
    /// accepted; a short count aborts the transfer with a write error.
    fn on_body_chunk(&mut self, chunk: &[u8]) -> usize;

    /// Download progress: bytes so far and the expected total (0 when unknown).
    fn on_progress(&mut self, downloaded: u64, total: u64);

    /// The I/O error behind the last short write, if any.
    fn take_sink_error(&mut self) -> Option<io::Error> {
        None
    }
}

/// libcurl tuning that does not come from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOptions {
    /// Print libcurl's protocol diagnostics to stderr.
    pub verbose: bool,
    /// Connect timeout; `None` leaves libcurl's default (no overall timeout).
    pub connect_timeout: Option<Duration>,
    /// Redirect limit; `None` leaves libcurl's default.
    pub max_redirections: Option<u32>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            verbose: true,
            connect_timeout: None,
            max_redirections: None,
        }
    }
}

/// What a completed transfer produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    /// Final HTTP status (after redirects). Non-2xx is not a transfer failure.
    pub response_code: u32,
    /// Body bytes accepted by the sink.
    pub bytes_received: u64,
}

/// A configured, not yet performed, request.
pub struct Transfer<E: TransferEvents> {
    easy: Easy2<EventHandler<E>>,
    url: String,
    method: String,
}

impl<E: TransferEvents> Transfer<E> {
    /// Configure a handle for `request`. Redirects are followed and peer and
    /// host certificate verification are on.
    pub fn configure(
        request: &RequestConfig,
        options: &TransferOptions,
        events: E,
    ) -> Result<Self, TransferError> {
        let mut easy = Easy2::new(EventHandler::new(events));
        easy.url(&request.url).map_err(TransferError::Setup)?;

        if let Some(body) = &request.body {
            easy.post_fields_copy(body.as_bytes())
                .map_err(TransferError::Setup)?;
        }
        easy.custom_request(&request.method)
            .map_err(TransferError::Setup)?;
        if request.is_head() {
            easy.nobody(true).map_err(TransferError::Setup)?;
        }

        if !request.headers.is_empty() {
            let mut list = List::new();
            for header in &request.headers {
                list.append(header).map_err(TransferError::Setup)?;
            }
            easy.http_headers(list).map_err(TransferError::Setup)?;
        }

        easy.follow_location(true).map_err(TransferError::Setup)?;
        if let Some(max) = options.max_redirections {
            easy.max_redirections(max).map_err(TransferError::Setup)?;
        }

        easy.ssl_verify_peer(true).map_err(TransferError::Setup)?;
        easy.ssl_verify_host(true).map_err(TransferError::Setup)?;
        if let Some(ca) = &request.ca_path {
            easy.cainfo(ca).map_err(TransferError::Setup)?;
        }

        if let Some(timeout) = options.connect_timeout {
            easy.connect_timeout(timeout)
                .map_err(TransferError::Setup)?;
        }
        easy.progress(true).map_err(TransferError::Setup)?;
        easy.verbose(options.verbose).map_err(TransferError::Setup)?;

        Ok(Self {
            easy,
            url: request.url.clone(),
            method: request.method.clone(),
        })
    }

    /// Run the request to completion, blocking the calling thread.
    pub fn perform(&mut self) -> Result<TransferSummary, TransferError> {
        tracing::info!(method = %self.method, url = %self.url, "transfer started");

        if let Err(e) = self.easy.perform() {
            if e.is_write_error() {
                if let Some(io_err) = self.easy.get_mut().events.take_sink_error() {
                    tracing::debug!(url = %self.url, "transfer aborted by output write: {}", io_err);
                    return Err(TransferError::Sink(io_err));
                }
            }
            tracing::debug!(url = %self.url, "transfer failed: {}", e);
            return Err(TransferError::Curl(e));
        }

        let response_code = self.easy.response_code().map_err(TransferError::Curl)?;
        let bytes_received = self.easy.get_ref().received;
        tracing::info!(response_code, bytes_received, "transfer finished");
        Ok(TransferSummary {
            response_code,
            bytes_received,
        })
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.easy.get_mut().events
    }
}

/// The CLI's event sink: body to a `BodySink`, progress to an optional renderer.
pub struct DownloadEvents<S: BodySink, W: Write> {
    sink: S,
    progress: Option<ProgressRenderer<W>>,
}

impl<S: BodySink, W: Write> DownloadEvents<S, W> {
    pub fn new(sink: S, progress: Option<ProgressRenderer<W>>) -> Self {
        Self { sink, progress }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Flush the sink after a completed transfer.
    pub fn finish(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl<S: BodySink, W: Write> TransferEvents for DownloadEvents<S, W> {
    fn on_body_chunk(&mut self, chunk: &[u8]) -> usize {
        self.sink.accept(chunk)
    }

    fn on_progress(&mut self, downloaded: u64, total: u64) {
        if let Some(renderer) = self.progress.as_mut() {
            if let Err(e) = renderer.update(downloaded, total) {
                tracing::trace!("progress redraw failed: {}", e);
            }
        }
    }

    fn take_sink_error(&mut self) -> Option<io::Error> {
        self.sink.take_error()
    }
}
