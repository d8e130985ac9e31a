//! Easy2 Handler that forwards libcurl callbacks to `TransferEvents`.

use curl::easy::{Handler, InfoType, WriteError};
use std::io;

use super::diagnostics;
use super::TransferEvents;

/// Handler state for the single transfer. Owns the event sink so the output
/// file lives exactly as long as the curl handle.
pub(super) struct EventHandler<E> {
    pub(super) events: E,
    /// Body bytes accepted by the sink so far.
    pub(super) received: u64,
}

impl<E> EventHandler<E> {
    pub(super) fn new(events: E) -> Self {
        Self {
            events,
            received: 0,
        }
    }
}

impl<E: TransferEvents> Handler for EventHandler<E> {
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        let accepted = self.events.on_body_chunk(data);
        self.received += accepted as u64;
        Ok(accepted)
    }

    fn progress(&mut self, dltotal: f64, dlnow: f64, _ultotal: f64, _ulnow: f64) -> bool {
        self.events.on_progress(dlnow as u64, dltotal as u64);
        true
    }

    // Only called when the handle is verbose.
    fn debug(&mut self, kind: InfoType, data: &[u8]) {
        let stderr = io::stderr();
        let mut out = stderr.lock();
        let _ = diagnostics::write_record(&mut out, kind, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        chunks: Vec<Vec<u8>>,
        progress: Vec<(u64, u64)>,
        limit: Option<usize>,
    }

    impl TransferEvents for Recorder {
        fn on_body_chunk(&mut self, chunk: &[u8]) -> usize {
            self.chunks.push(chunk.to_vec());
            self.limit.map_or(chunk.len(), |l| chunk.len().min(l))
        }

        fn on_progress(&mut self, downloaded: u64, total: u64) {
            self.progress.push((downloaded, total));
        }
    }

    #[test]
    fn write_forwards_chunk_and_counts_accepted() {
        let mut h = EventHandler::new(Recorder::default());
        assert_eq!(h.write(b"abc").unwrap(), 3);
        assert_eq!(h.write(b"de").unwrap(), 2);
        assert_eq!(h.received, 5);
        assert_eq!(h.events.chunks, vec![b"abc".to_vec(), b"de".to_vec()]);
    }

    #[test]
    fn short_write_is_passed_through() {
        let mut h = EventHandler::new(Recorder {
            limit: Some(0),
            ..Recorder::default()
        });
        assert_eq!(h.write(b"abc").unwrap(), 0);
        assert_eq!(h.received, 0);
    }

    #[test]
    fn progress_always_continues() {
        let mut h = EventHandler::new(Recorder::default());
        assert!(h.progress(0.0, 0.0, 0.0, 0.0));
        assert!(h.progress(1000.0, 250.0, 0.0, 0.0));
        assert!(h.progress(1000.0, 1500.0, 10.0, 10.0));
        assert_eq!(h.events.progress, vec![(0, 0), (250, 1000), (1500, 1000)]);
    }
}
