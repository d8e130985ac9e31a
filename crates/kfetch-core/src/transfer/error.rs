//! Transfer error type.

use std::io;

/// Why a transfer did not complete. libcurl failures display as libcurl's own
/// description of the result code.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// libcurl rejected a request option (e.g. a header or URL containing NUL).
    #[error("invalid request option: {}", .0.description())]
    Setup(#[source] curl::Error),
    /// libcurl reported a failure during the transfer (DNS, connect, TLS, protocol).
    #[error("{}", .0.description())]
    Curl(#[source] curl::Error),
    /// Writing the body to the output file failed; libcurl aborted the transfer.
    #[error("writing output failed: {0}")]
    Sink(#[source] io::Error),
}
