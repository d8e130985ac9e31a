//! Verbose libcurl diagnostics in curl's own `*`, `>`, `<` line format.

use curl::easy::InfoType;
use std::io::{self, Write};
use std::str;

/// Write one libcurl debug record to `out`.
///
/// Text and header lines are copied verbatim behind their prefix; body and TLS
/// payloads are summarized by size.
pub(crate) fn write_record(out: &mut dyn Write, kind: InfoType, data: &[u8]) -> io::Result<()> {
    let prefix = match kind {
        InfoType::Text => "*",
        InfoType::HeaderIn => "<",
        InfoType::HeaderOut => ">",
        InfoType::DataIn | InfoType::SslDataIn => {
            return writeln!(out, "{{ [{} bytes data]", data.len());
        }
        InfoType::DataOut | InfoType::SslDataOut => {
            return writeln!(out, "}} [{} bytes data]", data.len());
        }
        _ => return Ok(()),
    };
    match str::from_utf8(data) {
        Ok(text) => {
            for line in text.lines().filter(|l| !l.is_empty()) {
                writeln!(out, "{} {}", prefix, line)?;
            }
            Ok(())
        }
        Err(_) => writeln!(out, "{} ({} bytes of data)", prefix, data.len()),
    }
}
