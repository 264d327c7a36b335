//! Rewindable byte sources backing file uploads.

use std::io::{self, Read, Seek};

/// A readable byte origin that can be repositioned to its start.
///
/// Every source is read twice per build: once by the boundary search and
/// once by the encoder, so reset-to-start must be repeatable. Any
/// `Read + Seek + Send` type qualifies; in-memory buffers come in as
/// `Cursor` and files as `std::fs::File`.
pub trait ContentSource: Read + Seek + Send {}

impl<T: Read + Seek + Send> ContentSource for T {}

/// Upper bound on the registration probe used for MIME sniffing.
pub(crate) const PROBE_LEN: usize = 4096;

/// Read up to [`PROBE_LEN`] leading bytes, leaving the source rewound.
///
/// Doubles as the validity check for caller-supplied handles: a source
/// that cannot rewind or read here is rejected before being stored.
pub(crate) fn probe(source: &mut dyn ContentSource) -> io::Result<Vec<u8>> {
    source.rewind()?;
    let mut buf = vec![0u8; PROBE_LEN];
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    source.rewind()?;
    Ok(buf)
}
