//! Multipart boundary generation.
//!
//! A boundary is only usable when `--<token>` appears nowhere in the
//! payload: not in a field name or value, not in a filename or content
//! type, and not anywhere inside a file's byte stream. Candidates are
//! drawn at random and rejected on any hit; with 128 bits of entropy the
//! first candidate survives in practice.

use std::io::{self, Read, Seek};

use memchr::memmem;
use rand::Rng;

use crate::error::FormError;
use crate::form::store::{FieldStore, FileStore};
use crate::source::ContentSource;

const TOKEN_BYTES: usize = 16;
const MAX_ATTEMPTS: usize = 64;
const SCAN_CHUNK: usize = 512;

/// Draw a fresh candidate token: 32 lowercase hex characters.
pub(crate) fn random_token() -> String {
    hex::encode(rand::rng().random::<[u8; TOKEN_BYTES]>())
}

/// True when `data` can and does contain the `--<token>` delimiter.
///
/// Anything shorter than the delimiter itself is skipped without a scan.
pub(crate) fn contains_delimiter(data: &[u8], token: &str) -> bool {
    if data.len() < token.len() + 2 {
        return false;
    }
    let mut needle = Vec::with_capacity(token.len() + 2);
    needle.extend_from_slice(b"--");
    needle.extend_from_slice(token.as_bytes());
    memmem::find(data, &needle).is_some()
}

/// Find a boundary token absent from every registered field and file.
pub(crate) fn generate(fields: &FieldStore, files: &mut FileStore) -> Result<String, FormError> {
    for attempt in 0..MAX_ATTEMPTS {
        let token = random_token();
        if collides(fields, files, &token)? {
            tracing::debug!(attempt, "boundary candidate found in payload, regenerating");
            continue;
        }
        return Ok(token);
    }
    Err(FormError::BoundaryExhausted)
}

fn collides(fields: &FieldStore, files: &mut FileStore, token: &str) -> Result<bool, FormError> {
    for (name, values) in fields.iter() {
        if contains_delimiter(name.as_bytes(), token) {
            return Ok(true);
        }
        for value in values {
            if contains_delimiter(value.as_bytes(), token) {
                return Ok(true);
            }
        }
    }

    let needle = format!("--{token}");
    let finder = memmem::Finder::new(needle.as_bytes());
    for (name, uploads) in files.iter_mut() {
        if contains_delimiter(name.as_bytes(), token) {
            return Ok(true);
        }
        for upload in uploads.iter_mut() {
            if contains_delimiter(upload.filename.as_bytes(), token)
                || contains_delimiter(upload.mime.as_bytes(), token)
            {
                return Ok(true);
            }
            if source_contains(upload.source.as_mut(), &finder)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Scan a source in bounded chunks, carrying the previous chunk so a
/// delimiter split across a chunk edge is still seen. The source is
/// rewound before returning, hit or miss.
fn source_contains(source: &mut dyn ContentSource, finder: &memmem::Finder<'_>) -> io::Result<bool> {
    source.rewind()?;
    let mut window: Vec<u8> = Vec::with_capacity(SCAN_CHUNK * 2);
    let mut chunk = [0u8; SCAN_CHUNK];
    let mut hit = false;
    loop {
        let n = source.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        window.extend_from_slice(&chunk[..n]);
        if finder.find(&window).is_some() {
            hit = true;
            break;
        }
        if window.len() > SCAN_CHUNK {
            window.drain(..window.len() - SCAN_CHUNK);
        }
    }
    source.rewind()?;
    Ok(hit)
}
