//! Content-type detection for uploads.
//!
//! Detection is an injected capability with a fixed fallback chain:
//! the detector's own sniffing, then the shared extension table, then
//! `application/octet-stream`.

use std::path::Path;

/// The constant fallback at the end of every detection chain.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Best-effort MIME detection capability.
///
/// The default methods resolve paths through the `mime_guess` extension
/// table and decline to sniff raw bytes; integrations with a real content
/// inspector override `sniff_bytes`.
pub trait MimeDetector: Send + Sync {
    /// Sniff a MIME type from leading content bytes.
    fn sniff_bytes(&self, _content: &[u8]) -> Option<String> {
        None
    }

    /// Resolve a MIME type for a file path.
    fn sniff_path(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path).first().map(|m| m.to_string())
    }
}

/// Detector backed purely by the extension table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMimeDetector;

impl MimeDetector for DefaultMimeDetector {}

fn from_extension(filename: &str) -> Option<String> {
    mime_guess::from_path(filename).first().map(|m| m.to_string())
}

/// Resolve a type for in-memory or streamed content.
///
/// A sniff that lands on the generic octet-stream type is retried against
/// the filename extension before giving up.
pub(crate) fn resolve_content<D: MimeDetector>(detector: &D, content: &[u8], filename: &str) -> String {
    match detector.sniff_bytes(content) {
        Some(mime) if mime != OCTET_STREAM => mime,
        _ => from_extension(filename).unwrap_or_else(|| OCTET_STREAM.to_string()),
    }
}

/// Resolve a type for a file on disk.
pub(crate) fn resolve_path<D: MimeDetector>(detector: &D, path: &Path, filename: &str) -> String {
    match detector.sniff_path(path) {
        Some(mime) if mime != OCTET_STREAM => mime,
        _ => from_extension(filename).unwrap_or_else(|| OCTET_STREAM.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_table_resolves_known_types() {
        let detector = DefaultMimeDetector;
        assert_eq!(resolve_content(&detector, b"hello", "readme.txt"), "text/plain");
        assert_eq!(resolve_content(&detector, &[0xff, 0xd8], "photo.jpg"), "image/jpeg");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let detector = DefaultMimeDetector;
        assert_eq!(resolve_content(&detector, b"\x00\x01", "blob.weird"), OCTET_STREAM);
    }

    #[test]
    fn injected_sniffer_wins_over_extension() {
        struct Magic;
        impl MimeDetector for Magic {
            fn sniff_bytes(&self, content: &[u8]) -> Option<String> {
                content.starts_with(b"%PDF").then(|| "application/pdf".to_string())
            }
        }
        assert_eq!(resolve_content(&Magic, b"%PDF-1.7", "x.txt"), "application/pdf");
        // Sniffer declines; the extension table takes over.
        assert_eq!(resolve_content(&Magic, b"plain", "x.txt"), "text/plain");
    }

    #[test]
    fn octet_stream_sniff_retries_filename_extension() {
        struct Generic;
        impl MimeDetector for Generic {
            fn sniff_bytes(&self, _content: &[u8]) -> Option<String> {
                Some(OCTET_STREAM.to_string())
            }
        }
        assert_eq!(resolve_content(&Generic, b"body { }", "site.css"), "text/css");
    }
}
