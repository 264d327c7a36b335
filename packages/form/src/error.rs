//! Error types raised while assembling a form request.

use std::fmt;
use std::io;

use thiserror::Error;

/// Which store a duplicate name was registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A text field added with `add_field`.
    Field,
    /// A file upload added with one of the `upload_from_*` methods.
    File,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Field => f.write_str("field"),
            FieldKind::File => f.write_str("file"),
        }
    }
}

/// Errors produced by [`Wizard`](crate::Wizard) and [`Form`](crate::Form).
///
/// All failures are synchronous and local; there is no transient class and
/// nothing is retried or swallowed internally.
#[derive(Debug, Error)]
pub enum FormError {
    /// The target URI lacks a scheme or host. Raised at form construction,
    /// before any field can be registered.
    #[error("uri must contain scheme and host: {uri}")]
    InvalidTarget {
        /// The rejected target.
        uri: String,
    },

    /// A non-array name was registered twice. The store is left unchanged,
    /// with the first registration intact.
    #[error("{kind} {name} already exists")]
    DuplicateField {
        /// Store the collision happened in.
        kind: FieldKind,
        /// The normalized offending name.
        name: String,
    },

    /// A caller-supplied upload handle could not be read or rewound.
    /// Raised at registration, before the handle is stored.
    #[error("upload source is not readable")]
    InvalidSource(#[source] io::Error),

    /// The boundary search hit its retry ceiling. Practically unreachable:
    /// a collision requires the payload to already contain the freshly
    /// drawn 32-character token.
    #[error("gave up searching for a collision-free multipart boundary")]
    BoundaryExhausted,

    /// An upload's content type cannot be carried in a header.
    #[error("content type is not a valid header value")]
    InvalidContentType(#[from] http::header::InvalidHeaderValue),

    /// A source failed while being scanned or encoded.
    #[error(transparent)]
    Io(#[from] io::Error),
}
