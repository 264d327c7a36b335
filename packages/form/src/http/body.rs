//! Default request body type.

use std::fmt;

use bytes::Bytes;

/// Body carried by requests built with [`DefaultHttpFactory`].
///
/// [`DefaultHttpFactory`]: crate::DefaultHttpFactory
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body; query-only requests carry this.
    #[default]
    Empty,
    /// A fully-encoded payload.
    Bytes(Bytes),
}

impl Body {
    /// Byte length of the payload.
    pub fn len(&self) -> usize {
        match self {
            Body::Empty => 0,
            Body::Bytes(bytes) => bytes.len(),
        }
    }

    /// Check if the body carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Empty => &[],
            Body::Bytes(bytes) => bytes,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.debug_tuple("Empty").finish(),
            Body::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("{} bytes", bytes.len()))
                .finish(),
        }
    }
}
