//! Ordered field and file stores.

use std::fmt;

use crate::error::{FieldKind, FormError};
use crate::source::ContentSource;

/// A registered file upload: the filename sent to the server, its content
/// type and the byte source behind it.
pub struct Upload {
    pub(crate) filename: String,
    pub(crate) mime: String,
    pub(crate) source: Box<dyn ContentSource>,
}

impl Upload {
    /// The filename sent to the server.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The content type attached to the part.
    pub fn mime(&self) -> &str {
        &self.mime
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered mapping from normalized field name to values.
///
/// Names containing `[]` are array-style and may repeat; any other name is
/// unique within its store. Values group under the first insertion of
/// their name, so iteration yields names in first-insertion order and
/// values in insertion order.
#[derive(Debug)]
pub(crate) struct Store<V> {
    kind: FieldKind,
    entries: Vec<(String, Vec<V>)>,
}

impl<V> Store<V> {
    pub(crate) fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Append `value` under `name`, enforcing uniqueness of non-array names.
    ///
    /// On rejection the store is untouched; the call is a no-op.
    pub(crate) fn insert(&mut self, name: &str, value: V) -> Result<(), FormError> {
        let name = normalize(name);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => {
                if !is_array_name(&name) {
                    return Err(FormError::DuplicateField {
                        kind: self.kind,
                        name,
                    });
                }
                values.push(value);
            }
            None => self.entries.push((name, vec![value])),
        }
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut [V])> {
        self.entries
            .iter_mut()
            .map(|(name, values)| (name.as_str(), values.as_mut_slice()))
    }
}

pub(crate) type FieldStore = Store<String>;
pub(crate) type FileStore = Store<Upload>;

pub(crate) fn is_array_name(name: &str) -> bool {
    name.contains("[]")
}

/// Strip whitespace immediately inside brackets, so `a[ b ]` and `a[b]`
/// name the same field.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut held = String::new();
    for c in name.chars() {
        if c.is_whitespace() {
            if !out.ends_with('[') {
                held.push(c);
            }
            continue;
        }
        if c == ']' {
            held.clear();
        } else {
            out.push_str(&held);
            held.clear();
        }
        out.push(c);
    }
    out.push_str(&held);
    out
}
