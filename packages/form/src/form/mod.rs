//! The form builder: field/file registration and request finalization.

mod boundary;
mod encode;
mod query;
mod store;

use std::fmt;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use http::Method;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::error::{FieldKind, FormError};
use crate::http::factory::{DefaultHttpFactory, HttpFactory};
use crate::http::request::Request;
use crate::mime::{DefaultMimeDetector, MimeDetector};
use crate::source::{self, ContentSource};

pub use store::Upload;

use store::{FieldStore, FileStore};

const URLENCODED: &str = "application/x-www-form-urlencoded";

/// A mutable request draft: named text fields and file uploads collected
/// against a method and target URL.
///
/// Registration happens incrementally; [`create_request`] reads the
/// current state and produces an independent, immutable [`Request`].
/// Encoding mode is decided there: query-only methods merge fields into
/// the URL query, body-bearing methods get an urlencoded body, or a
/// multipart one once any file is registered.
///
/// [`create_request`]: Form::create_request
pub struct Form<F: HttpFactory = DefaultHttpFactory, D: MimeDetector = DefaultMimeDetector> {
    factory: F,
    detector: D,
    method: Method,
    target: Url,
    query_methods: Vec<Method>,
    fields: FieldStore,
    files: FileStore,
}

impl<F: HttpFactory, D: MimeDetector> Form<F, D> {
    /// Create a draft for `method` against `uri`.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidTarget`] when `uri` lacks a scheme or host.
    pub fn new(factory: F, detector: D, uri: &str, method: Method) -> Result<Self, FormError> {
        let target = parse_target(uri)?;
        Ok(Self {
            factory,
            detector,
            method,
            target,
            query_methods: vec![Method::GET, Method::HEAD, Method::OPTIONS],
            fields: FieldStore::new(FieldKind::Field),
            files: FileStore::new(FieldKind::File),
        })
    }

    /// Replace the set of methods whose fields travel in the URL query
    /// instead of a body. Defaults to GET, HEAD and OPTIONS.
    pub fn with_query_methods(&mut self, methods: impl IntoIterator<Item = Method>) -> &mut Self {
        self.query_methods = methods.into_iter().collect();
        self
    }

    /// Register a text field.
    ///
    /// # Errors
    ///
    /// [`FormError::DuplicateField`] when a non-array name is already
    /// registered; the store is left unchanged.
    pub fn add_field(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self, FormError> {
        self.fields.insert(name, value.into())?;
        Ok(self)
    }

    /// Register an upload from an in-memory buffer.
    ///
    /// Without an explicit `mime`, the type is resolved through the
    /// detector chain against the content and `filename`.
    ///
    /// # Errors
    ///
    /// [`FormError::DuplicateField`] for a repeated non-array field name.
    pub fn upload_from_bytes(
        &mut self,
        field: &str,
        content: impl Into<Bytes>,
        filename: &str,
        mime: Option<&str>,
    ) -> Result<&mut Self, FormError> {
        let content = content.into();
        let mime = match mime {
            Some(mime) => mime.to_string(),
            None => {
                let head = &content[..content.len().min(source::PROBE_LEN)];
                crate::mime::resolve_content(&self.detector, head, filename)
            }
        };
        self.files.insert(
            field,
            Upload {
                filename: filename.to_string(),
                mime,
                source: Box::new(Cursor::new(content)),
            },
        )?;
        Ok(self)
    }

    /// Register an upload from a file on disk.
    ///
    /// `filename` defaults to the path's final component; without an
    /// explicit `mime`, the type is resolved through the detector chain
    /// against the path.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidSource`] when the file cannot be opened;
    /// [`FormError::DuplicateField`] for a repeated non-array field name.
    pub fn upload_from_file(
        &mut self,
        field: &str,
        path: impl AsRef<Path>,
        mime: Option<&str>,
        filename: Option<&str>,
    ) -> Result<&mut Self, FormError> {
        let path = path.as_ref();
        let filename = match filename {
            Some(filename) => filename.to_string(),
            None => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        };
        let mime = match mime {
            Some(mime) => mime.to_string(),
            None => crate::mime::resolve_path(&self.detector, path, &filename),
        };
        let file = File::open(path).map_err(FormError::InvalidSource)?;
        self.files.insert(
            field,
            Upload {
                filename,
                mime,
                source: Box::new(file),
            },
        )?;
        Ok(self)
    }

    /// Register an upload from a caller-supplied source.
    ///
    /// The handle is probed (rewind, bounded read, rewind) before being
    /// stored; the probed bytes feed the detector chain when no `mime` is
    /// given.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidSource`] when the handle cannot be read or
    /// rewound; [`FormError::DuplicateField`] for a repeated non-array
    /// field name.
    pub fn upload_from_source(
        &mut self,
        field: &str,
        source: impl ContentSource + 'static,
        filename: &str,
        mime: Option<&str>,
    ) -> Result<&mut Self, FormError> {
        let mut source: Box<dyn ContentSource> = Box::new(source);
        let head = source::probe(source.as_mut()).map_err(FormError::InvalidSource)?;
        let mime = match mime {
            Some(mime) => mime.to_string(),
            None => crate::mime::resolve_content(&self.detector, &head, filename),
        };
        self.files.insert(
            field,
            Upload {
                filename: filename.to_string(),
                mime,
                source,
            },
        )?;
        Ok(self)
    }

    /// Finalize the draft into an immutable request.
    ///
    /// Query-only methods get their fields merged into the URL query and
    /// carry no body, no Content-Type and no Content-Length; any
    /// registered files are omitted from the transmitted representation.
    /// Body-bearing methods carry the encoded payload with Content-Type
    /// and an exact Content-Length. The draft stays usable; every call
    /// re-reads current state and rewinds upload sources.
    ///
    /// # Errors
    ///
    /// Source I/O failures surface as [`FormError::Io`]; an upload content
    /// type unfit for a header as [`FormError::InvalidContentType`].
    pub fn create_request(&mut self) -> Result<Request<F::Body>, FormError> {
        if self.query_methods.contains(&self.method) {
            tracing::trace!(method = %self.method, "merging form fields into request query");
            let mut url = self.target.clone();
            query::merge_into(&mut url, &encode::urlencoded(&self.fields));
            return Ok(self.factory.create_request(self.method.clone(), url));
        }

        let (content_type, payload) = if self.files.is_empty() {
            (URLENCODED.to_string(), encode::urlencoded(&self.fields).into_bytes())
        } else {
            let boundary = boundary::generate(&self.fields, &mut self.files)?;
            let payload = encode::multipart(&self.fields, &mut self.files, &boundary)?;
            (format!("multipart/form-data; boundary=\"{boundary}\""), payload)
        };
        tracing::trace!(
            method = %self.method,
            content_type = %content_type,
            bytes = payload.len(),
            "encoded request body"
        );

        let length = payload.len();
        let mut encoded = Cursor::new(payload);
        let body = self.factory.create_stream(&mut encoded)?;
        Ok(self
            .factory
            .create_request(self.method.clone(), self.target.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_str(&content_type)?)
            .with_header(CONTENT_LENGTH, HeaderValue::from(length))
            .with_body(body))
    }
}

impl<F: HttpFactory, D: MimeDetector> fmt::Debug for Form<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("method", &self.method)
            .field("target", &self.target.as_str())
            .field("query_methods", &self.query_methods)
            .field("fields", &self.fields)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

fn parse_target(uri: &str) -> Result<Url, FormError> {
    let invalid = || FormError::InvalidTarget { uri: uri.to_string() };
    let url = Url::parse(uri).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}
