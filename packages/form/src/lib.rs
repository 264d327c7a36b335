//! HTTP form request builder.
//!
//! Assembles an outgoing request from named text fields and file uploads,
//! picking the encoding by method and content: query-only methods (GET,
//! HEAD, OPTIONS by default) merge fields into the URL query, body-bearing
//! methods get an `application/x-www-form-urlencoded` body, and the
//! presence of any upload switches them to `multipart/form-data` with a
//! boundary token guaranteed absent from the payload.
//!
//! Transport is out of scope: the produced [`Request`] is a finished,
//! immutable artifact for whatever HTTP client executes it. The request
//! scaffold and body stream come from an injected [`HttpFactory`], and
//! upload content types from an injected [`MimeDetector`], each with an
//! in-memory default.
//!
//! ```
//! use http::Method;
//! use webform::Wizard;
//!
//! let wizard = Wizard::new();
//! let mut form = wizard.create_form("http://localhost:8000/upload", Method::POST)?;
//! form.add_field("auth[user]", "alice")?;
//! form.upload_from_bytes("files[]", &b"hello, world!"[..], "readme.txt", None)?;
//!
//! let request = form.create_request()?;
//! let content_type = &request.headers()[http::header::CONTENT_TYPE];
//! assert!(content_type.to_str().unwrap().starts_with("multipart/form-data"));
//! # Ok::<(), webform::FormError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod form;
pub mod http;
pub mod mime;
pub mod source;
pub mod wizard;

pub use crate::error::{FieldKind, FormError};
pub use crate::form::{Form, Upload};
pub use crate::http::body::Body;
pub use crate::http::factory::{DefaultHttpFactory, HttpFactory};
pub use crate::http::request::Request;
pub use crate::mime::{DefaultMimeDetector, MimeDetector, OCTET_STREAM};
pub use crate::source::ContentSource;
pub use crate::wizard::Wizard;
