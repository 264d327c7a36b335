//! Message-factory capability.

use std::io::{self, Read};

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::http::body::Body;
use crate::http::request::Request;
use crate::source::ContentSource;

/// Produces request scaffolds and body streams.
///
/// The form builder depends only on these two operations, injected at
/// construction, so integrations can substitute their own request and
/// stream types without touching the encoding logic.
pub trait HttpFactory {
    /// Body type carried by produced requests.
    type Body;

    /// Create an empty-bodied request scaffold.
    fn create_request(&self, method: Method, url: Url) -> Request<Self::Body>;

    /// Drain a rewound content source into a body stream.
    ///
    /// # Errors
    ///
    /// Propagates read failures from the source.
    fn create_stream(&self, source: &mut dyn ContentSource) -> io::Result<Self::Body>;
}

/// Factory producing in-memory [`Body`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHttpFactory;

impl HttpFactory for DefaultHttpFactory {
    type Body = Body;

    fn create_request(&self, method: Method, url: Url) -> Request<Body> {
        Request::new(method, url, Body::Empty)
    }

    fn create_stream(&self, source: &mut dyn ContentSource) -> io::Result<Body> {
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(Body::Bytes(Bytes::from(buf)))
    }
}
