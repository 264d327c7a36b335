//! The immutable request artifact handed off by the builder.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use url::Url;

/// A finished request: method, target URL, headers and body.
///
/// Produced once per [`Form::create_request`] call and independent of the
/// builder afterwards; the builder stays mutable, the artifact does not.
///
/// [`Form::create_request`]: crate::Form::create_request
#[derive(Debug, Clone)]
pub struct Request<B> {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: B,
}

impl<B> Request<B> {
    /// Create a request with empty headers.
    pub fn new(method: Method, url: Url, body: B) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Get the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the target URL.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the body.
    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Consume the request, returning its body.
    #[inline]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Return the request with a header set.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Return the request with its body replaced.
    #[must_use]
    pub fn with_body<T>(self, body: T) -> Request<T> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body,
        }
    }
}
