//! Entry point tying the injected capabilities to form drafts.

use http::Method;

use crate::error::FormError;
use crate::form::Form;
use crate::http::factory::{DefaultHttpFactory, HttpFactory};
use crate::mime::{DefaultMimeDetector, MimeDetector};

/// Holds the message factory and MIME detector, and spawns [`Form`]
/// drafts bound to them.
#[derive(Debug, Clone)]
pub struct Wizard<F: HttpFactory = DefaultHttpFactory, D: MimeDetector = DefaultMimeDetector> {
    factory: F,
    detector: D,
}

impl Wizard {
    /// A wizard over the default in-memory factory and extension-table
    /// detector.
    pub fn new() -> Self {
        Self::with_capabilities(DefaultHttpFactory, DefaultMimeDetector)
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HttpFactory, D: MimeDetector> Wizard<F, D> {
    /// A wizard over caller-supplied capabilities.
    pub fn with_capabilities(factory: F, detector: D) -> Self {
        Self { factory, detector }
    }

    /// Start a form draft for `method` against `uri`.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidTarget`] when `uri` lacks a scheme or host.
    pub fn create_form(&self, uri: &str, method: Method) -> Result<Form<F, D>, FormError>
    where
        F: Clone,
        D: Clone,
    {
        Form::new(self.factory.clone(), self.detector.clone(), uri, method)
    }
}
