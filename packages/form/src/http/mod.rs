//! Request artifacts and the message-factory seam.

pub mod body;
pub mod factory;
pub mod request;

pub use body::Body;
pub use factory::{DefaultHttpFactory, HttpFactory};
pub use request::Request;
