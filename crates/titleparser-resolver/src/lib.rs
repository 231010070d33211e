//! Title resolution for titleparser.
//!
//! A [`Registry`] binds URL patterns to specialised resolvers, the
//! [`GenericExtractor`] handles everything else, and the [`Dispatcher`]
//! puts the two behind a cache.

pub mod builtin;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod http;
pub mod registry;

pub use builtin::{register_builtin, Silent};
pub use dispatcher::Dispatcher;
pub use error::{Result, SetupError};
pub use extractor::{extract_title, GenericExtractor};
pub use http::HttpConfig;
pub use registry::{Binding, Registry};
