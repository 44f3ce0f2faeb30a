//! HTTP front end for the sortli waste classifier.

/// Command line and environment configuration.
pub mod config;
/// Error responses.
pub mod error;
mod logging;
/// Router and handlers.
pub mod routes;

pub use config::Config;
pub use error::{ApiError, ErrorBody};
pub use logging::init_logging;
pub use routes::{AppState, DEFAULT_MAX_BODY_BYTES, app};
