//! Core types and service wiring for the sortli waste classifier.

/// Domain models shared by the service, providers, and front ends.
pub mod model;
/// Traits describing the upstream model interfaces.
pub mod ports;
/// Prompt construction and model selection for classification requests.
pub mod prompt;
/// Parsing of free-text model replies into verdicts.
pub mod reply;
/// High-level service facade used by clients.
pub mod service;
/// Fixed waste categories and their disposal guidance.
pub mod taxonomy;

pub use model::*;
pub use ports::*;
pub use prompt::*;
pub use reply::*;
pub use service::*;
pub use taxonomy::*;
