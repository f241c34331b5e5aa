pub mod catalog;
pub mod error;
pub mod gemini;
pub mod resolver;

pub use catalog::{BackendConnector, GenerativeBackend, ModelCatalog, ModelInfo, TextGenerator};
pub use error::ProviderError;
pub use gemini::{GeminiClient, GeminiConnector};
pub use resolver::{fallback_model, pick_model, resolve_model};
