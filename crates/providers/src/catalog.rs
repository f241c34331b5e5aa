//! Backend seams: model discovery, text generation, and session setup.
//!
//! The Gemini client implements all of these; tests substitute fakes.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One entry of a backend's model catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Identifier as reported by the backend (e.g., "models/gemini-1.5-flash")
    pub name: String,
    /// Capability tags (e.g., "generateContent", "embedContent")
    pub supported_methods: Vec<String>,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            supported_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn supports(&self, capability: &str) -> bool {
        self.supported_methods.iter().any(|m| m == capability)
    }
}

/// Lists the models an account can use
#[async_trait::async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}

/// Issues a single, non-streaming generation call
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String>;
}

/// A configured backend session
pub trait GenerativeBackend: ModelCatalog + TextGenerator {}

impl<T: ModelCatalog + TextGenerator> GenerativeBackend for T {}

/// Builds a backend session from a credential
pub trait BackendConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> Result<Box<dyn GenerativeBackend>>;
}
