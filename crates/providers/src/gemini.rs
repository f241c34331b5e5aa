use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::catalog::{BackendConnector, GenerativeBackend, ModelCatalog, ModelInfo, TextGenerator};
use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Upper bound on catalog pages followed through `nextPageToken`
const MAX_CATALOG_PAGES: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidatePart {
    // Non-text parts (function calls, inline data) carry no text
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiModel {
    name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

pub struct GeminiClient {
    http: Client,
    auth_token: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client for `api_key` (trimmed). `base_url` falls back to
    /// `GEMINI_BASE_URL`, then the public endpoint.
    pub fn with_options(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let auth_token = api_key.trim();
        if auth_token.is_empty() {
            return Err(ProviderError::MissingCredential.into());
        }
        let base_url = base_url
            .map(str::to_string)
            .or_else(|| env::var("GEMINI_BASE_URL").ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            auth_token: auth_token.to_string(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single-turn generation: one user content part, no system instruction.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model_path(model)
        );
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %model, "gemini generateContent");
        let resp = self
            .http
            .post(url)
            .query(&[("key", self.auth_token.as_str())])
            .json(&req)
            .send()
            .await
            .map_err(redact_url)?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::http(status, &body).into());
        }

        let body: GeminiResponse = resp.json().await.map_err(redact_url)?;
        let candidate = body.candidates.first().ok_or_else(|| ProviderError::EmptyResponse {
            reason: "no candidates".to_string(),
        })?;
        let text: String = candidate
            .content
            .as_ref()
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse {
                reason: candidate
                    .finish_reason
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            }
            .into());
        }
        Ok(text)
    }

    /// Fetch every model visible to this key, following pagination.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_CATALOG_PAGES {
            let mut query = vec![("key", self.auth_token.clone()), ("pageSize", "1000".to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }
            let resp = self
                .http
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(redact_url)?;
            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                return Err(ProviderError::http(status, &body).into());
            }
            let page: GeminiModelList = resp.json().await.map_err(redact_url)?;
            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: m.name,
                supported_methods: m.supported_generation_methods,
            }));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(models),
            }
        }

        if models.is_empty() {
            return Err(anyhow!("gemini model catalog pagination did not terminate"));
        }
        Ok(models)
    }
}

#[async_trait::async_trait]
impl ModelCatalog for GeminiClient {
    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        GeminiClient::list_models(self).await
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        GeminiClient::generate(self, model, prompt).await
    }
}

/// Creates `GeminiClient` sessions for the synthesizer
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for GeminiConnector {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConnector for GeminiConnector {
    fn connect(&self, api_key: &str) -> Result<Box<dyn GenerativeBackend>> {
        let client = GeminiClient::with_options(api_key, self.base_url.as_deref(), self.timeout)?;
        Ok(Box::new(client))
    }
}

/// Request URLs carry the API key as a query parameter; keep it out of messages.
fn redact_url(err: reqwest::Error) -> reqwest::Error {
    err.without_url()
}

/// Catalog names carry a "models/" prefix; the URL path adds its own.
fn model_path(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}
