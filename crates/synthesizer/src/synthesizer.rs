//! Turns a free-text request into an expert prompt plus a model recommendation.
//!
//! One call to `PromptSynthesizer::generate` configures a backend session,
//! resolves a model, issues exactly one generation call and parses the
//! answer. Failures never escape: they come back as `SynthesisOutcome`
//! variants the caller branches on.

use anyhow::Result;
use providers::{resolve_model, BackendConnector, ProviderError, TextGenerator};
use shared::history::HistoryEntry;
use shared::settings::ResolverSettings;

use crate::personas::persona_for;
use crate::response::{clean_response, parse_sections};
use crate::template::build_instruction;

/// Text returned in place of a prompt when the backend is rate limiting
pub const QUOTA_SENTINEL: &str = "QUOTA_ERROR";
/// Prefix of the text returned for every other failure
pub const ERROR_PREFIX: &str = "Error: ";

/// A successful generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// Cleaned generator output, before section splitting
    pub text: String,
    pub prompt: String,
    pub recommendation: String,
    /// Model identifier the resolver picked for this call
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Success(Synthesis),
    /// Backend answered with HTTP 429 (or an error mentioning 429)
    QuotaExceeded,
    /// Any other failure, rendered as text
    Failed(String),
}

impl SynthesisOutcome {
    /// Caller-facing text: the cleaned output, the quota sentinel, or "Error: ..."
    pub fn text(&self) -> String {
        match self {
            SynthesisOutcome::Success(s) => s.text.clone(),
            SynthesisOutcome::QuotaExceeded => QUOTA_SENTINEL.to_string(),
            SynthesisOutcome::Failed(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }

    /// Model that served the request; empty on every failure path
    pub fn model(&self) -> &str {
        match self {
            SynthesisOutcome::Success(s) => &s.model,
            _ => "",
        }
    }

    /// The (text, model identifier) pair
    pub fn into_pair(self) -> (String, String) {
        let text = self.text();
        match self {
            SynthesisOutcome::Success(s) => (text, s.model),
            _ => (text, String::new()),
        }
    }

    /// History record for a successful generation
    pub fn history_entry(&self, original_request: &str) -> Option<HistoryEntry> {
        match self {
            SynthesisOutcome::Success(s) => Some(HistoryEntry::new(
                original_request,
                s.prompt.clone(),
                s.recommendation.clone(),
                s.model.clone(),
            )),
            _ => None,
        }
    }
}

pub struct PromptSynthesizer {
    connector: Box<dyn BackendConnector>,
    resolver: ResolverSettings,
}

impl PromptSynthesizer {
    pub fn new(connector: Box<dyn BackendConnector>, resolver: ResolverSettings) -> Self {
        Self {
            connector,
            resolver,
        }
    }

    /// Generate an expert prompt for `raw_input`.
    ///
    /// `context_key` selects the persona (unknown keys use the general one);
    /// `tone` is embedded verbatim.
    pub async fn generate(
        &self,
        api_key: &str,
        raw_input: &str,
        context_key: &str,
        tone: &str,
    ) -> SynthesisOutcome {
        match self.try_generate(api_key, raw_input, context_key, tone).await {
            Ok(synthesis) => {
                tracing::info!(
                    model = %synthesis.model,
                    prompt_chars = synthesis.prompt.chars().count(),
                    "prompt synthesized"
                );
                SynthesisOutcome::Success(synthesis)
            }
            Err(e) => {
                let outcome = classify_failure(&e);
                let rate_limited = outcome == SynthesisOutcome::QuotaExceeded;
                tracing::warn!(rate_limited, "generation failed: {:#}", e);
                outcome
            }
        }
    }

    async fn try_generate(
        &self,
        api_key: &str,
        raw_input: &str,
        context_key: &str,
        tone: &str,
    ) -> Result<Synthesis> {
        let backend = self.connector.connect(api_key.trim())?;
        let model = resolve_model(backend.as_ref(), &self.resolver).await;

        let persona = persona_for(context_key);
        tracing::debug!(domain = persona.key, tone = %tone, "building instruction");
        let instruction = build_instruction(raw_input, persona, tone);

        let raw = backend.generate_text(&model, &instruction).await?;
        let text = clean_response(&raw);
        let parsed = parse_sections(&text);

        Ok(Synthesis {
            text,
            prompt: parsed.prompt,
            recommendation: parsed.recommendation,
            model,
        })
    }
}

/// Rate limits are recognised by HTTP status first, then by "429" in the message.
fn classify_failure(err: &anyhow::Error) -> SynthesisOutcome {
    // `ProviderError::Http` prints its status, so for Gemini the message check
    // alone would match. The status check covers backends whose error text
    // leaves the code out.
    let structured = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ProviderError>())
        .any(ProviderError::is_rate_limited);
    let message = format!("{:#}", err);

    if structured || message.contains("429") {
        SynthesisOutcome::QuotaExceeded
    } else {
        SynthesisOutcome::Failed(message)
    }
}
