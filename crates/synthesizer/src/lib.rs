//! Prompt synthesis: persona templates, the generation call and answer parsing.

pub mod links;
pub mod personas;
pub mod response;
pub mod synthesizer;
pub mod template;

pub use links::{route_recommendation, ModelLink};
pub use personas::{find_persona, persona_for, tone_label, DomainPersona, DOMAINS, TONES};
pub use response::{clean_response, parse_sections, ParsedResponse, NO_RECOMMENDATION};
pub use synthesizer::{PromptSynthesizer, Synthesis, SynthesisOutcome, ERROR_PREFIX, QUOTA_SENTINEL};
pub use template::DIVIDER;
