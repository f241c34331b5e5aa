//! Cleanup and section splitting for the generator's answer.
//!
//! The output format is advisory: a reply that ignores the divider is
//! still accepted, with the whole text taken as the prompt.

use crate::template::DIVIDER;

/// Recommendation used when the answer has no third section
pub const NO_RECOMMENDATION: &str = "no recommendation available";

/// Placeholder tokens some generators echo back
const SENTINEL_TOKENS: [&str; 2] = ["undefined", "null"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub prompt: String,
    pub recommendation: String,
}

/// Remove every "undefined"/"null" token, then trim.
///
/// Repeats until stable so removals cannot splice a new token together
/// (e.g. "undnullefined").
pub fn clean_response(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = SENTINEL_TOKENS
            .iter()
            .fold(current.clone(), |acc, token| acc.replace(token, ""));
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}

/// Split cleaned text into (prompt, recommendation).
///
/// Segment 1 is the prompt and segment 2 the recommendation; anything
/// before the first divider is preamble and is dropped. A blank segment 2
/// is replaced with `NO_RECOMMENDATION` instead of being kept empty.
pub fn parse_sections(cleaned: &str) -> ParsedResponse {
    let parts: Vec<&str> = cleaned.split(DIVIDER).collect();

    let prompt = match parts.get(1) {
        Some(segment) => segment.trim().to_string(),
        None => cleaned.trim().to_string(),
    };
    let recommendation = parts
        .get(2)
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(NO_RECOMMENDATION)
        .to_string();

    ParsedResponse {
        prompt,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_tokens() {
        assert_eq!(clean_response("  hello null world undefined \n"), "hello  world");
        assert_eq!(clean_response("nullnullundefinednull"), "");
        let cleaned = clean_response("undnullefined and nuundefinedll");
        assert!(!cleaned.contains("null"));
        assert!(!cleaned.contains("undefined"));
    }

    #[test]
    fn test_clean_is_identity_on_clean_text() {
        let text = "שלום, this prompt is already clean";
        assert_eq!(clean_response(text), text);
        assert_eq!(clean_response(&clean_response(text)), text);
    }

    #[test]
    fn test_three_sections() {
        let parsed = parse_sections("A---DIVIDER---B---DIVIDER---C");
        assert_eq!(parsed.prompt, "B");
        assert_eq!(parsed.recommendation, "C");
    }

    #[test]
    fn test_no_divider() {
        let parsed = parse_sections("just a prompt");
        assert_eq!(parsed.prompt, "just a prompt");
        assert_eq!(parsed.recommendation, NO_RECOMMENDATION);
    }

    #[test]
    fn test_single_divider() {
        let parsed = parse_sections("intro---DIVIDER--- the prompt ");
        assert_eq!(parsed.prompt, "the prompt");
        assert_eq!(parsed.recommendation, NO_RECOMMENDATION);
    }

    #[test]
    fn test_extra_sections_ignored() {
        let parsed = parse_sections("x---DIVIDER---p---DIVIDER---Use Gemini---DIVIDER---trailing");
        assert_eq!(parsed.prompt, "p");
        assert_eq!(parsed.recommendation, "Use Gemini");
    }

    #[test]
    fn test_blank_recommendation_gets_placeholder() {
        let parsed = parse_sections("---DIVIDER---prompt---DIVIDER---   ");
        assert_eq!(parsed.prompt, "prompt");
        assert_eq!(parsed.recommendation, NO_RECOMMENDATION);
    }
}
