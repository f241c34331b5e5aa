//! Instruction document sent to the generator.

use crate::personas::DomainPersona;

/// Literal token separating the sections of the generator's answer
pub const DIVIDER: &str = "---DIVIDER---";

/// Stand-in for divider tokens found inside user text
const NEUTRALIZED_DIVIDER: &str = "- - -DIVIDER- - -";

/// Compose the single instruction for one generation call.
pub fn build_instruction(raw_input: &str, persona: &DomainPersona, tone: &str) -> String {
    format!(
        r#"Act as a world-class Meta-Prompting System (CO-STAR framework).
INPUT: Request="{request}", Persona="{persona}", Tone="{tone}".
TASK:
1. Write an expert prompt in Hebrew.
2. Recommend best AI model (Claude/GPT/Gemini).
Use the divider line exactly twice, only where the output format shows it.
OUTPUT FORMAT:
{divider}
[Hebrew Prompt]
{divider}
[Recommendation]"#,
        request = neutralize_divider(raw_input),
        persona = persona.description(),
        tone = tone,
        divider = DIVIDER,
    )
}

/// Keep user text from introducing extra sections into the answer.
pub fn neutralize_divider(text: &str) -> String {
    text.replace(DIVIDER, NEUTRALIZED_DIVIDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personas::persona_for;

    #[test]
    fn test_instruction_embeds_inputs() {
        let doc = build_instruction("write a LinkedIn post about AI", persona_for("marketing"), "רשמי");
        assert!(doc.contains(r#"Request="write a LinkedIn post about AI""#));
        assert!(doc.contains(r#"Persona="Expert Copywriter. Focus: Psychology, Virality.""#));
        assert!(doc.contains(r#"Tone="רשמי""#));
        assert!(doc.contains("Hebrew"));
        assert!(doc.contains("Claude/GPT/Gemini"));
        assert_eq!(doc.matches(DIVIDER).count(), 2);
    }

    #[test]
    fn test_divider_in_request_is_neutralized() {
        let doc = build_instruction("a ---DIVIDER--- b", persona_for("general"), "formal");
        assert_eq!(doc.matches(DIVIDER).count(), 2);
        assert!(doc.contains("a - - -DIVIDER- - - b"));
    }
}
