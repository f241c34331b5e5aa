//! Maps a model recommendation to the chat tool that should open it.

/// Model families and their public chat URLs
pub const MODEL_LINKS: [(&str, &str); 3] = [
    ("Claude", "https://claude.ai"),
    ("GPT", "https://chat.openai.com"),
    ("Gemini", "https://gemini.google.com"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelLink {
    pub url: &'static str,
    pub label: &'static str,
}

/// URL for a model family name ("Claude", "GPT", "Gemini")
pub fn link_for_family(family: &str) -> Option<&'static str> {
    MODEL_LINKS
        .iter()
        .find(|(name, _)| *name == family)
        .map(|(_, url)| *url)
}

/// Claude is checked before Gemini; anything else opens ChatGPT.
pub fn route_recommendation(recommendation: &str) -> ModelLink {
    let routes = [("Claude", "Claude AI"), ("Gemini", "Gemini")];
    for (family, label) in routes {
        if recommendation.contains(family) {
            if let Some(url) = link_for_family(family) {
                return ModelLink { url, label };
            }
        }
    }
    ModelLink {
        url: "https://chat.openai.com",
        label: "ChatGPT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_wins() {
        let link = route_recommendation("Gemini is fine but Claude is best");
        assert_eq!(link.url, "https://claude.ai");
        assert_eq!(link.label, "Claude AI");
    }

    #[test]
    fn test_gemini_only() {
        let link = route_recommendation("מומלץ: Gemini");
        assert_eq!(link.url, "https://gemini.google.com");
        assert_eq!(link.label, "Gemini");
    }

    #[test]
    fn test_default_chatgpt() {
        assert_eq!(route_recommendation("GPT-4o").label, "ChatGPT");
        // Matching is case-sensitive
        let link = route_recommendation("claude");
        assert_eq!(link.url, "https://chat.openai.com");
    }

    #[test]
    fn test_link_for_family() {
        assert_eq!(link_for_family("GPT"), Some("https://chat.openai.com"));
        assert_eq!(link_for_family("Llama"), None);
    }
}
