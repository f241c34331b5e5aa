//! Domain personas and tones offered to the prompt generator.
//!
//! Each domain maps to an expert role plus the aspect it should focus on.
//! Lookups accept either the stable ASCII key or the Hebrew display label.

/// Expert role adopted by the generator for one domain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainPersona {
    pub key: &'static str,
    pub label: &'static str,
    pub role: &'static str,
    pub focus: &'static str,
}

impl DomainPersona {
    /// Persona description embedded in the instruction ("Storyteller. Focus: Narrative depth.")
    pub fn description(&self) -> String {
        format!("{}. Focus: {}.", self.role, self.focus)
    }
}

/// One entry of the ordered tone scale
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tone {
    pub key: &'static str,
    pub label: &'static str,
}

pub static DOMAINS: [DomainPersona; 5] = [
    DomainPersona {
        key: "marketing",
        label: "שיווק וקופירייטינג",
        role: "Expert Copywriter",
        focus: "Psychology, Virality",
    },
    DomainPersona {
        key: "software",
        label: "כתיבת קוד ופיתוח",
        role: "Software Architect",
        focus: "Clean Code, Security",
    },
    DomainPersona {
        key: "creative",
        label: "כתיבה יוצרת",
        role: "Storyteller",
        focus: "Narrative depth",
    },
    DomainPersona {
        key: "strategy",
        label: "אסטרטגיה עסקית",
        role: "Consultant",
        focus: "Growth, ROI",
    },
    GENERAL,
];

const GENERAL: DomainPersona = DomainPersona {
    key: "general",
    label: "כללי/אחר",
    role: "Prompt Engineer",
    focus: "Clarity",
};

/// Tones in display order; the first is the default
pub static TONES: [Tone; 4] = [
    Tone {
        key: "formal",
        label: "רשמי",
    },
    Tone {
        key: "direct",
        label: "ישיר",
    },
    Tone {
        key: "creative",
        label: "יצירתי",
    },
    Tone {
        key: "marketing",
        label: "שיווקי",
    },
];

/// Look up a persona by key or label; unknown domains get the general persona
pub fn persona_for(context_key: &str) -> &'static DomainPersona {
    find_persona(context_key).unwrap_or(&DOMAINS[DOMAINS.len() - 1])
}

/// Strict lookup, for front ends that want to reject unknown domains
pub fn find_persona(context_key: &str) -> Option<&'static DomainPersona> {
    let wanted = context_key.trim();
    DOMAINS
        .iter()
        .find(|d| d.label == wanted || d.key.eq_ignore_ascii_case(wanted))
}

/// Map a tone key ("formal") to its label; anything else passes through untouched
pub fn tone_label(tone: &str) -> String {
    TONES
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(tone.trim()))
        .map(|t| t.label.to_string())
        .unwrap_or_else(|| tone.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_lookup() {
        assert_eq!(persona_for("software").role, "Software Architect");
        assert_eq!(persona_for("Marketing").role, "Expert Copywriter");
        assert_eq!(persona_for("כתיבה יוצרת").key, "creative");
        assert_eq!(persona_for("אסטרטגיה עסקית").focus, "Growth, ROI");
    }

    #[test]
    fn test_unknown_domain_is_general() {
        assert_eq!(persona_for("astrology").key, "general");
        assert_eq!(persona_for("").key, "general");
        assert!(find_persona("astrology").is_none());
    }

    #[test]
    fn test_description() {
        assert_eq!(
            persona_for("general").description(),
            "Prompt Engineer. Focus: Clarity."
        );
    }

    #[test]
    fn test_tone_label() {
        assert_eq!(tone_label("formal"), "רשמי");
        assert_eq!(tone_label("Direct"), "ישיר");
        assert_eq!(tone_label("playful"), "playful");
        assert_eq!(tone_label("שיווקי"), "שיווקי");
        assert_eq!(TONES[0].key, "formal");
    }
}
