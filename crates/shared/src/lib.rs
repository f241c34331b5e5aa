pub mod history;

pub mod settings {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    fn default_timeout_secs() -> u64 {
        60
    }

    fn default_sidebar_preview() -> usize {
        3
    }

    fn default_domain() -> String {
        "general".into()
    }

    fn default_tone() -> String {
        "רשמי".into()
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ProviderAuth {
        pub api_key: Option<String>,
    }

    /// Tier markers and hardcoded fallbacks used when picking a backend model
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ResolverSettings {
        /// Capability a catalog entry must advertise to be considered
        pub capability: String,
        pub fast_marker: String,        // e.g., "flash"
        pub pro_marker: String,         // e.g., "pro"
        pub experimental_marker: String, // excluded from the pro tier
        pub legacy_marker: String,      // e.g., "1.0"
        pub fallback_model: String,     // used when discovery fails
        pub legacy_model: String,       // used when fallback_model is blank
    }

    impl Default for ResolverSettings {
        fn default() -> Self {
            Self {
                capability: "generateContent".into(),
                fast_marker: "flash".into(),
                pro_marker: "pro".into(),
                experimental_marker: "exp".into(),
                legacy_marker: "1.0".into(),
                fallback_model: "gemini-1.5-flash".into(),
                legacy_model: "gemini-pro".into(),
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        #[serde(default)]
        pub gemini_auth: ProviderAuth,
        #[serde(default)]
        pub resolver: ResolverSettings,
        /// Override for the Gemini endpoint (testing, proxies)
        #[serde(default)]
        pub api_base_url: Option<String>,
        #[serde(default = "default_timeout_secs")]
        pub request_timeout_secs: u64,
        #[serde(default = "default_domain")]
        pub default_domain: String,
        #[serde(default = "default_tone")]
        pub default_tone: String,
        /// Cap on in-memory history entries; unbounded when unset
        #[serde(default)]
        pub history_limit: Option<usize>,
        /// How many entries the compact history view shows
        #[serde(default = "default_sidebar_preview")]
        pub sidebar_preview: usize,
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                gemini_auth: ProviderAuth::default(),
                resolver: ResolverSettings::default(),
                api_base_url: None,
                request_timeout_secs: default_timeout_secs(),
                default_domain: default_domain(),
                default_tone: default_tone(),
                history_limit: None,
                sidebar_preview: default_sidebar_preview(),
            }
        }
    }

    impl AppSettings {
        /// Per-request HTTP timeout; 0 means the default rather than "expire at once"
        pub fn request_timeout(&self) -> Duration {
            match self.request_timeout_secs {
                0 => Duration::from_secs(default_timeout_secs()),
                secs => Duration::from_secs(secs),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::settings::*;

    #[test]
    fn test_settings_defaults_from_empty_json() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert!(settings.gemini_auth.api_key.is_none());
        assert_eq!(settings.resolver, ResolverSettings::default());
        assert_eq!(settings.request_timeout_secs, 60);
        assert_eq!(settings.sidebar_preview, 3);
        assert_eq!(settings.default_domain, "general");
    }

    #[test]
    fn test_partial_resolver_override() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"resolver": {"fast_marker": "lite"}}"#).unwrap();
        assert_eq!(settings.resolver.fast_marker, "lite");
        assert_eq!(settings.resolver.pro_marker, "pro");
        assert_eq!(settings.resolver.fallback_model, "gemini-1.5-flash");
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"request_timeout_secs": 0}"#).unwrap();
        assert_eq!(settings.request_timeout(), std::time::Duration::from_secs(60));

        let settings: AppSettings =
            serde_json::from_str(r#"{"request_timeout_secs": 5}"#).unwrap();
        assert_eq!(settings.request_timeout(), std::time::Duration::from_secs(5));
    }
}
