//! Picks the backend model for one generation call.
//!
//! Availability differs per key and region, so the live catalog is
//! consulted first and tiers are tried in order of preference. Discovery
//! failures are never surfaced: the resolver degrades to hardcoded
//! identifiers and always returns something to call.

use crate::catalog::{ModelCatalog, ModelInfo};
use shared::settings::ResolverSettings;

/// Last-resort identifier when every configured fallback is blank
pub const LEGACY_MODEL: &str = "gemini-pro";

/// Resolve a model identifier, consulting the catalog when it answers.
pub async fn resolve_model<C>(catalog: &C, settings: &ResolverSettings) -> String
where
    C: ModelCatalog + ?Sized,
{
    match catalog.list_models().await {
        Ok(models) => match pick_model(&models, settings) {
            Some(model) => {
                tracing::info!(model = %model, candidates = models.len(), "resolved model from catalog");
                model
            }
            None => {
                tracing::warn!(
                    listed = models.len(),
                    capability = %settings.capability,
                    "catalog has no usable model, using fallback"
                );
                fallback_model(settings)
            }
        },
        Err(e) => {
            tracing::warn!("model discovery failed, using fallback: {}", e);
            fallback_model(settings)
        }
    }
}

/// Choose from a catalog listing; `None` when nothing supports generation.
pub fn pick_model(models: &[ModelInfo], settings: &ResolverSettings) -> Option<String> {
    let usable: Vec<&str> = models
        .iter()
        .filter(|m| !m.name.trim().is_empty() && m.supports(&settings.capability))
        .map(|m| m.name.as_str())
        .collect();

    let first = *usable.first()?;

    let contains = |name: &str, marker: &str| !marker.is_empty() && name.contains(marker);
    let is_fast = |name: &str| contains(name, &settings.fast_marker);
    let is_pro = |name: &str| {
        contains(name, &settings.pro_marker) && !contains(name, &settings.experimental_marker)
    };
    let is_legacy = |name: &str| contains(name, &settings.legacy_marker);

    // Try tiers in order of preference, falling back to catalog order
    let picked = usable
        .iter()
        .find(|name| is_fast(name))
        .or_else(|| usable.iter().find(|name| is_pro(name)))
        .or_else(|| usable.iter().find(|name| is_legacy(name)))
        .copied()
        .unwrap_or(first);

    Some(picked.to_string())
}

/// Hardcoded identifier used when discovery cannot help. Never empty.
pub fn fallback_model(settings: &ResolverSettings) -> String {
    [settings.fallback_model.as_str(), settings.legacy_model.as_str()]
        .iter()
        .map(|m| m.trim())
        .find(|m| !m.is_empty())
        .unwrap_or(LEGACY_MODEL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    const GEN: &[&str] = &["generateContent"];

    enum FakeCatalog {
        Listing(Vec<ModelInfo>),
        Failing(&'static str),
    }

    #[async_trait::async_trait]
    impl ModelCatalog for FakeCatalog {
        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            match self {
                FakeCatalog::Listing(models) => Ok(models.clone()),
                FakeCatalog::Failing(msg) => Err(anyhow!(*msg)),
            }
        }
    }

    fn names(list: &[&str]) -> Vec<ModelInfo> {
        list.iter().map(|n| ModelInfo::new(*n, GEN)).collect()
    }

    #[test]
    fn test_fast_tier_preferred() {
        let models = names(&["models/gemini-1.5-pro", "models/gemini-1.5-flash"]);
        let picked = pick_model(&models, &ResolverSettings::default());
        assert_eq!(picked.as_deref(), Some("models/gemini-1.5-flash"));
    }

    #[test]
    fn test_pro_tier_skips_experimental() {
        let models = names(&["models/gemini-pro-exp-0801", "models/gemini-1.5-pro"]);
        let picked = pick_model(&models, &ResolverSettings::default());
        assert_eq!(picked.as_deref(), Some("models/gemini-1.5-pro"));
    }

    #[test]
    fn test_legacy_tier() {
        let models = names(&["models/text-bison", "models/gemini-1.0-ultra", "models/pro-exp"]);
        let picked = pick_model(&models, &ResolverSettings::default());
        assert_eq!(picked.as_deref(), Some("models/gemini-1.0-ultra"));
    }

    #[test]
    fn test_unrelated_returns_first() {
        let models = names(&["models/alpha", "models/beta"]);
        let picked = pick_model(&models, &ResolverSettings::default());
        assert_eq!(picked.as_deref(), Some("models/alpha"));
    }

    #[test]
    fn test_capability_filter() {
        let models = vec![
            ModelInfo::new("models/embedding-flash", &["embedContent"]),
            ModelInfo::new("models/gemini-1.5-pro", GEN),
        ];
        let picked = pick_model(&models, &ResolverSettings::default());
        assert_eq!(picked.as_deref(), Some("models/gemini-1.5-pro"));

        let none = vec![ModelInfo::new("models/embedding-001", &["embedContent"])];
        assert_eq!(pick_model(&none, &ResolverSettings::default()), None);
    }

    #[test]
    fn test_fallback_never_empty() {
        let mut settings = ResolverSettings::default();
        assert_eq!(fallback_model(&settings), "gemini-1.5-flash");

        settings.fallback_model = "  ".into();
        assert_eq!(fallback_model(&settings), "gemini-pro");

        settings.legacy_model = String::new();
        assert_eq!(fallback_model(&settings), LEGACY_MODEL);
    }

    #[tokio::test]
    async fn test_resolver_never_fails() {
        let settings = ResolverSettings::default();
        let catalogs = vec![
            FakeCatalog::Failing("401 API key not valid"),
            FakeCatalog::Listing(vec![]),
            FakeCatalog::Listing(vec![ModelInfo::new("models/aqa", &["generateAnswer"])]),
        ];
        for catalog in catalogs {
            let model = resolve_model(&catalog, &settings).await;
            assert_eq!(model, "gemini-1.5-flash");
        }
    }

    #[tokio::test]
    async fn test_resolver_uses_catalog() {
        let catalog = FakeCatalog::Listing(names(&["model-x-pro", "model-x-flash"]));
        let model = resolve_model(&catalog, &ResolverSettings::default()).await;
        assert_eq!(model, "model-x-flash");
    }
}
