//! Persisted application settings and API key lookup.
//!
//! Settings live in the platform config dir as `settings.json`. A missing
//! or unreadable file yields defaults; only writes report errors.

use anyhow::{Context, Result};
use shared::settings::AppSettings;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Where an API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Settings,
    Environment,
    /// Typed in by the user for this session
    Prompt,
}

/// A Gemini key held in memory that is wiped on drop
pub struct ApiKey {
    value: Zeroizing<String>,
    pub source: CredentialSource,
}

impl ApiKey {
    pub fn new(value: &str, source: CredentialSource) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            value: Zeroizing::new(trimmed.to_string()),
            source,
        })
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com.local", "Prompt Pro", "PromptPro")
        .map(|proj| proj.config_dir().join("settings.json"))
}

/// Load settings, returning `(settings, is_fresh_install)`.
pub fn load_settings_or_default() -> (AppSettings, bool) {
    if let Some(path) = config_path() {
        if path.exists() {
            match load_settings_from(&path) {
                Ok(settings) => return (settings, false),
                Err(e) => tracing::warn!("ignoring unreadable settings: {:#}", e),
            }
        }
    }
    (AppSettings::default(), true)
}

pub fn load_settings_from(path: &Path) -> Result<AppSettings> {
    let bytes =
        fs::read(path).with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = serde_json::from_slice::<AppSettings>(&bytes)
        .with_context(|| format!("parsing settings in {}", path.display()))?;
    Ok(settings)
}

/// Persist settings to the config dir, returning the file written.
pub fn save_settings(settings: &AppSettings) -> Result<PathBuf> {
    let path = config_path().context("no config directory available on this platform")?;
    save_settings_to(&path, settings)?;
    Ok(path)
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_vec_pretty(settings)?;
    // Write to a sibling file first so a crash never leaves half a file behind
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Stored key first, then `GEMINI_API_KEY`. `None` means the user must be asked.
pub fn lookup_api_key(settings: &AppSettings) -> Option<ApiKey> {
    lookup_api_key_with(settings, env::var(API_KEY_ENV).ok())
}

pub fn lookup_api_key_with(settings: &AppSettings, env_value: Option<String>) -> Option<ApiKey> {
    settings
        .gemini_auth
        .api_key
        .as_deref()
        .and_then(|key| ApiKey::new(key, CredentialSource::Settings))
        .or_else(|| {
            env_value
                .as_deref()
                .and_then(|key| ApiKey::new(key, CredentialSource::Environment))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.gemini_auth.api_key = Some("stored-key".into());
        settings.history_limit = Some(20);
        save_settings_to(&path, &settings).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.gemini_auth.api_key.as_deref(), Some("stored-key"));
        assert_eq!(loaded.history_limit, Some(20));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{ not json").unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing settings"));
    }

    #[test]
    fn test_settings_key_wins() {
        let mut settings = AppSettings::default();
        settings.gemini_auth.api_key = Some("  from-settings ".into());
        let key = lookup_api_key_with(&settings, Some("from-env".into())).unwrap();
        assert_eq!(key.expose(), "from-settings");
        assert_eq!(key.source, CredentialSource::Settings);
    }

    #[test]
    fn test_env_fallback_and_absent() {
        let mut settings = AppSettings::default();
        settings.gemini_auth.api_key = Some("   ".into());
        let key = lookup_api_key_with(&settings, Some("from-env".into())).unwrap();
        assert_eq!(key.source, CredentialSource::Environment);

        assert!(lookup_api_key_with(&settings, None).is_none());
        assert!(lookup_api_key_with(&settings, Some(String::new())).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = ApiKey::new("secret-value", CredentialSource::Prompt).unwrap();
        assert!(!format!("{:?}", key).contains("secret-value"));
    }
}
