use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::deck::{DEFAULT_FONT_SIZE_PT, MAX_FONT_SIZE_PT};
use crate::paths;
use crate::translation::{DEFAULT_LANGUAGE_CODE, validate_language};
use crate::ui::Style;

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_TRANSLATION_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_CHAT_MODEL: &str = "o1-mini";

/// Default settings in the `[slidetl]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlidetlConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Model used for slide translation.
    pub model: Option<String>,
    /// Model used in chat mode.
    pub chat_model: Option<String>,
    /// Default target language (ISO 639-1 code).
    pub to: Option<String>,
    /// Font size (points) applied to translated text.
    pub font_size: Option<u32>,
}

/// Configuration for an OpenAI-compatible provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Models known to be available for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The built-in OpenAI provider, used when `openai` is not configured.
    pub fn openai() -> Self {
        Self {
            endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(DEFAULT_OPENAI_KEY_ENV.to_string()),
            models: Vec::new(),
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/slidetl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub slidetl: SlidetlConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl ConfigFile {
    /// Looks up a provider, falling back to the built-in `openai` entry.
    pub fn provider(&self, name: &str) -> Option<ProviderConfig> {
        self.providers
            .get(name)
            .cloned()
            .or_else(|| (name == DEFAULT_PROVIDER).then(ProviderConfig::openai))
    }
}

/// Which command the configuration is resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Purpose {
    #[default]
    Translate,
    Chat,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Target language code, e.g. `en`.
    pub target_code: String,
    /// Target language name used in prompts, e.g. `English`.
    pub target_language: String,
    pub font_size: u32,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub purpose: Purpose,
    pub to: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub font_size: Option<u32>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults. `stored_key` (the first key of the key
/// store) is used when the provider itself yields no API key.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    stored_key: Option<&str>,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.slidetl.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let provider_config = config_file.provider(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/slidetl/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/slidetl/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let model = match options.purpose {
        Purpose::Translate => options
            .model
            .clone()
            .or_else(|| config_file.slidetl.model.clone())
            .unwrap_or_else(|| DEFAULT_TRANSLATION_MODEL.to_string()),
        Purpose::Chat => options
            .model
            .clone()
            .or_else(|| config_file.slidetl.chat_model.clone())
            .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
    };

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let target_code = options
        .to
        .as_ref()
        .or(config_file.slidetl.to.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string());
    let target_language = validate_language(&target_code)?.to_string();

    let api_key = provider_config
        .get_api_key()
        .or_else(|| stored_key.map(str::to_string));

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or store one with: slidetl keys add <KEY>"
        );
    }

    let font_size = options
        .font_size
        .or(config_file.slidetl.font_size)
        .unwrap_or(DEFAULT_FONT_SIZE_PT);
    if !(1..=MAX_FONT_SIZE_PT).contains(&font_size) {
        bail!("Font size must be between 1 and {MAX_FONT_SIZE_PT} points, got {font_size}");
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint,
        model,
        api_key,
        target_code,
        target_language,
        font_size,
    })
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Configuration lives at `$XDG_CONFIG_HOME/slidetl/config.toml`
    /// or `~/.config/slidetl/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file; a missing file means defaults.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager {
            config_path: temp_dir.path().join("config.toml"),
        }
    }

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(
            manager.config_path(),
            r#"
[slidetl]
provider = "local"
model = "gemma3:12b"
to = "ja"
font_size = 12

[providers.local]
endpoint = "http://localhost:11434"
models = ["gemma3:12b"]
"#,
        )
        .unwrap();

        let loaded = manager.load().unwrap();

        assert_eq!(loaded.slidetl.provider.as_deref(), Some("local"));
        assert_eq!(loaded.slidetl.model.as_deref(), Some("gemma3:12b"));
        assert_eq!(loaded.slidetl.to.as_deref(), Some("ja"));
        assert_eq!(loaded.slidetl.font_size, Some(12));
        assert_eq!(
            loaded.providers["local"].endpoint,
            "http://localhost:11434"
        );
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        let config = manager.load_or_default().unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[slidetl\nprovider =").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: test-specific variable name
        unsafe {
            std::env::set_var("SLIDETL_TEST_API_KEY", "test-key-value");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("SLIDETL_TEST_API_KEY".to_string()),
            models: vec![],
        };
        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: test-specific variable name
        unsafe {
            std::env::remove_var("SLIDETL_TEST_API_KEY");
        }
    }

    #[test]
    fn test_provider_get_api_key_fallback() {
        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("SLIDETL_TEST_NONEXISTENT_KEY".to_string()),
            models: vec![],
        };
        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_builtin_openai_provider() {
        let config = ConfigFile::default();
        let openai = config.provider("openai").unwrap();
        assert_eq!(openai.endpoint, DEFAULT_OPENAI_ENDPOINT);
        assert!(openai.requires_api_key());
        assert!(config.provider("other").is_none());
    }

    fn local_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "local".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec!["gemma3:12b".to_string()],
            },
        );
        providers.insert(
            "keyed".to_string(),
            ProviderConfig {
                endpoint: "https://keyed.example.com".to_string(),
                api_key: None,
                api_key_env: Some("SLIDETL_TEST_NONEXISTENT_API_KEY".to_string()),
                models: vec![],
            },
        );

        ConfigFile {
            slidetl: SlidetlConfig {
                provider: Some("local".to_string()),
                model: Some("gemma3:12b".to_string()),
                ..SlidetlConfig::default()
            },
            providers,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved =
            resolve_config(&ResolveOptions::default(), &local_config(), None).unwrap();

        assert_eq!(resolved.provider_name, "local");
        assert_eq!(resolved.endpoint, "http://localhost:11434");
        assert_eq!(resolved.model, "gemma3:12b");
        assert_eq!(resolved.target_code, "en");
        assert_eq!(resolved.target_language, "English");
        assert_eq!(resolved.font_size, DEFAULT_FONT_SIZE_PT);
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_resolve_chat_model_defaults() {
        let options = ResolveOptions {
            purpose: Purpose::Chat,
            ..ResolveOptions::default()
        };
        let resolved = resolve_config(&options, &local_config(), None).unwrap();
        assert_eq!(resolved.model, DEFAULT_CHAT_MODEL);
    }

    #[test]
    fn test_resolve_invalid_language() {
        let options = ResolveOptions {
            to: Some("klingon".to_string()),
            ..ResolveOptions::default()
        };
        let err = resolve_config(&options, &local_config(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid language code"));
    }

    #[test]
    fn test_resolve_provider_not_found() {
        let options = ResolveOptions {
            provider: Some("nonexistent".to_string()),
            ..ResolveOptions::default()
        };
        let err = resolve_config(&options, &local_config(), None).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("keyed"));
    }

    #[test]
    fn test_resolve_api_key_required_but_missing() {
        let options = ResolveOptions {
            provider: Some("keyed".to_string()),
            ..ResolveOptions::default()
        };
        let err = resolve_config(&options, &local_config(), None).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_resolve_falls_back_to_stored_key() {
        let options = ResolveOptions {
            provider: Some("keyed".to_string()),
            ..ResolveOptions::default()
        };
        let resolved = resolve_config(&options, &local_config(), Some("sk-stored")).unwrap();
        assert_eq!(resolved.api_key.as_deref(), Some("sk-stored"));
    }

    #[test]
    fn test_resolve_rejects_zero_font_size() {
        let options = ResolveOptions {
            font_size: Some(0),
            ..ResolveOptions::default()
        };
        assert!(resolve_config(&options, &local_config(), None).is_err());
    }

    #[test]
    fn test_resolve_rejects_font_size_above_maximum() {
        for font_size in [MAX_FONT_SIZE_PT + 1, 50_000_000] {
            let options = ResolveOptions {
                font_size: Some(font_size),
                ..ResolveOptions::default()
            };
            let err = resolve_config(&options, &local_config(), None).unwrap_err();
            assert!(err.to_string().contains("between 1 and 4000"));
        }

        let options = ResolveOptions {
            font_size: Some(MAX_FONT_SIZE_PT),
            ..ResolveOptions::default()
        };
        let resolved = resolve_config(&options, &local_config(), None).unwrap();
        assert_eq!(resolved.font_size, MAX_FONT_SIZE_PT);
    }

    #[test]
    fn test_resolve_rejects_config_file_font_size_above_maximum() {
        let mut config = local_config();
        config.slidetl.font_size = Some(9000);
        assert!(resolve_config(&ResolveOptions::default(), &config, None).is_err());
    }
}
