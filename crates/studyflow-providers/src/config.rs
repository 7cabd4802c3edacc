//! Configuration loading and generator factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use studyflow_core::estimate::DEFAULT_COMPREHENSION_FACTOR;
use studyflow_core::traits::ChatModel;

use crate::anthropic::AnthropicChat;
use crate::fallback::DeterministicFallback;
use crate::openai::OpenAiChat;
use crate::remote::RemoteModel;
use crate::resilient::ResilientGenerator;

/// Environment variable holding the API key for the default provider.
pub const API_KEY_ENV: &str = "STUDYFLOW_AI_API_KEY";
/// Environment variable selecting the default provider.
pub const PROVIDER_ENV: &str = "STUDYFLOW_AI_PROVIDER";

/// Connection settings for one remote model provider.
///
/// `Debug` masks the API key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// OpenAI or any compatible endpoint (Azure, gateways) via `base_url`.
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Anthropic {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Anthropic {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Anthropic")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// An entry with no endpoint overrides, typed by provider name.
    fn for_name(name: &str, api_key: String) -> Self {
        match name {
            "anthropic" => ProviderConfig::Anthropic {
                api_key,
                base_url: None,
            },
            _ => ProviderConfig::OpenAI {
                api_key,
                base_url: None,
                org_id: None,
            },
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::OpenAI { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                api_key
            }
        }
    }

    fn set_api_key(&mut self, key: String) {
        match self {
            ProviderConfig::OpenAI { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                *api_key = key
            }
        }
    }

    /// Model used when the configuration does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderConfig::OpenAI { .. } => "gpt-4.1-mini",
            ProviderConfig::Anthropic { .. } => "claude-sonnet-4-20250514",
        }
    }
}

/// Top-level studyflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyflowConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider the generator talks to.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model override; each provider type has its own default.
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-request timeout for remote calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Comprehension overhead applied to reading estimates.
    #[serde(default = "default_comprehension_factor")]
    pub comprehension_factor: f64,
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_temperature() -> f64 {
    0.3
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_comprehension_factor() -> f64 {
    DEFAULT_COMPREHENSION_FACTOR
}

impl Default for StudyflowConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            comprehension_factor: default_comprehension_factor(),
        }
    }
}

impl StudyflowConfig {
    /// The default provider's entry, if it has a non-empty key.
    pub fn active_provider(&self) -> Option<&ProviderConfig> {
        self.providers
            .get(&self.default_provider)
            .filter(|p| !p.api_key().trim().is_empty())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        ProviderConfig::Anthropic { api_key, base_url } => ProviderConfig::Anthropic {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
    }
}

/// Apply the provider and key overrides on top of a loaded config.
///
/// The key goes to the (possibly overridden) default provider, creating its
/// entry if the file had none.
pub fn apply_env_overrides(
    config: &mut StudyflowConfig,
    provider: Option<String>,
    api_key: Option<String>,
) {
    if let Some(provider) = provider.map(|p| p.trim().to_lowercase()).filter(|p| !p.is_empty()) {
        config.default_provider = provider;
    }

    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        let name = config.default_provider.clone();
        config
            .providers
            .entry(name.clone())
            .or_insert_with(|| ProviderConfig::for_name(&name, String::new()))
            .set_api_key(key);
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studyflow.toml` in the current directory
/// 2. `~/.config/studyflow/config.toml`
///
/// Environment overrides: `STUDYFLOW_AI_PROVIDER`, `STUDYFLOW_AI_API_KEY`.
pub fn load_config() -> Result<StudyflowConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyflowConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studyflow.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<StudyflowConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            config
        }
        None => StudyflowConfig::default(),
    };

    apply_env_overrides(
        &mut config,
        std::env::var(PROVIDER_ENV).ok(),
        std::env::var(API_KEY_ENV).ok(),
    );

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studyflow"))
}

/// Create a chat backend from its configuration.
pub fn create_chat_model(config: &ProviderConfig, timeout_secs: u64) -> Result<Box<dyn ChatModel>> {
    if config.api_key().trim().is_empty() {
        anyhow::bail!("provider has no API key");
    }
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Box::new(OpenAiChat::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
            timeout_secs,
        ))),
        ProviderConfig::Anthropic { api_key, base_url } => Ok(Box::new(AnthropicChat::new(
            api_key,
            base_url.clone(),
            timeout_secs,
        ))),
    }
}

/// Build the generator used for task creation.
///
/// Without a usable provider this is the deterministic engine alone.
pub fn build_generator(config: &StudyflowConfig) -> ResilientGenerator {
    let fallback = DeterministicFallback::new(config.comprehension_factor);

    let Some(provider) = config.active_provider() else {
        warn!(
            provider = %config.default_provider,
            "no AI API key configured, using the deterministic engine"
        );
        return ResilientGenerator::fallback_only(fallback);
    };

    let chat = match create_chat_model(provider, config.timeout_secs) {
        Ok(chat) => chat,
        Err(e) => {
            warn!(error = %e, "could not create chat model, using the deterministic engine");
            return ResilientGenerator::fallback_only(fallback);
        }
    };

    let model = config
        .default_model
        .as_deref()
        .unwrap_or_else(|| provider.default_model());
    info!(provider = %config.default_provider, model, "remote generator enabled");

    let remote = RemoteModel::new(chat, model, config.temperature, config.max_tokens);
    ResilientGenerator::new(Box::new(remote), fallback)
        .with_timeout(Duration::from_secs(config.timeout_secs))
}
