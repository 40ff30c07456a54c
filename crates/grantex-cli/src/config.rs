//! Configuration management for the CLI.
//!
//! Settings load from `~/.grantex/config.toml` when present, then
//! environment variables override individual values. The resolved
//! settings become explicit configuration structs passed into the
//! backend constructors; nothing downstream reads the environment.

use crate::error::{CliError, Result};
use grantex_llm::{LlmConfig, OllamaEmbedder};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat backend settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Embedding backend settings
    #[serde(default)]
    pub embedding: EmbeddingSettings,
}

/// Chat completion backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Chat completion model name
    #[serde(default)]
    pub model: String,

    /// API key; may be empty for local gateways
    #[serde(default)]
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Embedding backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Ollama endpoint
    #[serde(default = "default_embed_endpoint")]
    pub endpoint: String,

    /// Embedding model identifier
    #[serde(default = "default_embed_model")]
    pub model: String,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".grantex").join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(model) = env::var("MODEL") {
            self.llm.model = model;
        }
        if let Ok(key) = env::var("OPENAI_KEY") {
            self.llm.api_key = key;
        }
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Ok(endpoint) = env::var("EMBEDDING_ENDPOINT") {
            self.embedding.endpoint = endpoint;
        }
        if let Ok(model) = env::var("EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
    }

    /// Resolve the chat backend configuration.
    ///
    /// Fails when no model has been configured at all.
    pub fn llm_config(&self) -> Result<LlmConfig> {
        if self.llm.model.is_empty() {
            return Err(CliError::Config(
                "No chat model configured: set MODEL, pass --model, or set llm.model in the config file"
                    .into(),
            ));
        }

        Ok(LlmConfig::new(
            self.llm.model.clone(),
            self.llm.api_key.clone(),
            self.llm.base_url.clone(),
        ))
    }

    /// Build the embedding backend from the settings.
    pub fn embedder(&self) -> OllamaEmbedder {
        OllamaEmbedder::new(self.embedding.endpoint.clone(), self.embedding.model.clone())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            endpoint: default_embed_endpoint(),
            model: default_embed_model(),
        }
    }
}

fn default_base_url() -> String {
    grantex_llm::openai::DEFAULT_BASE_URL.to_string()
}

fn default_embed_endpoint() -> String {
    grantex_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_embed_model() -> String {
    grantex_llm::ollama::DEFAULT_EMBED_MODEL.to_string()
}
