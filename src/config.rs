use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MindfulConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub history: HistoryConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    /// Missing key is reported per request, not at startup.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: String,
    pub capacity: usize,
    pub tool_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub enhance_recommendations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            log_level: "info".into(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            timeout_ms: 30_000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let path = default_mindful_dir()
            .join("history.json")
            .to_string_lossy()
            .into_owned();
        Self {
            path,
            capacity: 10,
            tool_capacity: 50,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enhance_recommendations: true,
        }
    }
}

/// Returns `~/.mindful/`
pub fn default_mindful_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mindful")
}

/// Returns the default config file path: `~/.mindful/config.toml`
pub fn default_config_path() -> PathBuf {
    default_mindful_dir().join("config.toml")
}

impl MindfulConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MindfulConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MINDFUL_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("MINDFUL_HOST") {
            self.server.host = val;
        }
        if let Some(port) = std::env::var("MINDFUL_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("MINDFUL_HISTORY_PATH") {
            self.history.path = val;
        }
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            if !val.trim().is_empty() {
                self.llm.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("OPENAI_BASE_URL") {
            self.llm.base_url = val;
        }
        if let Ok(val) = std::env::var("OPENAI_MODEL") {
            self.llm.model = val;
        }
    }

    /// Resolve the history file path, expanding `~` if needed.
    pub fn resolved_history_path(&self) -> PathBuf {
        expand_tilde(&self.history.path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
