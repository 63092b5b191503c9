use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_KNOWLEDGE_BASE_PATH: &str = "knowledge_base_benin_v2.json";

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub knowledge_base_path: PathBuf,
    /// Absent means the advisor runs on template text only.
    pub openrouter_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    pub cors_permissive: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            knowledge_base_path: optional_env("KNOWLEDGE_BASE_PATH")
                .unwrap_or_else(|| DEFAULT_KNOWLEDGE_BASE_PATH.to_string())
                .into(),
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            llm_timeout: Duration::from_secs(
                optional_env("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_permissive: optional_env("CORS_PERMISSIVE")
                .map(|raw| parse_flag(&raw))
                .transpose()?
                .unwrap_or(true),
        })
    }
}

/// Set and non-blank.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("CORS_PERMISSIVE must be a boolean, got '{other}'"),
    }
}
