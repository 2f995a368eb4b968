use anyhow::{Context, Result};
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
/// Every variable has a sensible default; nothing is required.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the page template JSON files.
    pub template_dir: PathBuf,
    /// Directory the finished pages are written to.
    pub output_dir: PathBuf,
    /// The feed bundle to render.
    pub input: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            template_dir: path_env("TELETEXT_TEMPLATE_DIR", "templates")?,
            output_dir: path_env("TELETEXT_OUTPUT_DIR", "out")?,
            input: path_env("TELETEXT_INPUT", "feed.json")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn path_env(key: &str, default: &str) -> Result<PathBuf> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    if raw.is_empty() {
        return Err(anyhow::anyhow!("{key} must not be empty")).context("invalid configuration");
    }
    Ok(PathBuf::from(raw))
}
