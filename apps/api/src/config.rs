use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analysis::cleaner::DEFAULT_MAX_CHARS;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Smallest accepted upload, in bytes.
    pub min_upload_bytes: usize,
    /// Cap on cleaned text length, in characters.
    pub max_clean_chars: usize,
    /// When false the analyzer runs without an annotator (lexical scoring only).
    pub annotator_enabled: bool,
    /// GloVe / word2vec text file enabling semantic section detection.
    pub word_vectors_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            min_upload_bytes: 10 * 1024,
            max_clean_chars: DEFAULT_MAX_CHARS,
            annotator_enabled: true,
            word_vectors_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            min_upload_bytes: parse_env("MIN_UPLOAD_BYTES", defaults.min_upload_bytes)?,
            max_clean_chars: parse_env("MAX_CLEAN_CHARS", defaults.max_clean_chars)?,
            annotator_enabled: parse_env("ANNOTATOR_ENABLED", defaults.annotator_enabled)?,
            word_vectors_path: std::env::var_os("WORD_VECTORS_PATH").map(PathBuf::from),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
