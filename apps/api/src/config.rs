use anyhow::{Context, Result};

use crate::flows::FlowOptions;

/// 2 MB, the largest resume document accepted at upload time.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Model calls are not retried unless `LLM_MAX_RETRIES` opts in.
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 0;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    /// Convert PDF resumes to text locally instead of forwarding the document to the model.
    pub extract_pdf_locally: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            llm_max_retries: parse_env("LLM_MAX_RETRIES", DEFAULT_LLM_MAX_RETRIES)?,
            extract_pdf_locally: parse_env("EXTRACT_PDF_LOCALLY", false)?,
        })
    }

    pub fn flow_options(&self) -> FlowOptions {
        FlowOptions {
            extract_pdf_locally: self.extract_pdf_locally,
            max_document_bytes: self.max_upload_bytes,
        }
    }

    /// Request body cap. Leaves room for base64 expansion of a maximum-size
    /// document plus the job description and multipart framing, so oversized
    /// files still reach upload gating and get a specific rejection message.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_upload_bytes.saturating_mul(2) + 1024 * 1024
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            llm_timeout_secs: 5,
            llm_max_retries: DEFAULT_LLM_MAX_RETRIES,
            extract_pdf_locally: false,
        }
    }
}
