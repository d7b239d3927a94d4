//! Environment-driven configuration, validated once at startup.
//!
//! Credentials have no defaults: a missing `GEMINI_API_KEY` (or
//! `ZAMZAR_API_KEY` when the conversion extractor is selected) is an error.

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ZAMZAR_BASE_URL: &str = "https://api.zamzar.com/v1";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub extractor: ExtractorConfig,
    pub server: ServerConfig,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Where PDF text comes from.
#[derive(Debug, Clone)]
pub enum ExtractorConfig {
    Local,
    Conversion(ConversionConfig),
}

#[derive(Clone)]
pub struct ConversionConfig {
    pub api_key: String,
    pub base_url: String,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

// Keys stay out of Debug output.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &REDACTED)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("api_key", &REDACTED)
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let gemini = GeminiConfig {
            api_key: get("GEMINI_API_KEY")
                .ok_or_else(|| anyhow!("GEMINI_API_KEY environment variable not set"))?,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: trim_base(get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())),
        };

        let extractor = match get("TEXT_EXTRACTOR").as_deref().unwrap_or("local") {
            "local" => ExtractorConfig::Local,
            "zamzar" => ExtractorConfig::Conversion(ConversionConfig {
                api_key: get("ZAMZAR_API_KEY").ok_or_else(|| {
                    anyhow!("ZAMZAR_API_KEY environment variable not set (required by TEXT_EXTRACTOR=zamzar)")
                })?,
                base_url: trim_base(get("ZAMZAR_BASE_URL").unwrap_or_else(|| DEFAULT_ZAMZAR_BASE_URL.to_string())),
                poll_interval: Duration::from_millis(parse_or(
                    get("CONVERSION_POLL_INTERVAL_MS"),
                    "CONVERSION_POLL_INTERVAL_MS",
                    DEFAULT_POLL_INTERVAL_MS,
                )?),
                max_attempts: parse_or(get("CONVERSION_MAX_ATTEMPTS"), "CONVERSION_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            }),
            other => bail!("unknown TEXT_EXTRACTOR '{}' (expected 'local' or 'zamzar')", other),
        };

        if let ExtractorConfig::Conversion(conversion) = &extractor {
            if conversion.max_attempts == 0 {
                bail!("CONVERSION_MAX_ATTEMPTS must be at least 1");
            }
        }

        let server = ServerConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 3000)?,
            max_body_bytes: parse_or(get("MAX_BODY_BYTES"), "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        };

        Ok(Self {
            gemini,
            extractor,
            server,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
