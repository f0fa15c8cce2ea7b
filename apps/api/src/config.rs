use std::time::Duration;

use anyhow::{Context, Result};

use crate::harvest::{HarvestConfig, DEFAULT_BASE_URL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub greenhouse_api_key: String,
    pub greenhouse_base_url: String,
    pub greenhouse_job_id: u64,
    pub greenhouse_user_id: String,
    pub greenhouse_timeout_secs: u64,
    /// Request body cap for the multipart endpoint. Kept above the resume
    /// limit so oversize files still reach validation.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            greenhouse_api_key: require(&lookup, "GREENHOUSE_API_KEY")?,
            greenhouse_base_url: lookup("GREENHOUSE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            greenhouse_job_id: require(&lookup, "GREENHOUSE_JOB_ID")?
                .trim()
                .parse::<u64>()
                .context("GREENHOUSE_JOB_ID must be a numeric job id")?,
            greenhouse_user_id: require(&lookup, "GREENHOUSE_USER_ID")?,
            greenhouse_timeout_secs: optional(&lookup, "GREENHOUSE_TIMEOUT_SECS", 30)
                .context("GREENHOUSE_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: optional(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: optional(&lookup, "PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn harvest(&self) -> HarvestConfig {
        HarvestConfig {
            base_url: self.greenhouse_base_url.clone(),
            api_key: self.greenhouse_api_key.clone(),
            job_id: self.greenhouse_job_id,
            on_behalf_of: self.greenhouse_user_id.clone(),
            timeout: Duration::from_secs(self.greenhouse_timeout_secs),
        }
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => Ok(raw.trim().parse::<T>()?),
        None => Ok(default),
    }
}
