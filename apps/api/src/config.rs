use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

/// Application configuration loaded from environment variables.
/// Nothing is required: the Gemini key is supplied per session, not here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_base: String,
    /// Sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
    pub session_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            session_idle_ttl: secs_var("SESSION_IDLE_TTL_SECS", 3600)?,
            session_sweep_interval: secs_var("SESSION_SWEEP_INTERVAL_SECS", 60)?,
        })
    }
}

fn secs_var(name: &str, default: u64) -> Result<Duration> {
    let secs = match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{name} must be a whole number of seconds"))?,
        Err(_) => default,
    };
    anyhow::ensure!(secs > 0, "{name} must be greater than zero");
    Ok(Duration::from_secs(secs))
}
