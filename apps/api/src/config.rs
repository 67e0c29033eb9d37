use anyhow::{Context, Result};

use crate::layout::{OverflowPolicy, PaperSize};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub paper_size: PaperSize,
    pub max_pages_per_column: usize,
    pub overflow_policy: OverflowPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            paper_size: env_or("PAPER_SIZE", "a4")
                .parse::<PaperSize>()
                .context("PAPER_SIZE must be 'a4' or 'letter'")?,
            max_pages_per_column: env_or("MAX_PAGES_PER_COLUMN", "10")
                .parse::<usize>()
                .context("MAX_PAGES_PER_COLUMN must be a positive integer")?,
            overflow_policy: env_or("OVERFLOW_POLICY", "truncate")
                .parse::<OverflowPolicy>()
                .context(
                    "OVERFLOW_POLICY must be 'truncate', 'error' or 'retry-with-smaller-font'",
                )?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
