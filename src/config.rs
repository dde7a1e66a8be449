use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub search_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();

        let timeout_secs =
            get_env_or_default("SEARCH_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string());
        let timeout_secs: u64 = timeout_secs
            .parse()
            .with_context(|| format!("SEARCH_TIMEOUT_SECS is not a number: {timeout_secs}"))?;

        let bind_addr = get_env_or_default("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        Ok(Config {
            openai_api_key: get_env("OPENAI_API_KEY")?,
            openai_base_url: get_env_or_default("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            openai_model: get_env_or_default("OPENAI_MODEL", DEFAULT_MODEL),
            search_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
