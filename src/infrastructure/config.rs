use anyhow::{Context, Result};
use std::env;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Signing secret for session tokens. Required, no fallback value.
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET must be set; refusing to start with no signing secret")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            jwt_secret,
            bind_addr,
        })
    }
}
