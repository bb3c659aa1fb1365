use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_LINKEDIN_CLIENT_ID: &str = "YOUR_LINKEDIN_CLIENT_ID";

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    pub rust_log: String,
    /// Origin used in share links and the LinkedIn redirect URI.
    pub public_base_url: String,
    pub linkedin_client_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = env_or("PORT", "8080")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;
        let public_base_url = env_or("PUBLIC_BASE_URL", &format!("http://localhost:{port}"));
        if !public_base_url.starts_with("http://") && !public_base_url.starts_with("https://") {
            anyhow::bail!("PUBLIC_BASE_URL must start with http:// or https://");
        }

        Ok(Config {
            store_path: PathBuf::from(env_or("RESUME_STORE_PATH", "./resume-store.json")),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1"),
            port,
            rust_log: env_or("RUST_LOG", "info"),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            linkedin_client_id: env_or("LINKEDIN_CLIENT_ID", DEFAULT_LINKEDIN_CLIENT_ID),
        })
    }

    /// Defaults without touching the environment.
    pub fn local(port: u16) -> Self {
        Config {
            store_path: PathBuf::from("./resume-store.json"),
            bind_addr: "127.0.0.1".to_string(),
            port,
            rust_log: "info".to_string(),
            public_base_url: format!("http://localhost:{port}"),
            linkedin_client_id: DEFAULT_LINKEDIN_CLIENT_ID.to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
