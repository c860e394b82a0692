use anyhow::Result;
use std::env;

/// Server configuration, loaded from the environment (`.env` supported).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Exact origin allowed by CORS; unset means permissive (local dev).
    pub cors_origin: Option<String>,
    /// Apply the default stock/crypto watchlists on startup.
    pub seed_defaults: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:dashboard.db".to_string()),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty()),
            seed_defaults: env::var("SEED_DEFAULTS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
        };

        Ok(config)
    }
}
