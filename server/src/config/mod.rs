use anyhow::{Context, Result};
use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: String,
    pub production: bool,
}

impl Config {
    /// Reads the process environment. `DATABASE_URL` and `AUTH_JWT_SECRET`
    /// are required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("AUTH_JWT_SECRET")?,
            jwt_issuer: lookup("AUTH_JWT_ISSUER").filter(|value| !value.is_empty()),
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(value) => value
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match lookup("PORT") {
                Some(value) => value.parse().context("PORT must be a valid number")?,
                None => DEFAULT_PORT,
            },
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
