//! Environment configuration.

use std::env;

/// Runtime configuration read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// The single origin allowed by CORS, when set.
    pub frontend_url: Option<String>,
    /// HTTP listen port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/products".into());
        let frontend_url = env::var("FRONTEND_URL").ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);
        Self {
            database_url,
            frontend_url,
            port,
        }
    }
}
