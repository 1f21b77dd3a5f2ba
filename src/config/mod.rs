use anyhow::{bail, Result};
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL, e.g. `sqlite://timetracker.db`
    pub database_url: String,

    /// Address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// How long a login session stays valid
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Mark the session cookie `Secure` (serve behind TLS)
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

/// Longest allowed session, one year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

// Two weeks, same as a typical "remember me" login.
fn default_session_ttl_hours() -> i64 {
    336
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make every session expire immediately or
    /// overflow the expiry timestamp.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            bail!(
                "SESSION_TTL_HOURS must be between 1 and {MAX_SESSION_TTL_HOURS}, got {}",
                self.session_ttl_hours
            );
        }
        Ok(())
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Session lifetime, clamped to the range `validate` accepts.
    pub fn session_ttl(&self) -> chrono::Duration {
        let hours = self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        chrono::Duration::try_hours(hours).unwrap_or_else(chrono::Duration::zero)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    Ok(config)
}
