//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string for the catalog
//! - `GOOGLE_SHEETS_SHEET_ID` - Spreadsheet receiving one row per order line
//! - `GOOGLE_SHEETS_ACCESS_TOKEN` - OAuth bearer token with the spreadsheets scope
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8083)
//! - `GOOGLE_SHEETS_API_BASE` - Sheets API origin (default: <https://sheets.googleapis.com>)
//! - `SMTP_HOST` / `SMTP_PORT` - Relay (default: smtp.gmail.com:587)
//! - `SMTP_USERNAME`, `SMTP_PASSWORD`, `ORDER_NOTIFY_FROM`, `ORDER_NOTIFY_TO` -
//!   order emails are sent only when all four are set

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    pub sheets: SheetsConfig,
    /// `None` disables order and contact emails.
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub sheet_id: String,
    pub access_token: SecretString,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
    pub to_address: String,
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);
        Ok(Self {
            database_url: SecretString::from(env.required("DATABASE_URL")?),
            host: env.parsed("HOST", "0.0.0.0")?,
            port: env.parsed("PORT", "8083")?,
            sheets: SheetsConfig {
                sheet_id: env.required("GOOGLE_SHEETS_SHEET_ID")?,
                access_token: SecretString::from(env.required("GOOGLE_SHEETS_ACCESS_TOKEN")?),
                api_base: env.or_default("GOOGLE_SHEETS_API_BASE", "https://sheets.googleapis.com"),
            },
            email: EmailConfig::from_env(&env)?,
        })
    }

    pub const fn socket_addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}

impl EmailConfig {
    fn from_env(env: &Env<'_>) -> Result<Option<Self>, ConfigError> {
        let (Some(smtp_username), Some(smtp_password), Some(from_address), Some(to_address)) = (
            env.optional("SMTP_USERNAME"),
            env.optional("SMTP_PASSWORD"),
            env.optional("ORDER_NOTIFY_FROM"),
            env.optional("ORDER_NOTIFY_TO"),
        ) else {
            return Ok(None);
        };
        Ok(Some(Self {
            smtp_host: env.or_default("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: env.parsed("SMTP_PORT", "587")?,
            smtp_username,
            smtp_password: SecretString::from(smtp_password),
            from_address,
            to_address,
        }))
    }
}

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    fn optional(&self, key: &str) -> Option<String> { (self.0)(key).filter(|v| !v.trim().is_empty()) }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or_default(&self, key: &str, default: &str) -> String { self.optional(key).unwrap_or_else(|| default.to_string()) }

    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default).parse::<T>().map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
