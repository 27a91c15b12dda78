//! Runtime Configuration
//!
//! All knobs come from environment variables, read once at startup. Missing
//! variables fall back to development defaults, except the SMTP credentials:
//! those have no default and a partially configured transport aborts startup
//! rather than silently dropping confirmation emails at send time.

use anyhow::{Context, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Rotation threshold for the durable error log (1 MiB).
const DEFAULT_ERROR_LOG_MAX_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Root for the `stories/`, `contacts/`, `uploads/` and `logs/` trees.
    pub data_dir: PathBuf,
    /// Directory served as the static site root (thank-you page lives here).
    pub public_dir: PathBuf,
    /// Error log size at which the file is rotated aside.
    pub error_log_max_bytes: u64,
    /// Outbound mail transport. `None` disables confirmation emails.
    pub smtp: Option<SmtpConfig>,
}

/// Credentials and addressing for the confirmation mail transport.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Bookings <bookings@example.com>`.
    pub from: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind = lookup("BIND")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("invalid BIND address")?;
        let data_dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let public_dir =
            PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()));
        let error_log_max_bytes = match lookup("ERROR_LOG_MAX_BYTES") {
            Some(raw) => raw.parse().context("invalid ERROR_LOG_MAX_BYTES")?,
            None => DEFAULT_ERROR_LOG_MAX_BYTES,
        };
        let smtp = SmtpConfig::from_lookup(&lookup)?;

        Ok(Self {
            bind,
            data_dir,
            public_dir,
            error_log_max_bytes,
            smtp,
        })
    }
}

impl SmtpConfig {
    /// All four variables set yields a transport config; all four unset
    /// disables mail. A partial set is a configuration error.
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Option<Self>> {
        let host = lookup("SMTP_HOST");
        let username = lookup("SMTP_USERNAME");
        let password = lookup("SMTP_PASSWORD");
        let from = lookup("MAIL_FROM");

        match (host, username, password, from) {
            (Some(host), Some(username), Some(password), Some(from)) => Ok(Some(Self {
                host,
                username,
                password,
                from,
            })),
            (None, None, None, None) => Ok(None),
            _ => bail!(
                "SMTP configuration is incomplete: set all of SMTP_HOST, SMTP_USERNAME, \
                 SMTP_PASSWORD and MAIL_FROM, or none of them"
            ),
        }
    }
}
