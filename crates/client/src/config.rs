//! Client configuration (environment-driven).

use std::path::PathBuf;

use anyhow::Context;

/// Base origin used when `HRMS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://hr-management-b.onrender.com";

pub const ENV_API_URL: &str = "HRMS_API_URL";
pub const ENV_SESSION_DB: &str = "HRMS_SESSION_DB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base origin of the HR API, without a trailing slash.
    pub api_url: String,
    /// SQLite file holding the persisted session.
    pub session_db: PathBuf,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_db = match lookup(ENV_SESSION_DB).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_db_path()?,
        };

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            session_db,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Resolve the default session database path:
/// `{app_data_dir}/hrms/session.db`.
fn default_session_db_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("hrms");
    dir.push("session.db");
    Ok(dir)
}
