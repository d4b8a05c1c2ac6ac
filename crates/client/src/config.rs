//! Client configuration, read from the environment.

use std::path::PathBuf;

/// Default API base, including the `/api` prefix the server mounts under.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub api_url: String,
    /// Directory holding the local store.
    pub data_dir: PathBuf,
    /// Bearer token that overrides the persisted session.
    pub token: Option<String>,
}

impl ClientConfig {
    /// Load `.env` if present, then read `FOODNOVA_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = non_empty("FOODNOVA_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = non_empty("FOODNOVA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            api_url,
            data_dir,
            token: non_empty("FOODNOVA_TOKEN"),
        }
    }

    /// `{data_dir}/foodnova.db`
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("foodnova.db")
    }
}

/// `{app_data_dir}/foodnova`, falling back to `~/.local/share/foodnova`.
fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("foodnova")
}
