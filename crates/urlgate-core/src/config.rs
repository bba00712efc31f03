use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Page fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole GET, redirects included.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed before giving up.
    pub max_redirections: u32,
    /// Largest response body accepted; a longer body aborts the GET.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
    /// Optional User-Agent header; libcurl sends none by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_max_body_bytes() -> u64 {
    8 * 1024 * 1024
}

fn default_max_db_connections() -> u32 {
    8
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            max_redirections: 10,
            max_body_bytes: default_max_body_bytes(),
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/urlgate/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Registry database file. None = `~/.local/state/urlgate/registry.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    /// Size of the SQLite connection pool.
    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            max_db_connections: default_max_db_connections(),
            fetch: FetchConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlgate")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default registry location under the XDG state directory.
pub fn default_database_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlgate")?;
    Ok(xdg_dirs.place_state_file("registry.db")?)
}

impl GateConfig {
    /// Configured database path, or the XDG default.
    pub fn resolved_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(p) => Ok(p.clone()),
            None => default_database_path(),
        }
    }
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GateConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GateConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GateConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
