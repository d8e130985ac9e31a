use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::progress::DEFAULT_BAR_WIDTH;
use crate::request::{DEFAULT_METHOD, DEFAULT_OUTPUT_PATH};
use crate::transfer::TransferOptions;

const CONFIG_FILE: &str = "config.toml";

/// Optional user configuration loaded from `~/.config/kfetch/config.toml`.
/// Every key may be omitted; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KfetchConfig {
    /// Output file used when `-f` is not given.
    pub output_path: PathBuf,
    /// HTTP method used when `-m` is not given.
    pub method: String,
    /// Print libcurl's protocol diagnostics to stderr.
    pub verbose: bool,
    /// Mirror the response body to stdout while writing the file.
    pub echo_body: bool,
    /// Draw the progress bar.
    pub show_progress: bool,
    /// Progress bar width in cells.
    pub bar_width: usize,
    /// Connect timeout in seconds (None = no timeout).
    pub connect_timeout_secs: Option<u64>,
    /// Maximum redirects to follow (None = libcurl default).
    pub max_redirections: Option<u32>,
    /// Also write logs to `~/.local/state/kfetch/kfetch.log`.
    pub log_to_file: bool,
}

impl Default for KfetchConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            method: DEFAULT_METHOD.to_string(),
            verbose: true,
            echo_body: true,
            show_progress: true,
            bar_width: DEFAULT_BAR_WIDTH,
            connect_timeout_secs: None,
            max_redirections: None,
            log_to_file: false,
        }
    }
}

impl KfetchConfig {
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions {
            verbose: self.verbose,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            max_redirections: self.max_redirections,
        }
    }
}

/// Load configuration from the XDG config dir. A missing file yields defaults;
/// nothing is ever written.
pub fn load() -> Result<KfetchConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kfetch")?;
    match xdg_dirs.find_config_file(CONFIG_FILE) {
        Some(path) => load_from_path(&path),
        None => Ok(KfetchConfig::default()),
    }
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<KfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: KfetchConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
