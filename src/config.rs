// ── Discovery configuration ───────────────────────────────────────────────────
//
// Reads `%APPDATA%\DeckLinkDiscovery\config.json`, or the file named by
// `DECKLINK_DISCOVERY_CONFIG`.  Every field has a default, so a missing or
// partial file is fine.  No `unsafe`: pure safe Rust + serde_json.

use std::{fs, io, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    layout::{VirtualLayout, DEFAULT_DEVICE_HEIGHT, DEFAULT_DEVICE_WIDTH, DEFAULT_HORIZONTAL_STEP},
};

// ── Format version ────────────────────────────────────────────────────────────

const CONFIG_VERSION: u32 = 1;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "DECKLINK_DISCOVERY_CONFIG";

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub version: u32,
    /// Virtual width given to every DeckLink output.
    pub device_width: i32,
    /// Virtual height given to every DeckLink output.
    pub device_height: i32,
    /// X offset between consecutive devices.
    pub horizontal_step: i32,
    /// Hide devices that report no playback support.  Off by default: the
    /// host lists every device and lets the user decide.
    pub playback_only: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            device_width: DEFAULT_DEVICE_WIDTH,
            device_height: DEFAULT_DEVICE_HEIGHT,
            horizontal_step: DEFAULT_HORIZONTAL_STEP,
            playback_only: false,
        }
    }
}

impl DiscoveryConfig {
    pub fn layout(&self) -> VirtualLayout {
        VirtualLayout {
            device_width: self.device_width,
            device_height: self.device_height,
            horizontal_step: self.horizontal_step,
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the config file.
///
/// `DECKLINK_DISCOVERY_CONFIG` wins; otherwise
/// `%APPDATA%\DeckLinkDiscovery\config.json`.  Returns `None` when neither
/// variable is set.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(explicit));
    }
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("DeckLinkDiscovery");
    p.push("config.json");
    Some(p)
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Parse a config file, rejecting unknown versions.
pub fn load_from(path: &Path) -> Result<DiscoveryConfig> {
    let data = fs::read(path)?;
    let cfg: DiscoveryConfig = serde_json::from_slice(&data)?;
    if cfg.version != CONFIG_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported config version {}", cfg.version),
        )
        .into());
    }
    Ok(cfg)
}

/// Read the config from its default location.
///
/// Returns `None` on any error: file missing, JSON parse failure, or an
/// unrecognised version number.  Callers fall back to
/// `DiscoveryConfig::default()`.
pub fn load() -> Option<DiscoveryConfig> {
    let path = config_path()?;
    match load_from(&path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            log::debug!("no usable config at {}: {e}", path.display());
            None
        }
    }
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `cfg` to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, cfg: &DiscoveryConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, cfg)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
