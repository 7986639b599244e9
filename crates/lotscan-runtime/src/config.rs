use crate::{Error, Result};
use lotscan_types::SiteProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LOTSCAN_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.lotscan (fallback for systems without XDG)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: LOTSCAN_PATH environment variable
    if let Ok(env_path) = std::env::var("LOTSCAN_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: XDG data directory (recommended default)
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("lotscan"));
    }

    // Priority 4: Fallback to ~/.lotscan (last resort for systems without XDG)
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".lotscan"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn default_context_examples() -> usize {
    lotscan_engine::prompt::DEFAULT_CONTEXT_EXAMPLES
}

fn default_notes_budget() -> usize {
    lotscan_engine::prompt::DEFAULT_NOTES_BUDGET
}

fn default_rate_limit_ms() -> u64 {
    1000
}

/// Workspace configuration (`<data-dir>/config.toml`).
///
/// Site profiles live here, injected into the prompt composer as immutable
/// configuration rather than living in module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Historical examples injected by the dynamic prompt variant.
    #[serde(default = "default_context_examples")]
    pub context_examples: usize,

    /// Character budget for an injected example's notes field.
    #[serde(default = "default_notes_budget")]
    pub notes_budget: usize,

    /// Fixed delay between successive model calls in a batch.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Hand-authored site descriptions, keyed by camera id.
    #[serde(default)]
    pub sites: BTreeMap<String, SiteProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_examples: default_context_examples(),
            notes_budget: default_notes_budget(),
            rate_limit_ms: default_rate_limit_ms(),
            sites: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn set_site(&mut self, camera_id: String, profile: SiteProfile) {
        self.sites.insert(camera_id, profile);
    }
}
