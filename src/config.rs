//! Configuration loading for sql-constraint-lint
//!
//! Loads rule enable/disable settings from the [lint] section of a
//! constraint-lint.toml file. The prefix table itself is fixed and not
//! configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "constraint-lint.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Rules to enable (empty means all rules, or use ["ALL"])
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable
    #[serde(default)]
    pub disable: Vec<String>,
}

/// Find constraint-lint.toml starting from a path and walking up
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Load configuration from a config file, or search upward from the
/// current directory when no path is given
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p.to_path_buf(),
        Some(_) => return None,
        None => find_config_file(&std::env::current_dir().ok()?)?,
    };

    let content = std::fs::read_to_string(&config_path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;

    let lint = value.get("lint")?;
    lint.clone().try_into().ok()
}

/// Merge host-supplied enable/disable lists with config file settings.
/// Host arguments take precedence. Returns the enabled rule id list, or
/// `None` when every registered rule is enabled.
pub fn merge_config(
    config: Option<&Config>,
    host_enable: &[String],
    host_disable: &[String],
) -> Option<Vec<String>> {
    if !host_enable.is_empty() || !host_disable.is_empty() {
        return resolve(host_enable, host_disable);
    }

    if let Some(cfg) = config {
        return resolve(&cfg.enable, &cfg.disable);
    }

    None
}

fn resolve(enable: &[String], disable: &[String]) -> Option<Vec<String>> {
    if enable.is_empty() && disable.is_empty() {
        return None;
    }

    if enable.is_empty() || enable.iter().any(|e| e == "ALL") {
        let all = crate::rules::rule_ids();
        Some(all.into_iter().filter(|r| !disable.contains(r)).collect())
    } else {
        Some(enable.to_vec())
    }
}
