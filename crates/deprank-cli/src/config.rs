//! Project and user configuration.
//!
//! Two optional TOML files feed the CLI defaults:
//!
//! - project: `deprank.toml` in the working directory, or the `--config` path;
//! - user: `<config_dir>/deprank/config.toml`.
//!
//! A value set in the project file wins over the same value in the user file.
//! Command-line flags are applied on top by the callers.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputMode;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "deprank.toml";

/// One config file as written on disk. Unset keys stay `None` so the
/// layers can be merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Rank the reversed ("needed by") graph.
    #[serde(default)]
    pub reverse: Option<bool>,
    /// Append undeclared dependencies instead of failing.
    #[serde(default)]
    pub append_missing: Option<bool>,
}

/// Merged configuration after applying precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub output_format: Option<OutputMode>,
    pub reverse: bool,
    pub append_missing: bool,
}

impl EffectiveConfig {
    fn merge(project: &ConfigFile, user: &ConfigFile) -> Self {
        Self {
            output_format: project.output.format.or(user.output.format),
            reverse: project
                .graph
                .reverse
                .or(user.graph.reverse)
                .unwrap_or(false),
            append_missing: project
                .graph
                .append_missing
                .or(user.graph.append_missing)
                .unwrap_or(false),
        }
    }
}

/// Read and parse one config file; `Ok(None)` if it does not exist.
fn load_config_file(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ConfigFile>(&content)
        .map(Some)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the project config. An explicit path must exist; the implicit
/// `deprank.toml` may be absent.
pub fn load_project_config(project_root: &Path, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        let Some(config) = load_config_file(path)? else {
            bail!("config file {} does not exist", path.display());
        };
        return Ok(config);
    }

    Ok(load_config_file(&project_root.join(PROJECT_CONFIG_FILE))?.unwrap_or_default())
}

/// Location of the user config, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deprank/config.toml"))
}

pub fn load_user_config() -> Result<ConfigFile> {
    let Some(path) = user_config_path() else {
        return Ok(ConfigFile::default());
    };
    Ok(load_config_file(&path)?.unwrap_or_default())
}

/// Load both layers and merge them.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root, explicit)?;
    let user = load_user_config()?;
    let effective = EffectiveConfig::merge(&project, &user);
    tracing::debug!(?effective, "resolved configuration");
    Ok(effective)
}
