//! Reading dependency maps.
//!
//! A dependency map is a mapping from node name to the names it depends on:
//!
//! ```yaml
//! firefox: [libgtk, libc]
//! libgtk: [libglib, libc]
//! libglib: [libc]
//! libc: []
//! ```
//!
//! Document order matters: it becomes the input order that breaks every tie
//! in the ranking, so the map is read entry by entry instead of through a
//! hashed or sorted map type.

use std::fmt;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// `(name, dependencies)` entries in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyMap(Vec<(String, Vec<String>)>);

impl DependencyMap {
    pub fn into_entries(self) -> Vec<(String, Vec<String>)> {
        self.0
    }

    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl<'de> Deserialize<'de> for DependencyMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DependencyMapVisitor)
    }
}

struct DependencyMapVisitor;

impl<'de> Visitor<'de> for DependencyMapVisitor {
    type Value = DependencyMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from node name to a list of dependency names")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        // `null` (a bare `libc:` in YAML) means no dependencies.
        while let Some((name, deps)) = access.next_entry::<String, Option<Vec<String>>>()? {
            entries.push((name, deps.unwrap_or_default()));
        }
        Ok(DependencyMap(entries))
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    Toml,
}

impl InputFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => bail!(
                "cannot tell the format of {} (expected .json, .yaml, .yml or .toml)",
                path.display()
            ),
        }
    }
}

pub fn parse_dependency_map(content: &str, format: InputFormat) -> Result<DependencyMap> {
    match format {
        InputFormat::Json => serde_json::from_str(content).context("invalid JSON dependency map"),
        InputFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML dependency map"),
        InputFormat::Toml => toml::from_str(content).context("invalid TOML dependency map"),
    }
}

/// Read a dependency map from `path`, or JSON from stdin when `path` is `-`.
pub fn read_dependency_map(path: &Path) -> Result<DependencyMap> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read dependency map from stdin")?;
        return parse_dependency_map(&content, InputFormat::Json)
            .context("Failed to parse dependency map from stdin");
    }

    let format = InputFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let map = parse_dependency_map(&content, format)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, "read dependency map");
    Ok(map)
}
