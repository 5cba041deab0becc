use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Engine tuning loaded from a TOML file. Every field has a default so
/// a partial (or absent) config file is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Payee similarity must exceed this for a duplicate verdict.
    pub similarity_threshold: f32,
    /// Reject records failing field validation instead of falling back.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.9,
            strict: false,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: EngineConfig =
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
