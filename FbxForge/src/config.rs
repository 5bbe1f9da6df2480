//! Persisted defaults
//!
//! Stored at `<config dir>/FbxForge/config.json`. Load and save are both
//! best-effort: a missing or malformed file simply means built-in defaults.
//! Command-line flags are layered on top by the caller.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::convert::ConvertOptions;
use crate::mount::MountStrategy;

/// Persistable defaults (saved to disk)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedConfig {
    /// Docker image that provides the conversion tool.
    #[serde(default)]
    pub image: Option<String>,
    /// Container-side staging directory.
    #[serde(default)]
    pub container_dir: Option<String>,
    /// Mount strategy name ("staged" or "direct").
    #[serde(default)]
    pub strategy: Option<String>,
}

impl PersistedConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("FbxForge").join("config.json"))
    }

    /// Load config from disk, or return default
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save config to disk
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(content) = serde_json::to_string_pretty(self) {
                let _ = fs::write(path, content);
            }
        }
    }

    /// Layer these defaults over `options`; unset fields leave it untouched.
    pub fn apply(&self, mut options: ConvertOptions) -> ConvertOptions {
        if let Some(image) = &self.image {
            options.image = image.clone();
        }
        if let Some(dir) = &self.container_dir {
            options.container_dir = dir.clone();
        }
        if let Some(name) = &self.strategy {
            match name.parse::<MountStrategy>() {
                Ok(strategy) => options.strategy = strategy,
                Err(_) => warn!("ignoring unknown mount strategy in config: {name}"),
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_leaves_options_untouched() {
        let options = PersistedConfig::default().apply(ConvertOptions::default());
        assert_eq!(options.image, crate::convert::DEFAULT_IMAGE);
        assert_eq!(options.strategy, MountStrategy::Staged);
    }

    #[test]
    fn set_fields_override_defaults() {
        let config = PersistedConfig {
            image: Some("blender:latest".to_string()),
            container_dir: None,
            strategy: Some("direct".to_string()),
        };
        let options = config.apply(ConvertOptions::default());
        assert_eq!(options.image, "blender:latest");
        assert_eq!(options.container_dir, crate::mount::DEFAULT_CONTAINER_DIR);
        assert_eq!(options.strategy, MountStrategy::Direct);
    }

    #[test]
    fn unknown_strategy_is_ignored() {
        let config = PersistedConfig {
            image: None,
            container_dir: None,
            strategy: Some("overlay".to_string()),
        };
        let options = config.apply(ConvertOptions::default());
        assert_eq!(options.strategy, MountStrategy::Staged);
    }

    #[test]
    fn round_trips_through_json() {
        let config = PersistedConfig {
            image: Some("blender:latest".to_string()),
            container_dir: Some("/work".to_string()),
            strategy: Some("staged".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PersistedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.image.as_deref(), Some("blender:latest"));
        assert_eq!(back.container_dir.as_deref(), Some("/work"));
        assert_eq!(back.strategy.as_deref(), Some("staged"));
    }
}
