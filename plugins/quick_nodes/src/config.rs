//! Which node kinds get "Prepend" entries, which helpers they offer, and which fields get wired.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::definitions::{YARS, YARS_ADV};
use crate::error::QuickNodesError;

/// How to treat a field that the target's schema does not declare.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPolicy {
    /// Fall back to the widget's own type and options, logging a warning.
    #[default]
    Permissive,
    /// Refuse to convert the field.
    Strict,
}

/// One helper node kind offered in the menu.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HelperChoice {
    /// Menu label, shown as `Prepend <label>`
    pub label: String,
    pub node_type: String,
}

impl HelperChoice {
    pub fn new(label: &str, node_type: &str) -> Self {
        Self {
            label: label.to_string(),
            node_type: node_type.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct QuickNodesConfig {
    pub target_node_types: Vec<String>,
    pub helpers: Vec<HelperChoice>,
    pub fields: Vec<String>,
    pub schema_policy: SchemaPolicy,
}

impl Default for QuickNodesConfig {
    fn default() -> Self {
        Self {
            target_node_types: vec!["EmptyLatentImage".to_string(), "ImageScale".to_string()],
            helpers: vec![
                HelperChoice::new("yaResolution Selector", YARS),
                HelperChoice::new("Advanced yaResolution Selector", YARS_ADV),
            ],
            fields: vec!["width".to_string(), "height".to_string()],
            schema_policy: SchemaPolicy::Permissive,
        }
    }
}

impl QuickNodesConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, QuickNodesError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, QuickNodesError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuickNodesError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), QuickNodesError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn targets(&self, type_id: &str) -> bool {
        self.target_node_types.iter().any(|t| t == type_id)
    }
}

/// Default location of `quick_nodes.toml` in the user's config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "quick-nodes", "quick_nodes")
        .map(|dirs| dirs.config_dir().join("quick_nodes.toml"))
}

/// Load the user's config, falling back to defaults when it is missing or invalid.
pub fn load_config() -> QuickNodesConfig {
    let Some(path) = config_path() else {
        return QuickNodesConfig::default();
    };
    if !path.exists() {
        return QuickNodesConfig::default();
    }
    match QuickNodesConfig::load(&path) {
        Ok(config) => {
            info!("Loaded quick node config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}, using defaults: {}", path.display(), e);
            QuickNodesConfig::default()
        }
    }
}

/// Write the config to the user's config directory.
pub fn save_config(config: &QuickNodesConfig) -> Result<(), QuickNodesError> {
    let Some(path) = config_path() else {
        error!("No config directory available");
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    config.save(&path)?;
    info!("Quick node config saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_resolution_selectors() {
        let config = QuickNodesConfig::default();
        assert!(config.targets("EmptyLatentImage"));
        assert!(config.targets("ImageScale"));
        assert!(!config.targets("KSampler"));
        assert_eq!(config.fields, ["width", "height"]);
        assert_eq!(config.helpers[0].node_type, "YARS");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = QuickNodesConfig::from_toml_str(
            r#"
            target_node_types = ["KSampler"]
            schema_policy = "strict"

            [[helpers]]
            label = "Seed Source"
            node_type = "SeedNode"
            "#,
        )
        .unwrap();
        assert_eq!(config.target_node_types, ["KSampler"]);
        assert_eq!(config.schema_policy, SchemaPolicy::Strict);
        assert_eq!(config.helpers, vec![HelperChoice::new("Seed Source", "SeedNode")]);
        assert_eq!(config.fields, ["width", "height"]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = QuickNodesConfig::from_toml_str("fields = 3").unwrap_err();
        assert!(matches!(err, QuickNodesError::Config(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = QuickNodesConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(QuickNodesConfig::from_toml_str(&text).unwrap(), config);
    }
}
