//! YAML configuration for the CLI. Every field is optional; flags override.

use advisor_core::TierMap;
use advisor_engine::{Advancement, EffortLevel};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "assets/data";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisorConfig {
    /// Directory holding the catalog JSON files.
    pub data_dir: PathBuf,
    pub advancement: Advancement,
    pub effort: EffortLevel,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Per-kind raw -> display tier overrides.
    pub tier_mappings: TierMap,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            advancement: Advancement::default(),
            effort: EffortLevel::default(),
            log_filter: "info".to_string(),
            tier_mappings: TierMap::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::ComponentKind;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AdvisorConfig::from_yaml("\n").unwrap();
        assert_eq!(cfg, AdvisorConfig::default());
        assert_eq!(cfg.data_dir, PathBuf::from("assets/data"));
        assert_eq!(cfg.advancement, Advancement::Steps(1));
        assert_eq!(cfg.effort, EffortLevel::Simple);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = AdvisorConfig::from_yaml("advancement: max\neffort: complex\n").unwrap();
        assert_eq!(cfg.advancement, Advancement::Max);
        assert_eq!(cfg.effort, EffortLevel::Complex);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn tier_mappings_are_read_per_kind() {
        let cfg = AdvisorConfig::from_yaml("tier_mappings:\n  gpu:\n    6: 5\n    7: 6\n").unwrap();
        assert_eq!(cfg.tier_mappings.original_tier(6, ComponentKind::Gpu), 7);
        assert_eq!(cfg.tier_mappings.for_kind(ComponentKind::Gpu).display(7), 6);
        assert_eq!(cfg.tier_mappings.for_kind(ComponentKind::Cpu).display(7), 7);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(AdvisorConfig::from_yaml("advancement: 0\n").is_err());
        assert!(AdvisorConfig::from_yaml("effort: heroic\n").is_err());
        assert!(AdvisorConfig::from_yaml("colour: blue\n").is_err());
    }

    #[test]
    fn example_config_parses() {
        let cfg = AdvisorConfig::from_yaml(include_str!("../../../assets/advisor.example.yaml")).unwrap();
        assert_eq!(cfg.advancement, Advancement::Steps(2));
        assert_eq!(cfg.effort, EffortLevel::Moderate);
    }
}
