use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::{SkipRule, WorkloadKind};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub skip_resources: Vec<SkipResourceConfig>,
    pub helm: HelmConfig,
}

/// Extraction configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Registry prefix allow-list
    pub registries: Vec<String>,
    /// Kinds to extract from; empty means all
    pub kinds: Vec<WorkloadKind>,
    pub unique: bool,
    pub separator_pattern: Option<String>,
    pub configmap_image_pattern: Option<String>,
}

/// A resource excluded from extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipResourceConfig {
    pub kind: String,
    pub name: String,
}

/// Helm binary configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HelmConfig {
    pub binary: Option<String>,
}

/// Extraction settings given on the command line.
///
/// Non-empty lists replace the configured ones; skip rules are added to them.
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    pub registries: Vec<String>,
    pub kinds: Vec<WorkloadKind>,
    pub unique: bool,
    pub separator_pattern: Option<String>,
    pub configmap_image_pattern: Option<String>,
    pub skip_resources: Vec<SkipRule>,
}

impl Config {
    /// Build the extraction policy from this config and command-line overrides.
    pub fn to_policy(&self, overrides: &PolicyOverrides) -> Result<ExtractionPolicy> {
        let extraction = &self.extraction;
        let mut policy = ExtractionPolicy::new().unique(overrides.unique || extraction.unique);

        if let Some(pattern) = overrides
            .separator_pattern
            .as_deref()
            .or(extraction.separator_pattern.as_deref())
        {
            policy = policy.with_separator(pattern)?;
        }
        if let Some(pattern) = overrides
            .configmap_image_pattern
            .as_deref()
            .or(extraction.configmap_image_pattern.as_deref())
        {
            policy = policy.with_configmap_image_pattern(pattern)?;
        }

        let kinds = if overrides.kinds.is_empty() {
            &extraction.kinds
        } else {
            &overrides.kinds
        };
        if !kinds.is_empty() {
            policy = policy.with_kinds(kinds.iter().copied());
        }

        let registries = if overrides.registries.is_empty() {
            &extraction.registries
        } else {
            &overrides.registries
        };
        for registry in registries {
            policy = policy.registry(registry.clone());
        }

        for skip in &self.skip_resources {
            policy = policy.skip(SkipRule::new(&skip.kind, &skip.name));
        }
        for rule in &overrides.skip_resources {
            policy = policy.skip(rule.clone());
        }

        Ok(policy)
    }
}
