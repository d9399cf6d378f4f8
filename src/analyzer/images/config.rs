//! Extraction policy.
//!
//! Everything the core needs to know about a run, fixed before the first
//! document is read:
//! - Document separator pattern
//! - ConfigMap image-key pattern
//! - Kinds to consider
//! - Registry allow-list and unique-only flag
//! - Resource skip rules

use crate::analyzer::images::types::{SkipRule, WorkloadKind};
use crate::error::{ImagesError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Marker Helm writes in front of every rendered resource.
pub const DEFAULT_SEPARATOR_PATTERN: &str = r"---\n# Source:\s.*.";

/// Keys matching this pattern inside ConfigMap payloads are treated as images.
pub const DEFAULT_CONFIGMAP_IMAGE_PATTERN: &str = "image";

static DEFAULT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_SEPARATOR_PATTERN).unwrap());
static DEFAULT_CONFIGMAP_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_CONFIGMAP_IMAGE_PATTERN).unwrap());

/// Immutable per-run extraction policy.
#[derive(Debug, Clone)]
pub struct ExtractionPolicy {
    /// Splits a rendered stream into single-resource documents.
    pub separator: Regex,

    /// Matched against lower-cased ConfigMap keys.
    pub configmap_image_pattern: Regex,

    /// Kinds to extract from. Anything else is skipped.
    pub kinds: BTreeSet<WorkloadKind>,

    /// Keep only images starting with one of these prefixes.
    pub registries: Vec<String>,

    /// Reduce each image list to unique entries.
    pub unique: bool,

    /// Resources excluded before extraction.
    pub skip_rules: Vec<SkipRule>,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.clone(),
            configmap_image_pattern: DEFAULT_CONFIGMAP_IMAGE.clone(),
            kinds: WorkloadKind::ALL.into_iter().collect(),
            registries: Vec::new(),
            unique: false,
            skip_rules: Vec::new(),
        }
    }
}

impl ExtractionPolicy {
    /// Create a new default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the document separator pattern.
    pub fn with_separator(mut self, pattern: &str) -> Result<Self> {
        self.separator = compile(pattern)?;
        Ok(self)
    }

    /// Replace the ConfigMap image-key pattern.
    pub fn with_configmap_image_pattern(mut self, pattern: &str) -> Result<Self> {
        self.configmap_image_pattern = compile(pattern)?;
        Ok(self)
    }

    /// Restrict extraction to the given kinds.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = WorkloadKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Add a registry prefix to the allow-list.
    pub fn registry(mut self, prefix: impl Into<String>) -> Self {
        self.registries.push(prefix.into());
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Add a resource skip rule.
    pub fn skip(mut self, rule: SkipRule) -> Self {
        self.skip_rules.push(rule);
        self
    }

    /// Whether documents of this kind should be extracted.
    pub fn considers(&self, kind: WorkloadKind) -> bool {
        self.kinds.contains(&kind)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ImagesError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
