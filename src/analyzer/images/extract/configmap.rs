//! ConfigMap payload scanning.
//!
//! ConfigMaps are not workloads, but charts often keep image references
//! in them (operator settings, embedded values files). Each `data` entry
//! is sniffed: structured YAML/JSON payloads are searched for matching
//! keys at any depth, plain text is taken whole when its own key matches.

use super::Manifest;
use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::parser::ValueTree;
use crate::analyzer::images::types::ImageRecord;
use crate::error::Result;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The parts of a ConfigMap the scan reads.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigMapShape {
    #[serde(default)]
    pub data: Option<BTreeMap<String, String>>,
}

/// How a payload was recognised.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(ValueTree),
    Yaml(ValueTree),
    Text,
}

/// Sniff the content type of a ConfigMap value.
///
/// Only maps and lists count as structured; a value that decodes to a
/// bare scalar is text.
pub fn sniff_payload(content: &str) -> Payload {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(content) {
        let tree = ValueTree::from(value);
        if tree.is_structured() {
            return Payload::Json(tree);
        }
        return Payload::Text;
    }

    match serde_yaml::from_str::<serde_yaml::Value>(content) {
        Ok(value) => {
            let tree = ValueTree::from(value);
            if tree.is_structured() {
                Payload::Yaml(tree)
            } else {
                Payload::Text
            }
        }
        Err(e) => {
            log::trace!("payload is neither JSON nor YAML ({}), treating it as text", e);
            Payload::Text
        }
    }
}

/// Images referenced by one `data` entry.
pub fn images_in_entry(key: &str, value: &str, pattern: &Regex) -> Vec<String> {
    match sniff_payload(value) {
        Payload::Json(tree) | Payload::Yaml(tree) => tree.find_images(pattern),
        Payload::Text if pattern.is_match(&key.to_lowercase()) => vec![value.to_string()],
        Payload::Text => Vec::new(),
    }
}

/// ConfigMap: scan every `data` entry. An empty record means nothing matched.
pub fn extract_configmap(manifest: &Manifest<'_>, policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let pattern = &policy.configmap_image_pattern;
    log::debug!(
        "using regex '{}' for identifying images from configmap '{}'",
        pattern.as_str(),
        manifest.name
    );

    let configmap: ConfigMapShape = manifest.decode()?;
    let images = configmap
        .data
        .iter()
        .flatten()
        .flat_map(|(key, value)| images_in_entry(key, value, pattern))
        .collect();

    Ok(manifest.record(images))
}
