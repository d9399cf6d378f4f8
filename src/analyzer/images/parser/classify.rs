//! Kind and name classification of single documents.
//!
//! Two outcomes are kept apart on purpose. A document that is empty,
//! comment-only or not a mapping classifies as `None` and is skipped. A
//! non-empty mapping that lacks a string `kind` is an authoring defect
//! and fails the run.

use crate::error::{ImagesError, Result};
use serde::Deserialize;
use serde_yaml::Value;

/// Parse every YAML document of a split piece, keeping the mappings.
///
/// A piece normally holds one document, but a template may emit its own
/// `---` lines. Empty, comment-only and non-mapping documents are dropped;
/// decoding stops at the first document that does not parse.
pub fn parse_documents(piece: &str) -> Vec<Value> {
    let mut values = Vec::new();
    for document in serde_yaml::Deserializer::from_str(piece) {
        match Value::deserialize(document) {
            Ok(value @ Value::Mapping(_)) => values.push(value),
            Ok(Value::Null) => log::debug!("looks like the manifest is empty, skipping it"),
            Ok(_) => log::debug!("manifest is not a mapping, skipping it"),
            Err(e) => {
                log::debug!("manifest could not be parsed, skipping it: {}", e);
                break;
            }
        }
    }
    values
}

/// Parse the first mapping of a piece, tolerating garbage.
///
/// Returns `None` for empty, comment-only, unparsable or non-mapping
/// documents.
pub fn parse_document(document: &str) -> Option<Value> {
    parse_documents(document).into_iter().next()
}

/// Read the top-level `kind` of a parsed document.
///
/// An empty mapping yields `Ok(None)`.
pub fn kind_of(value: &Value) -> Result<Option<&str>> {
    let Some(mapping) = value.as_mapping() else {
        return Ok(None);
    };
    if mapping.is_empty() {
        return Ok(None);
    }

    match mapping.get("kind").and_then(Value::as_str) {
        Some(kind) => Ok(Some(kind)),
        None => Err(ImagesError::Extraction(
            "failed to get kind from the manifest".to_string(),
        )),
    }
}

/// Read `metadata.name` of a parsed document.
///
/// A missing `metadata` block yields an empty name. A `metadata` whose
/// `name` is not a string is an error.
pub fn name_of(value: &Value) -> Result<&str> {
    let Some(metadata) = value.get("metadata").filter(|m| m.is_mapping()) else {
        log::warn!("failed to get 'metadata' from the manifest");
        return Ok("");
    };

    metadata.get("name").and_then(Value::as_str).ok_or_else(|| {
        ImagesError::Extraction(
            "failed to get name from the manifest, 'name' is not type string".to_string(),
        )
    })
}

/// Classify the kind of a raw document.
pub fn classify_kind(document: &str) -> Result<Option<String>> {
    match parse_document(document) {
        Some(value) => Ok(kind_of(&value)?.map(str::to_string)),
        None => Ok(None),
    }
}

/// Classify the name of a raw document.
pub fn classify_name(document: &str) -> Result<String> {
    match parse_document(document) {
        Some(value) => Ok(name_of(&value)?.to_string()),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_deployment() {
        let doc = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n";
        assert_eq!(classify_kind(doc).unwrap(), Some("Deployment".to_string()));
        assert_eq!(classify_name(doc).unwrap(), "web");
    }

    #[test]
    fn test_empty_documents_are_not_errors() {
        assert_eq!(classify_kind("").unwrap(), None);
        assert_eq!(classify_kind("\n# only a comment\n").unwrap(), None);
        assert_eq!(classify_kind("{}").unwrap(), None);
        assert_eq!(classify_kind("- a\n- b\n").unwrap(), None);
        assert_eq!(classify_kind("key: [unterminated").unwrap(), None);
    }

    #[test]
    fn test_extra_document_markers() {
        let trailing = "kind: Deployment\nmetadata:\n  name: web\n---\n";
        assert_eq!(classify_kind(trailing).unwrap(), Some("Deployment".to_string()));

        let leading = "---\n# comment\n---\nkind: Pod\n";
        assert_eq!(classify_kind(leading).unwrap(), Some("Pod".to_string()));

        let two = "kind: Deployment\n---\nkind: Pod\n";
        let kinds: Vec<String> = parse_documents(two)
            .iter()
            .map(|v| kind_of(v).unwrap().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["Deployment", "Pod"]);
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let err = classify_kind(r#"{"notkind": "x"}"#).unwrap_err();
        assert_eq!(err.to_string(), "failed to get kind from the manifest");

        assert!(classify_kind("kind: 42\n").is_err());
    }

    #[test]
    fn test_name_policy() {
        assert_eq!(classify_name("kind: ConfigMap\n").unwrap(), "");
        assert!(classify_name("kind: ConfigMap\nmetadata:\n  name: 7\n").is_err());
        assert!(classify_name("kind: ConfigMap\nmetadata:\n  labels: {}\n").is_err());
    }
}
