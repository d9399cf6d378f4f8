//! Splitting rendered Helm output into single-resource documents.

use regex::Regex;

/// Cut a rendered multi-document stream into per-resource documents.
///
/// Every resource is preceded by the separator marker, and so is the very
/// start of the stream, so the first piece is always an artifact and is
/// dropped. A stream with N markers yields exactly N documents. Documents
/// are not validated here.
pub fn split_manifests(raw: &[u8], separator: &Regex) -> Vec<String> {
    log::debug!(
        "splitting helm manifests with regex pattern: '{}'",
        separator.as_str()
    );

    let content = String::from_utf8_lossy(raw);
    separator
        .split(&content)
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::images::config::DEFAULT_SEPARATOR_PATTERN;
    use proptest::prelude::*;

    fn separator() -> Regex {
        Regex::new(DEFAULT_SEPARATOR_PATTERN).unwrap()
    }

    #[test]
    fn test_split_rendered_templates() {
        let rendered = r#"
---
# Source: prometheus/templates/alertmanager/clusterrole.yaml
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: prometheus-standalone-alertmanager
rules:
  []
---
# Source: tracing/templates/jaeger/configmap.yaml
apiVersion: v1
kind: ConfigMap
metadata:
  name: jaeger-ca-cert
"#;
        let docs = split_manifests(rendered.as_bytes(), &separator());
        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[0],
            "\napiVersion: rbac.authorization.k8s.io/v1\nkind: ClusterRole\nmetadata:\n  name: prometheus-standalone-alertmanager\nrules:\n  []\n"
        );
        assert!(docs[1].contains("name: jaeger-ca-cert"));
    }

    #[test]
    fn test_split_without_markers_is_empty() {
        let docs = split_manifests(b"apiVersion: v1\nkind: ConfigMap\n", &separator());
        assert!(docs.is_empty());
        assert!(split_manifests(b"", &separator()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_split_yields_one_document_per_marker(
            bodies in prop::collection::vec("[a-z]{1,8}: [a-z0-9]{0,8}\n", 0..12)
        ) {
            let mut stream = String::new();
            for (i, body) in bodies.iter().enumerate() {
                stream.push_str(&format!("---\n# Source: chart/templates/t{}.yaml\n", i));
                stream.push_str(body);
            }
            let docs = split_manifests(stream.as_bytes(), &separator());
            prop_assert_eq!(docs.len(), bodies.len());
            for (doc, body) in docs.iter().zip(bodies.iter()) {
                prop_assert_eq!(doc.trim_start_matches('\n'), body.as_str());
            }
        }
    }
}
