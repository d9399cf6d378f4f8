//! Generic value tree for free-form ConfigMap payloads.
//!
//! YAML and JSON payloads are decoded into [`ValueTree`] so that the
//! image-key search is a plain structural recursion, independent of
//! which decoder produced the tree.

use regex::Regex;

/// Decoded payload of unknown shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTree {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ValueTree>),
    Map(Vec<(String, ValueTree)>),
}

impl ValueTree {
    /// Collect every non-empty string value whose key matches `pattern`,
    /// at any depth through maps and lists of maps.
    ///
    /// Keys are lower-cased before matching. A matching key whose value is
    /// itself a map or list is still descended into.
    pub fn find_images(&self, pattern: &Regex) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_images(pattern, &mut found);
        found
    }

    fn collect_images(&self, pattern: &Regex, found: &mut Vec<String>) {
        match self {
            Self::Map(entries) => {
                for (key, value) in entries {
                    if pattern.is_match(&key.to_lowercase()) {
                        if let Self::String(image) = value {
                            if !image.is_empty() {
                                log::debug!("found image '{}' under key '{}'", image, key);
                                found.push(image.clone());
                            }
                        }
                    }
                    value.collect_images(pattern, found);
                }
            }
            Self::List(items) => {
                for item in items {
                    if matches!(item, Self::Map(_)) {
                        item.collect_images(pattern, found);
                    }
                }
            }
            _ => {}
        }
    }

    /// Whether the tree is a container (map or list) rather than a scalar.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Map(_) | Self::List(_))
    }
}

impl From<serde_yaml::Value> for ValueTree {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => Self::String(s),
            Value::Sequence(seq) => Self::List(seq.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Self::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

impl From<serde_json::Value> for ValueTree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Mapping keys are usually strings, but YAML allows scalars of any type.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_pattern() -> Regex {
        Regex::new("image").unwrap()
    }

    #[test]
    fn test_find_images_in_yaml() {
        let yaml = r#"image: 'ghcr.io/example/sample:v2.2.0'
enemies: aliens
lives: '3'
config:
  image: 'ghcr.io/example/config:v2.3.0'
  testConfig:
    image: 'ghcr.io/example/testConfig:v2.3.0'"#;
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let tree = ValueTree::from(value);

        assert_eq!(
            tree.find_images(&image_pattern()),
            vec![
                "ghcr.io/example/sample:v2.2.0",
                "ghcr.io/example/config:v2.3.0",
                "ghcr.io/example/testConfig:v2.3.0",
            ]
        );
    }

    #[test]
    fn test_find_images_in_json_matches_key_case_insensitively() {
        let json = r#"{
          "prometheusImage": "ghcr.io/prometheus/prom:v2.0.0",
          "image": "ghcr.io/example/sample:v2.2.0",
          "lives": "3",
          "config": { "image": "ghcr.io/example/config:v2.3.0" }
        }"#;
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        let mut found = ValueTree::from(value).find_images(&image_pattern());
        found.sort();

        assert_eq!(
            found,
            vec![
                "ghcr.io/example/config:v2.3.0",
                "ghcr.io/example/sample:v2.2.0",
                "ghcr.io/prometheus/prom:v2.0.0",
            ]
        );
    }

    #[test]
    fn test_find_images_through_lists_of_maps() {
        let yaml = r#"
sidecars:
  - name: a
    image: busybox:1.36
  - plain-string
  - name: b
    nested:
      initImage: alpine:3.19
images:
  - not-collected
emptyImage: ""
"#;
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let found = ValueTree::from(value).find_images(&image_pattern());
        assert_eq!(found, vec!["busybox:1.36", "alpine:3.19"]);
    }

    #[test]
    fn test_scalar_tree_has_no_images() {
        let tree = ValueTree::String("image".into());
        assert!(tree.find_images(&image_pattern()).is_empty());
        assert!(!tree.is_structured());
    }
}
