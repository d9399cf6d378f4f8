//! Error types for chart-images
//!
//! Every stage of the pipeline reports through [`ImagesError`]. Only
//! [`ImagesError::GrafanaApiVersion`] is recoverable per resource; all
//! other variants abort the run.

use crate::analyzer::images::parser::helm::HelmError;
use thiserror::Error;

/// Errors raised while acquiring, extracting or rendering images.
#[derive(Debug, Error)]
pub enum ImagesError {
    /// A manifest presents an object but lacks a routable field
    #[error("{0}")]
    Extraction(String),

    /// A manifest could not be decoded into the shape its kind requires
    #[error("failed to decode {kind} '{name}': {source}")]
    Parse {
        kind: String,
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Grafana resource declared with the legacy API group
    #[error("plugin supports the latest api version and '{api_version}' is not supported")]
    GrafanaApiVersion { api_version: String },

    /// A separator or ConfigMap pattern failed to compile
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A `kind=name` resource skip could not be parsed
    #[error("unable to parse resource skip '{0}', expected KIND=NAME")]
    InvalidSkipRule(String),

    /// A `name=namespace` release skip could not be parsed
    #[error("unable to parse release skip '{0}', expected NAME=NAMESPACE")]
    InvalidReleaseSkip(String),

    /// Command-line arguments that cannot be combined
    #[error("{0}")]
    Usage(String),

    #[error("Helm error: {0}")]
    Helm(#[from] HelmError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ImagesError {
    /// Whether the run may log this error, skip the resource and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::GrafanaApiVersion { .. })
    }
}

/// Result type alias for chart-images operations
pub type Result<T> = std::result::Result<T, ImagesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_grafana_version_is_recoverable() {
        let grafana = ImagesError::GrafanaApiVersion {
            api_version: "integreatly.org/v1alpha1".to_string(),
        };
        assert!(grafana.is_recoverable());
        assert!(grafana.to_string().contains("integreatly.org/v1alpha1"));

        let structural = ImagesError::Extraction("failed to get kind from the manifest".into());
        assert!(!structural.is_recoverable());
    }
}
