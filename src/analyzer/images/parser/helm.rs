//! Helm invocation for obtaining rendered manifests.
//!
//! Shells out to the `helm` binary: `helm template` renders a chart
//! locally, `helm get manifest` fetches a deployed release and
//! `helm list` enumerates releases. The extraction core never calls this
//! module; handlers do, and hand the raw bytes over.

use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

/// Environment variable Helm sets for plugins.
pub const HELM_BIN_ENV: &str = "HELM_BIN";

/// Flags passed through to `helm template`.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    /// `--set` values
    pub values: Vec<String>,
    /// `--set-string` values
    pub string_values: Vec<String>,
    /// `--set-file` values
    pub file_values: Vec<String>,
    /// `--values` files
    pub value_files: Vec<PathBuf>,
    /// `--show-only` templates
    pub show_only: Vec<String>,
    /// `--version` chart version constraint
    pub version: Option<String>,
    /// `--namespace`
    pub namespace: Option<String>,
    pub skip_tests: bool,
    pub skip_crds: bool,
    pub validate: bool,
    pub debug: bool,
}

/// A deployed release, as reported by `helm list -o json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Client for the helm binary.
#[derive(Debug, Clone)]
pub struct HelmClient {
    binary: PathBuf,
}

impl HelmClient {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolve the binary from `$HELM_BIN`, then the configured path, then `helm`.
    pub fn from_env(configured: Option<&str>) -> Self {
        let binary = std::env::var(HELM_BIN_ENV)
            .ok()
            .filter(|b| !b.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| "helm".to_string());
        Self::new(binary)
    }

    /// Render a chart locally with `helm template`.
    pub fn template(
        &self,
        release: &str,
        chart: &str,
        options: &TemplateOptions,
    ) -> Result<Vec<u8>, HelmError> {
        let args = template_args(release, chart, options);
        log::debug!(
            "rendering helm chart with following commands/flags '{}'",
            args.join(", ")
        );
        self.run(&args)
    }

    /// Fetch the manifest of a deployed release with `helm get manifest`.
    pub fn release_manifest(
        &self,
        release: &str,
        namespace: Option<&str>,
        revision: Option<u32>,
    ) -> Result<Vec<u8>, HelmError> {
        log::debug!("fetching chart manifest for release '{}' from kube cluster", release);

        let mut args = vec!["get".to_string(), "manifest".to_string(), release.to_string()];
        if let Some(namespace) = namespace {
            args.push("--namespace".to_string());
            args.push(namespace.to_string());
        }
        if let Some(revision) = revision {
            args.push("--revision".to_string());
            args.push(revision.to_string());
        }
        self.run(&args)
    }

    /// List deployed releases, across all namespaces when `namespace` is `None`.
    pub fn list_releases(&self, namespace: Option<&str>) -> Result<Vec<ReleaseInfo>, HelmError> {
        let mut args = vec!["list".to_string(), "--output".to_string(), "json".to_string()];
        match namespace {
            Some(namespace) => {
                args.push("--namespace".to_string());
                args.push(namespace.to_string());
            }
            None => args.push("--all-namespaces".to_string()),
        }

        let output = self.run(&args)?;
        parse_release_list(&output)
    }

    fn run(&self, args: &[String]) -> Result<Vec<u8>, HelmError> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => HelmError::NotFound(self.binary.display().to_string()),
                _ => HelmError::Command(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("helm {} errored with {}", args.join(" "), stderr.trim());
            return Err(HelmError::Command(stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }
}

/// Build the argument list for `helm template`.
pub fn template_args(release: &str, chart: &str, options: &TemplateOptions) -> Vec<String> {
    let mut args = vec![
        "template".to_string(),
        release.to_string(),
        chart.to_string(),
    ];

    let mut push_all = |flag: &str, values: &[String]| {
        for value in values {
            args.push(flag.to_string());
            args.push(value.clone());
        }
    };
    push_all("--set", &options.values);
    push_all("--set-string", &options.string_values);
    push_all("--show-only", &options.show_only);
    push_all("--set-file", &options.file_values);

    for file in &options.value_files {
        args.push("--values".to_string());
        args.push(file.display().to_string());
    }
    if let Some(version) = &options.version {
        args.push("--version".to_string());
        args.push(version.clone());
    }
    if let Some(namespace) = &options.namespace {
        args.push("--namespace".to_string());
        args.push(namespace.clone());
    }
    if options.debug {
        args.push("--debug".to_string());
    }
    if options.skip_tests {
        args.push("--skip-tests".to_string());
    }
    if options.skip_crds {
        args.push("--skip-crds".to_string());
    }
    if options.validate {
        args.push("--validate".to_string());
    }

    args
}

/// Parse the JSON emitted by `helm list -o json`.
pub fn parse_release_list(output: &[u8]) -> Result<Vec<ReleaseInfo>, HelmError> {
    if output.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(output).map_err(|e| HelmError::Command(format!("unexpected release list: {}", e)))
}

/// Helm invocation errors.
#[derive(Debug, Clone)]
pub enum HelmError {
    /// Helm binary not found.
    NotFound(String),
    /// Helm ran but failed, or its output was unusable.
    Command(String),
}

impl std::fmt::Display for HelmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(binary) => write!(f, "helm binary '{}' not found", binary),
            Self::Command(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for HelmError {}
