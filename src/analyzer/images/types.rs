//! Core types for image extraction.
//!
//! - `WorkloadKind` - The closed set of kinds an extractor exists for
//! - `ImageRecord` - Images found in one resource
//! - `SkipRule` - A (kind, name) pair excluded before extraction
//! - `ReleaseImages` - Shaped output for one release in `all` mode

use crate::error::{ImagesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workload kinds with a built-in extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
    DaemonSet,
    ReplicaSet,
    Pod,
    CronJob,
    Job,
    ConfigMap,
    Alertmanager,
    Prometheus,
    ThanosRuler,
    Grafana,
    Thanos,
    ThanosReceiver,
}

impl WorkloadKind {
    /// Every built-in kind, in the order they are listed to users.
    pub const ALL: [WorkloadKind; 14] = [
        Self::Deployment,
        Self::StatefulSet,
        Self::DaemonSet,
        Self::CronJob,
        Self::Job,
        Self::ReplicaSet,
        Self::Pod,
        Self::Alertmanager,
        Self::Prometheus,
        Self::ThanosRuler,
        Self::Grafana,
        Self::Thanos,
        Self::ThanosReceiver,
        Self::ConfigMap,
    ];

    /// The `kind` string this variant carries in a manifest. Also used as
    /// the record label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
            Self::ReplicaSet => "ReplicaSet",
            Self::Pod => "Pod",
            Self::CronJob => "CronJob",
            Self::Job => "Job",
            Self::ConfigMap => "ConfigMap",
            Self::Alertmanager => "Alertmanager",
            Self::Prometheus => "Prometheus",
            Self::ThanosRuler => "ThanosRuler",
            Self::Grafana => "Grafana",
            Self::Thanos => "Thanos",
            Self::ThanosReceiver => "Receiver",
        }
    }

    /// Parse a kind from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let supported: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
            format!(
                "unsupported kind '{}', expected one of: {}",
                s,
                supported.join(", ")
            )
        })
    }
}

impl Serialize for WorkloadKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WorkloadKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Images found in one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "image", default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl ImageRecord {
    pub fn new(kind: impl Into<String>, name: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            images,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// A resource excluded from extraction. Both fields are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkipRule {
    pub kind: String,
    pub name: String,
}

impl SkipRule {
    pub fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.trim().to_lowercase(),
            name: name.trim().to_lowercase(),
        }
    }

    /// Parse a `KIND=NAME` operator value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once('=') {
            Some((kind, name)) if !kind.trim().is_empty() && !name.trim().is_empty() => {
                Ok(Self::new(kind, name))
            }
            _ => Err(ImagesError::InvalidSkipRule(value.to_string())),
        }
    }

    /// Whether this rule matches a resource. Inputs are compared case-insensitively.
    pub fn matches(&self, kind: &str, name: &str) -> bool {
        self.kind == kind.to_lowercase() && self.name == name.to_lowercase()
    }
}

/// Shaped images of one release, as emitted by the `all` command.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseImages<T> {
    pub release: String,
    #[serde(rename = "name_space", skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(rename = "images_from_release")]
    pub images: T,
}
