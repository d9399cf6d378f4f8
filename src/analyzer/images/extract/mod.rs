//! Per-kind image extractors.
//!
//! Each built-in [`WorkloadKind`] owns one extraction function. The
//! [`ExtractorTable`] maps manifest kind strings to those functions and is
//! built once per run, then handed to the run function.

pub mod configmap;
pub mod container;
pub mod grafana;
pub mod monitoring;
pub mod thanos;
pub mod workload;

use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::{ImageRecord, WorkloadKind};
use crate::error::{ImagesError, Result};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::collections::HashMap;

/// A classified document ready for extraction.
#[derive(Debug, Clone, Copy)]
pub struct Manifest<'a> {
    pub kind: WorkloadKind,
    pub name: &'a str,
    pub value: &'a Value,
}

impl<'a> Manifest<'a> {
    pub fn new(kind: WorkloadKind, name: &'a str, value: &'a Value) -> Self {
        Self { kind, name, value }
    }

    /// Decode the document into the typed shape of its kind.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(self.value.clone()).map_err(|source| ImagesError::Parse {
            kind: self.kind.to_string(),
            name: self.name.to_string(),
            source,
        })
    }

    /// The declared `apiVersion`, if any.
    pub fn api_version(&self) -> Option<&'a str> {
        self.value.get("apiVersion").and_then(Value::as_str)
    }

    /// Wrap extracted images in a record labelled with this manifest's kind and name.
    pub fn record(&self, images: Vec<String>) -> ImageRecord {
        ImageRecord::new(self.kind.as_str(), self.name, images)
    }
}

/// Extraction strategy for one kind.
pub type ExtractFn = fn(&Manifest<'_>, &ExtractionPolicy) -> Result<ImageRecord>;

/// Kind string to extractor table.
#[derive(Debug, Clone)]
pub struct ExtractorTable {
    entries: HashMap<&'static str, (WorkloadKind, ExtractFn)>,
}

impl ExtractorTable {
    /// The table of every built-in kind.
    pub fn builtin() -> Self {
        let entries = WorkloadKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str(), (kind, extractor_for(kind))))
            .collect();
        Self { entries }
    }

    /// Find the extractor for a manifest `kind` string.
    pub fn lookup(&self, kind: &str) -> Option<(WorkloadKind, ExtractFn)> {
        self.entries.get(kind).copied()
    }

    /// Kinds this table can extract, sorted.
    pub fn kinds(&self) -> Vec<WorkloadKind> {
        let mut kinds: Vec<WorkloadKind> = self.entries.values().map(|(kind, _)| *kind).collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExtractorTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn extractor_for(kind: WorkloadKind) -> ExtractFn {
    match kind {
        WorkloadKind::Deployment
        | WorkloadKind::StatefulSet
        | WorkloadKind::DaemonSet
        | WorkloadKind::ReplicaSet
        | WorkloadKind::Job => workload::extract_templated,
        WorkloadKind::Pod => workload::extract_pod,
        WorkloadKind::CronJob => workload::extract_cronjob,
        WorkloadKind::Alertmanager => monitoring::extract_alertmanager,
        WorkloadKind::Prometheus => monitoring::extract_prometheus,
        WorkloadKind::ThanosRuler => monitoring::extract_thanos_ruler,
        WorkloadKind::Grafana => grafana::extract_grafana,
        WorkloadKind::Thanos => thanos::extract_thanos,
        WorkloadKind::ThanosReceiver => thanos::extract_receiver,
        WorkloadKind::ConfigMap => configmap::extract_configmap,
    }
}
