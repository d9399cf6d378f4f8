//! Extractors for prometheus-operator custom resources.
//!
//! Alertmanager, Prometheus and ThanosRuler each carry a top-level
//! `spec.image` next to optional container patches.

use super::container::{PodSpecShape, Workload, container_images};
use super::Manifest;
use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::ImageRecord;
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct MonitoringSpec {
    image: Option<String>,
    #[serde(flatten)]
    pod: PodSpecShape,
}

impl MonitoringSpec {
    fn image(&self) -> Option<String> {
        self.image.clone().filter(|image| !image.is_empty())
    }
}

/// Alertmanager: only `spec.image`.
pub fn extract_alertmanager(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let alertmanager: Workload<MonitoringSpec> = manifest.decode()?;
    let images = alertmanager
        .spec
        .as_ref()
        .and_then(MonitoringSpec::image)
        .into_iter()
        .collect();
    Ok(manifest.record(images))
}

/// Prometheus: container images, then `spec.image`.
pub fn extract_prometheus(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    containers_then_image(manifest)
}

/// ThanosRuler: container images, then `spec.image`.
pub fn extract_thanos_ruler(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    containers_then_image(manifest)
}

fn containers_then_image(manifest: &Manifest<'_>) -> Result<ImageRecord> {
    let resource: Workload<MonitoringSpec> = manifest.decode()?;
    let Some(spec) = resource.spec else {
        return Ok(manifest.record(Vec::new()));
    };

    let mut images = container_images(spec.pod.all_containers());
    images.extend(spec.image());
    Ok(manifest.record(images))
}
