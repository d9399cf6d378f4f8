//! Extractor for grafana-operator `Grafana` resources.

use super::container::{TemplatedSpec, Workload, container_images};
use super::Manifest;
use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::ImageRecord;
use crate::error::{ImagesError, Result};
use serde::Deserialize;

/// API version of the pre-v5 operator, whose schema is not supported.
pub const LEGACY_API_VERSION: &str = "integreatly.org/v1alpha1";

#[derive(Debug, Default, Deserialize)]
struct GrafanaSpec {
    deployment: Option<Workload<TemplatedSpec>>,
}

/// Grafana: `spec.deployment.spec.template.spec`.
///
/// Fails with [`ImagesError::GrafanaApiVersion`] for the legacy API
/// version; callers skip the resource and continue.
pub fn extract_grafana(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    if let Some(api_version) = manifest.api_version().filter(|v| *v == LEGACY_API_VERSION) {
        return Err(ImagesError::GrafanaApiVersion {
            api_version: api_version.to_string(),
        });
    }

    let grafana: Workload<GrafanaSpec> = manifest.decode()?;
    let images = grafana
        .spec
        .as_ref()
        .and_then(|spec| spec.deployment.as_ref())
        .and_then(|deployment| deployment.spec.as_ref())
        .and_then(TemplatedSpec::pod_spec)
        .map(|pod_spec| container_images(pod_spec.all_containers()))
        .unwrap_or_default();

    Ok(manifest.record(images))
}
