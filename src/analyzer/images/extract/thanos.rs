//! Extractors for thanos-operator `Thanos` and `Receiver` resources.
//!
//! Both are multi-component: every component may carry its own workload
//! override, and all of their containers end up in one flat list.

use super::container::{PodSpecShape, TemplatedSpec, Workload, container_images};
use super::Manifest;
use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::ImageRecord;
use crate::error::Result;
use k8s_openapi::api::core::v1::Container;
use serde::Deserialize;

type Override = Option<Workload<TemplatedSpec>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleComponent {
    statefulset_overrides: Override,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeploymentComponent {
    deployment_overrides: Override,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThanosSpec {
    rule: Option<RuleComponent>,
    query: Option<DeploymentComponent>,
    store_gateway: Option<DeploymentComponent>,
    query_frontend: Option<DeploymentComponent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiverGroup {
    stateful_set_overrides: Override,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiverSpec {
    receiver_groups: Option<Vec<ReceiverGroup>>,
}

fn override_pod_spec(overrides: &Override) -> Option<&PodSpecShape> {
    overrides.as_ref()?.spec.as_ref()?.pod_spec()
}

fn override_containers(overrides: &Override) -> Vec<&Container> {
    override_pod_spec(overrides)
        .map(PodSpecShape::all_containers)
        .unwrap_or_default()
}

/// Thanos: rule, query, store-gateway and query-frontend overrides, in that order.
pub fn extract_thanos(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let thanos: Workload<ThanosSpec> = manifest.decode()?;
    let Some(spec) = thanos.spec else {
        return Ok(manifest.record(Vec::new()));
    };

    let mut containers = Vec::new();
    if let Some(rule) = &spec.rule {
        containers.extend(override_containers(&rule.statefulset_overrides));
    }
    for component in [&spec.query, &spec.store_gateway, &spec.query_frontend]
        .into_iter()
        .flatten()
    {
        containers.extend(override_containers(&component.deployment_overrides));
    }

    Ok(manifest.record(container_images(containers)))
}

/// Receiver: one override per receiver group.
pub fn extract_receiver(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let receiver: Workload<ReceiverSpec> = manifest.decode()?;
    let containers: Vec<&Container> = receiver
        .spec
        .iter()
        .flat_map(|spec| spec.receiver_groups.iter().flatten())
        .flat_map(|group| override_containers(&group.stateful_set_overrides))
        .collect();

    Ok(manifest.record(container_images(containers)))
}
