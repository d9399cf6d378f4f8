//! Pod template shapes and container image collection.
//!
//! The shapes only carry what image extraction reads. Every level is
//! optional so partial overrides (common in operator CRDs) decode fine;
//! the containers themselves are the upstream typed `Container`.

use k8s_openapi::api::core::v1::Container;
use serde::Deserialize;

/// Container args that carry an image reference for an operator-managed sidecar.
pub const IMAGE_ARG_FLAGS: [&str; 3] = [
    "--prometheus-config-reloader",
    "--thanos-default-base-image",
    "--acme-http01-solver-image",
];

/// The container lists of a pod spec.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecShape {
    #[serde(default)]
    pub containers: Option<Vec<Container>>,
    #[serde(default)]
    pub init_containers: Option<Vec<Container>>,
}

impl PodSpecShape {
    /// Main containers followed by init containers.
    pub fn all_containers(&self) -> Vec<&Container> {
        let mut containers: Vec<&Container> = self.containers.iter().flatten().collect();
        containers.extend(self.init_containers.iter().flatten());
        containers
    }
}

/// `template` of a workload: `{ spec: PodSpec }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodTemplateShape {
    #[serde(default)]
    pub spec: Option<PodSpecShape>,
}

/// A spec that owns a pod template (Deployment, StatefulSet, Job, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatedSpec {
    #[serde(default)]
    pub template: Option<PodTemplateShape>,
}

impl TemplatedSpec {
    pub fn pod_spec(&self) -> Option<&PodSpecShape> {
        self.template.as_ref()?.spec.as_ref()
    }
}

/// An object with a `spec` of shape `S`.
#[derive(Debug, Clone, Deserialize)]
pub struct Workload<S> {
    pub spec: Option<S>,
}

/// Collect the `image` of each container, in order.
pub fn container_images<'a>(containers: impl IntoIterator<Item = &'a Container>) -> Vec<String> {
    containers
        .into_iter()
        .filter_map(|c| c.image.as_deref())
        .filter(|image| !image.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect images passed to containers as `--flag=image` args.
///
/// kube-prometheus-stack and cert-manager hand sidecar images to their
/// operators this way.
pub fn images_from_args<'a>(containers: impl IntoIterator<Item = &'a Container>) -> Vec<String> {
    containers
        .into_iter()
        .flat_map(|c| c.args.iter().flatten())
        .filter_map(|arg| image_from_arg(arg))
        .collect()
}

fn image_from_arg(arg: &str) -> Option<String> {
    let (flag, value) = arg.split_once('=')?;
    if value.contains('=') || !IMAGE_ARG_FLAGS.contains(&flag) {
        return None;
    }
    Some(value.to_string())
}
