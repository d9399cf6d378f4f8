//! Extractors for core kinds that carry a pod spec.

use super::container::{PodSpecShape, TemplatedSpec, Workload, container_images, images_from_args};
use super::Manifest;
use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::types::ImageRecord;
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CronJobSpec {
    job_template: Option<Workload<TemplatedSpec>>,
}

/// Deployment, StatefulSet, DaemonSet, ReplicaSet and Job: `spec.template.spec`.
pub fn extract_templated(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let workload: Workload<TemplatedSpec> = manifest.decode()?;
    let pod_spec = workload.spec.as_ref().and_then(TemplatedSpec::pod_spec);
    Ok(manifest.record(pod_spec_images(pod_spec)))
}

/// Pod: `spec` is the pod spec itself.
pub fn extract_pod(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let pod: Workload<PodSpecShape> = manifest.decode()?;
    Ok(manifest.record(pod_spec_images(pod.spec.as_ref())))
}

/// CronJob: `spec.jobTemplate.spec.template.spec`.
pub fn extract_cronjob(manifest: &Manifest<'_>, _policy: &ExtractionPolicy) -> Result<ImageRecord> {
    let cronjob: Workload<CronJobSpec> = manifest.decode()?;
    let pod_spec = cronjob
        .spec
        .as_ref()
        .and_then(|spec| spec.job_template.as_ref())
        .and_then(|job| job.spec.as_ref())
        .and_then(TemplatedSpec::pod_spec);
    Ok(manifest.record(pod_spec_images(pod_spec)))
}

/// Container images (main, then init) followed by images passed via args.
fn pod_spec_images(pod_spec: Option<&PodSpecShape>) -> Vec<String> {
    let Some(pod_spec) = pod_spec else {
        return Vec::new();
    };
    let containers = pod_spec.all_containers();
    let mut images = container_images(containers.iter().copied());
    images.extend(images_from_args(containers));
    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::images::types::WorkloadKind;
    use crate::error::ImagesError;
    use serde_yaml::Value;

    fn extract(kind: WorkloadKind, yaml: &str) -> Result<ImageRecord> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let name = value["metadata"]["name"].as_str().unwrap_or_default().to_string();
        let manifest = Manifest::new(kind, &name, &value);
        let policy = ExtractionPolicy::default();
        match kind {
            WorkloadKind::Pod => extract_pod(&manifest, &policy),
            WorkloadKind::CronJob => extract_cronjob(&manifest, &policy),
            _ => extract_templated(&manifest, &policy),
        }
    }

    #[test]
    fn test_deployment_main_before_init_then_args() {
        let yaml = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: prometheus-operator
spec:
  selector:
    matchLabels:
      app: operator
  template:
    spec:
      containers:
      - name: a
        image: a:1
        args:
        - --prometheus-config-reloader=quay.io/prometheus-operator/prometheus-config-reloader:v0.70.0
      - name: b
        image: b:1
      initContainers:
      - name: c
        image: c:1
"#;
        let record = extract(WorkloadKind::Deployment, yaml).unwrap();
        assert_eq!(record.kind, "Deployment");
        assert_eq!(record.name, "prometheus-operator");
        assert_eq!(
            record.images,
            vec![
                "a:1",
                "b:1",
                "c:1",
                "quay.io/prometheus-operator/prometheus-config-reloader:v0.70.0"
            ]
        );
    }

    #[test]
    fn test_statefulset_uses_its_own_label() {
        let yaml = r#"
kind: StatefulSet
metadata:
  name: db
spec:
  template:
    spec:
      containers:
      - name: postgres
        image: postgres:16
"#;
        let record = extract(WorkloadKind::StatefulSet, yaml).unwrap();
        assert_eq!(record.kind, "StatefulSet");
        assert_eq!(record.images, vec!["postgres:16"]);
    }

    #[test]
    fn test_pod() {
        let yaml = r#"
apiVersion: v1
kind: Pod
metadata:
  name: test-connection
spec:
  containers:
  - name: wget
    image: busybox:1.36
"#;
        let record = extract(WorkloadKind::Pod, yaml).unwrap();
        assert_eq!(record.images, vec!["busybox:1.36"]);
    }

    #[test]
    fn test_cronjob_reaches_through_job_template() {
        let yaml = r#"
apiVersion: batch/v1
kind: CronJob
metadata:
  name: backup
spec:
  schedule: "0 * * * *"
  jobTemplate:
    spec:
      template:
        spec:
          restartPolicy: OnFailure
          containers:
          - name: backup
            image: restic/restic:0.16.0
          initContainers:
          - name: wait
            image: busybox:1.36
"#;
        let record = extract(WorkloadKind::CronJob, yaml).unwrap();
        assert_eq!(record.kind, "CronJob");
        assert_eq!(record.images, vec!["restic/restic:0.16.0", "busybox:1.36"]);
    }

    #[test]
    fn test_workload_without_template_has_no_images() {
        let record = extract(WorkloadKind::Job, "kind: Job\nmetadata:\n  name: j\n").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_malformed_containers_fail_to_decode() {
        let yaml = r#"
kind: Deployment
metadata:
  name: broken
spec:
  template:
    spec:
      containers: "nginx"
"#;
        let err = extract(WorkloadKind::Deployment, yaml).unwrap_err();
        assert!(matches!(err, ImagesError::Parse { .. }));
    }
}
