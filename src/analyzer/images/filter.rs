//! Registry and uniqueness filtering of extracted records.

use crate::analyzer::images::types::ImageRecord;

/// Apply the unique-only and registry-prefix policies to records.
///
/// Uniqueness runs first, per record. Registry filtering then keeps images
/// starting with a configured prefix, iterating prefixes outermost: an
/// image matching two prefixes is kept twice. Records left without images
/// are dropped.
pub fn filter_records(
    records: Vec<ImageRecord>,
    unique: bool,
    registries: &[String],
) -> Vec<ImageRecord> {
    if !unique && registries.is_empty() {
        return records;
    }

    let mut records = records;
    if unique {
        log::debug!("limiting to unique images since '--unique/-u' is enabled");
        records = retain_non_empty(records, |images| unique_images(images));
    }

    if !registries.is_empty() {
        log::debug!(
            "filtering images by the selected registries '{}' since '-r,--registry' is enabled",
            registries.join(", ")
        );
        records = retain_non_empty(records, |images| images_from_registries(images, registries));
    }

    records
}

fn retain_non_empty(
    records: Vec<ImageRecord>,
    reduce: impl Fn(&[String]) -> Vec<String>,
) -> Vec<ImageRecord> {
    records
        .into_iter()
        .filter_map(|mut record| {
            record.images = reduce(&record.images);
            (!record.images.is_empty()).then_some(record)
        })
        .collect()
}

/// Unique entries, in order of first occurrence.
pub fn unique_images(images: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    images
        .iter()
        .filter(|image| seen.insert(image.as_str()))
        .cloned()
        .collect()
}

/// Images starting with any of `registries`, prefixes outermost.
pub fn images_from_registries(images: &[String], registries: &[String]) -> Vec<String> {
    registries
        .iter()
        .flat_map(|registry| images.iter().filter(move |image| image.starts_with(registry.as_str())))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn records() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new(
                "DaemonSet",
                "prometheus-standalone-node-exporter",
                strings(&[
                    "quay.io/prometheus/node-exporter:v1.1.2",
                    "quay.io/prometheus/node-exporter:v1.1.2",
                ]),
            ),
            ImageRecord::new(
                "Deployment",
                "prometheus-standalone-server",
                strings(&[
                    "jimmidyson/configmap-reload:v0.5.0",
                    "prom/pushgateway:v1.3.1",
                    "jimmidyson/configmap-reload:v0.5.0",
                ]),
            ),
            ImageRecord::new(
                "StatefulSet",
                "prometheus-standalone-kube-state-metrics",
                strings(&["k8s.gcr.io/kube-state-metrics/kube-state-metrics:v2.0.0"]),
            ),
        ]
    }

    #[test]
    fn test_pass_through_without_policy() {
        assert_eq!(filter_records(records(), false, &[]), records());
    }

    #[test]
    fn test_unique_per_record() {
        let filtered = filter_records(records(), true, &[]);
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].images, strings(&["quay.io/prometheus/node-exporter:v1.1.2"]));
        assert_eq!(
            filtered[1].images,
            strings(&["jimmidyson/configmap-reload:v0.5.0", "prom/pushgateway:v1.3.1"])
        );
    }

    #[test]
    fn test_registry_filter_drops_empty_records() {
        let filtered = filter_records(records(), false, &strings(&["quay.io", "k8s.gcr.io"]));
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].kind, "DaemonSet");
        assert_eq!(filtered[0].images.len(), 2);
        assert_eq!(filtered[1].kind, "StatefulSet");
    }

    #[test]
    fn test_unique_then_registry() {
        let filtered = filter_records(records(), true, &strings(&["quay.io"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].images, strings(&["quay.io/prometheus/node-exporter:v1.1.2"]));
    }

    #[test]
    fn test_image_matching_two_prefixes_is_kept_twice() {
        let images = strings(&["quay.io/prometheus/prometheus:v2", "docker.io/nginx"]);
        let filtered = images_from_registries(&images, &strings(&["quay.io", "quay.io/prometheus"]));
        assert_eq!(
            filtered,
            strings(&["quay.io/prometheus/prometheus:v2", "quay.io/prometheus/prometheus:v2"])
        );
    }

    #[test]
    fn test_prefix_order_drives_output_order() {
        let images = strings(&["quay.io/a", "ghcr.io/b", "quay.io/c"]);
        let filtered = images_from_registries(&images, &strings(&["ghcr.io", "quay.io"]));
        assert_eq!(filtered, strings(&["ghcr.io/b", "quay.io/a", "quay.io/c"]));
    }

    proptest! {
        #[test]
        fn prop_unique_is_idempotent(images in prop::collection::vec("[a-c]{1,2}", 0..20)) {
            let once = unique_images(&images);
            prop_assert_eq!(unique_images(&once), once.clone());
            for image in &images {
                prop_assert!(once.contains(image));
            }
        }

        #[test]
        fn prop_registry_filter_selects_prefixed_subset(
            images in prop::collection::vec("(q|d|g)[a-c]{0,3}", 0..20),
            registries in prop::collection::vec("(q|d)[a-c]{0,1}", 1..4),
        ) {
            let filtered = images_from_registries(&images, &registries);
            for image in &filtered {
                prop_assert!(registries.iter().any(|r| image.starts_with(r.as_str())));
                prop_assert!(images.contains(image));
            }
            // each image appears once per matching prefix
            for image in &images {
                let matching = registries.iter().filter(|r| image.starts_with(r.as_str())).count();
                let input_count = images.iter().filter(|i| *i == image).count();
                let output_count = filtered.iter().filter(|i| *i == image).count();
                prop_assert_eq!(output_count, matching * input_count);
            }
        }
    }
}
