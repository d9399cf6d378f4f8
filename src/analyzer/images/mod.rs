//! Container image extraction from rendered Helm manifests.
//!
//! Takes the multi-document stream produced by `helm template` or
//! `helm get manifest` and reports the images every resource would pull.
//!
//! # Features
//!
//! - Built-in workloads (Deployment, StatefulSet, DaemonSet, ReplicaSet, Job, CronJob, Pod)
//! - prometheus-operator, grafana-operator and thanos-operator custom resources
//! - Images passed to operators through `--flag=image` container arguments
//! - ConfigMap payload scanning (YAML, JSON and plain values)
//! - Registry allow-listing, per-resource and global deduplication
//! - List, JSON, YAML, table and CSV output
//!
//! # Example
//!
//! ```rust,ignore
//! use chart_images::analyzer::images::{extract_images, ExtractionPolicy, ExtractorTable};
//!
//! let raw = std::fs::read("rendered.yaml")?;
//! let policy = ExtractionPolicy::default().unique(true);
//! let records = extract_images(&raw, &policy, &ExtractorTable::builtin())?;
//!
//! for record in records {
//!     println!("{} {}: {}", record.kind, record.name, record.images.join(", "));
//! }
//! ```
//!
//! # Pipeline
//!
//! 1. [`parser::split_manifests`] cuts the stream on the `# Source:` marker
//! 2. [`parser::kind_of`] / [`parser::name_of`] classify each document
//! 3. [`skip::should_skip`] drops resources named by skip rules
//! 4. The [`ExtractorTable`] routes the document to its kind's extractor
//! 5. [`filter::filter_records`] applies uniqueness, then registry prefixes
//! 6. [`output::shape`] and [`formatter`] turn records into text

pub mod config;
pub mod extract;
pub mod filter;
pub mod formatter;
pub mod output;
pub mod parser;
pub mod run;
pub mod skip;
pub mod types;

pub use config::ExtractionPolicy;
pub use extract::{ExtractFn, ExtractorTable, Manifest};
pub use formatter::{format_releases_to_string, format_to_string};
pub use output::{OutputMode, Shaped, shape};
pub use run::extract_images;
pub use skip::ReleaseSkip;
pub use types::{ImageRecord, ReleaseImages, SkipRule, WorkloadKind};
