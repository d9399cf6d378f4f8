//! # chart-images
//!
//! A Rust-based command-line application that lists the container images a
//! Helm chart or release would pull.
//!
//! ## Features
//!
//! - **Chart and Release Sources**: Renders charts with `helm template`, reads
//!   deployed releases with `helm get manifest`, or takes a raw manifest
//! - **Operator Aware**: Understands prometheus-operator, grafana-operator and
//!   thanos-operator resources, plus image flags passed to operators
//! - **ConfigMap Scanning**: Finds images inside YAML and JSON payloads
//! - **Filtering**: Registry allow-lists, resource skips and deduplication
//!
//! ## Example
//!
//! ```rust,no_run
//! use chart_images::{ExtractionPolicy, ExtractorTable, extract_images};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = std::fs::read("rendered.yaml")?;
//! let records = extract_images(&raw, &ExtractionPolicy::default(), &ExtractorTable::builtin())?;
//! for record in records {
//!     println!("{}/{}: {}", record.kind, record.name, record.images.join(", "));
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::images::{
    ExtractionPolicy, ExtractorTable, ImageRecord, OutputMode, SkipRule, WorkloadKind,
    extract_images,
};
pub use error::{ImagesError, Result};
pub use handlers::*;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
