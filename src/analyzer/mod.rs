//! # Analyzer Module
//!
//! Extraction of container images from rendered Kubernetes manifests.

pub mod images;
