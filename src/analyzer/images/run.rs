//! The extraction run.
//!
//! Split the stream, classify and extract every document in parallel,
//! then apply the registry/uniqueness filter to the ordered results.

use crate::analyzer::images::config::ExtractionPolicy;
use crate::analyzer::images::extract::{ExtractorTable, Manifest};
use crate::analyzer::images::filter::filter_records;
use crate::analyzer::images::parser::{kind_of, name_of, parse_documents, split_manifests};
use crate::analyzer::images::skip::should_skip;
use crate::analyzer::images::types::ImageRecord;
use crate::error::Result;
use rayon::prelude::*;
use serde_yaml::Value;

/// Extract images from a rendered manifest stream.
///
/// Records come back in document order. Any hard error aborts the run;
/// no partial result is returned.
pub fn extract_images(
    raw: &[u8],
    policy: &ExtractionPolicy,
    table: &ExtractorTable,
) -> Result<Vec<ImageRecord>> {
    let documents = split_manifests(raw, &policy.separator);

    let extracted: Vec<Vec<ImageRecord>> = documents
        .par_iter()
        .map(|document| extract_piece(document, policy, table))
        .collect::<Result<_>>()?;

    let records: Vec<ImageRecord> = extracted
        .into_iter()
        .flatten()
        .filter(|record| !record.is_empty())
        .collect();

    Ok(filter_records(records, policy.unique, &policy.registries))
}

/// Extract every resource of one split piece, in order.
fn extract_piece(
    piece: &str,
    policy: &ExtractionPolicy,
    table: &ExtractorTable,
) -> Result<Vec<ImageRecord>> {
    let mut records = Vec::new();
    for value in parse_documents(piece) {
        records.extend(extract_document(&value, policy, table)?);
    }
    Ok(records)
}

/// Run one document through classification, skip rules and extraction.
fn extract_document(
    value: &Value,
    policy: &ExtractionPolicy,
    table: &ExtractorTable,
) -> Result<Option<ImageRecord>> {
    let Some(kind_str) = kind_of(value)? else {
        return Ok(None);
    };

    let Some((kind, extract)) = table.lookup(kind_str) else {
        log::debug!("kind '{}' is not supported at the moment", kind_str);
        return Ok(None);
    };

    if !policy.considers(kind) {
        log::debug!("kind '{}' is not selected, skipping", kind);
        return Ok(None);
    }

    let name = name_of(value)?;
    if should_skip(&policy.skip_rules, kind.as_str(), name) {
        return Ok(None);
    }

    let manifest = Manifest::new(kind, name, value);
    match extract(&manifest, policy) {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_recoverable() => {
            log::warn!("skipping {} '{}': {}", kind, name, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
