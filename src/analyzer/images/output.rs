//! Output shaping.
//!
//! Turns filtered records into the data a renderer needs: a flat list,
//! the records themselves, or a row matrix with a header row.

use crate::analyzer::images::filter::unique_images;
use crate::analyzer::images::types::ImageRecord;
use serde::Serialize;

/// Header row of tabular output.
pub const TABLE_HEADER: [&str; 3] = ["Name", "Kind", "Image"];

/// Output modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Newline-separated image list.
    #[default]
    List,
    Json,
    Yaml,
    Table,
    Csv,
}

/// Shaped output, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Shaped {
    Flat(Vec<String>),
    Structured(Vec<ImageRecord>),
    Tabular(Vec<Vec<String>>),
}

impl Shaped {
    /// Whether there is nothing to print beyond a header.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(images) => images.is_empty(),
            Self::Structured(records) => records.is_empty(),
            Self::Tabular(rows) => rows.len() <= 1,
        }
    }
}

/// Shape records for `mode`.
///
/// `unique` deduplicates the flattened list once more across records.
pub fn shape(records: Vec<ImageRecord>, mode: OutputMode, unique: bool) -> Shaped {
    match mode {
        OutputMode::List => Shaped::Flat(flatten(&records, unique)),
        OutputMode::Json | OutputMode::Yaml => Shaped::Structured(records),
        OutputMode::Table | OutputMode::Csv => Shaped::Tabular(rows(&records)),
    }
}

/// Every record's images in record order.
pub fn flatten(records: &[ImageRecord], unique: bool) -> Vec<String> {
    let images: Vec<String> = records
        .iter()
        .flat_map(|record| record.images.iter().cloned())
        .collect();

    if unique { unique_images(&images) } else { images }
}

/// Header row followed by one `(name, kind, images)` row per record.
pub fn rows(records: &[ImageRecord]) -> Vec<Vec<String>> {
    let header = TABLE_HEADER.iter().map(|cell| cell.to_string()).collect();
    std::iter::once(header)
        .chain(records.iter().map(|record| {
            vec![
                record.name.clone(),
                record.kind.clone(),
                record.images.join(", "),
            ]
        }))
        .collect()
}
