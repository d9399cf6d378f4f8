//! Renderers for shaped output.

pub mod csv;
pub mod json;
pub mod plain;
pub mod table;
pub mod yaml;

use crate::analyzer::images::output::{OutputMode, Shaped};
use crate::analyzer::images::types::ReleaseImages;
use crate::error::Result;
use colored::Colorize;

/// Render shaped output for one chart or release.
pub fn format_to_string(shaped: &Shaped, mode: OutputMode) -> Result<String> {
    match (shaped, mode) {
        (Shaped::Flat(images), _) => Ok(plain::format(images)),
        (Shaped::Structured(records), OutputMode::Yaml) => yaml::format(records),
        (Shaped::Structured(records), _) => json::format(records),
        (Shaped::Tabular(rows), OutputMode::Csv) => csv::format(rows),
        (Shaped::Tabular(rows), _) => Ok(table::format(rows)),
    }
}

/// Render shaped output of several releases.
pub fn format_releases_to_string(releases: &[ReleaseImages<Shaped>], mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => json::format(releases),
        OutputMode::Yaml => yaml::format(releases),
        OutputMode::List => {
            let mut output = String::new();
            for release in releases {
                output.push_str(&format_to_string(&release.images, mode)?);
            }
            Ok(output)
        }
        OutputMode::Table | OutputMode::Csv => {
            let mut output = String::new();
            for release in releases {
                let title = format!("{} ({})", release.release, release.namespace);
                output.push_str(&format!("{}\n", title.bold()));
                output.push_str(&format_to_string(&release.images, mode)?);
                output.push('\n');
            }
            Ok(output)
        }
    }
}
