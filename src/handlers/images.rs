use crate::analyzer::images::{
    ExtractionPolicy, ExtractorTable, OutputMode, ReleaseImages, Shaped, extract_images,
    format_releases_to_string, format_to_string, shape,
    parser::helm::{HelmClient, ReleaseInfo, TemplateOptions},
    skip::filter_releases,
};
use crate::cli::{AllArgs, GetArgs};
use crate::config::Config;
use crate::error::{ImagesError, Result};
use std::io::Read;
use std::path::Path;

/// Release name used when only a chart is given.
const DEFAULT_RELEASE: &str = "sample";

/// List images of one chart, release or raw manifest.
pub fn handle_get(args: GetArgs, config: &Config) -> Result<String> {
    let policy = config.to_policy(&args.extract.overrides())?;
    let mode = OutputMode::from(args.extract.output);

    let raw = match &args.raw {
        Some(path) => read_raw(path)?,
        None => {
            let helm = HelmClient::from_env(config.helm.binary.as_deref());
            fetch_manifest(&helm, &args)?
        }
    };

    let records = extract_images(&raw, &policy, &ExtractorTable::builtin())?;
    format_to_string(&shape(records, mode, policy.unique), mode)
}

/// List images of every deployed release.
pub fn handle_all(args: AllArgs, config: &Config) -> Result<String> {
    let policy = config.to_policy(&args.extract.overrides())?;
    let mode = OutputMode::from(args.extract.output);
    let table = ExtractorTable::builtin();
    let helm = HelmClient::from_env(config.helm.binary.as_deref());

    let releases = filter_releases(
        helm.list_releases(args.namespace.as_deref())?,
        &args.skip_releases,
    );
    log::debug!("fetching images from {} release(s)", releases.len());

    let mut shaped = Vec::with_capacity(releases.len());
    for release in releases {
        let raw = helm.release_manifest(&release.name, Some(&release.namespace), None)?;
        shaped.extend(release_images(release, &raw, &policy, &table, mode)?);
    }

    format_releases_to_string(&shaped, mode)
}

/// Shaped images of one release, or `None` when it has none.
fn release_images(
    release: ReleaseInfo,
    raw: &[u8],
    policy: &ExtractionPolicy,
    table: &ExtractorTable,
    mode: OutputMode,
) -> Result<Option<ReleaseImages<Shaped>>> {
    let images = shape(extract_images(raw, policy, table)?, mode, policy.unique);
    if images.is_empty() {
        log::info!(
            "no images found in release '{}' of namespace '{}'",
            release.name,
            release.namespace
        );
        return Ok(None);
    }
    Ok(Some(ReleaseImages {
        release: release.name,
        namespace: release.namespace,
        images,
    }))
}

/// Supported kinds, one per line.
pub fn handle_kinds() -> String {
    ExtractorTable::builtin()
        .kinds()
        .iter()
        .map(|kind| format!("{}\n", kind))
        .collect()
}

/// Version information in the `images version: {...}` form.
pub fn handle_version() -> Result<String> {
    let info = serde_json::json!({
        "version": crate::VERSION,
        "package": env!("CARGO_PKG_NAME"),
    });
    Ok(format!("images version: {}\n", serde_json::to_string(&info)?))
}

fn read_raw(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        log::debug!("reading rendered manifest from stdin");
        let mut raw = Vec::new();
        std::io::stdin().read_to_end(&mut raw)?;
        return Ok(raw);
    }
    log::debug!("reading rendered manifest from {}", path.display());
    Ok(std::fs::read(path)?)
}

fn fetch_manifest(helm: &HelmClient, args: &GetArgs) -> Result<Vec<u8>> {
    if args.from_release {
        return match (&args.release, &args.chart) {
            (Some(release), None) => Ok(helm.release_manifest(
                release,
                args.namespace.as_deref(),
                args.revision,
            )?),
            _ => Err(ImagesError::Usage(
                "--from-release takes exactly one argument, the release name".to_string(),
            )),
        };
    }

    let (release, chart) = match (&args.release, &args.chart) {
        (Some(release), Some(chart)) => (release.as_str(), chart.as_str()),
        (Some(chart), None) => (DEFAULT_RELEASE, chart.as_str()),
        _ => {
            return Err(ImagesError::Usage(
                "a chart is required, as [RELEASE] CHART, or use --raw".to_string(),
            ));
        }
    };

    let options = TemplateOptions {
        values: args.values.clone(),
        string_values: args.string_values.clone(),
        file_values: args.file_values.clone(),
        value_files: args.value_files.clone(),
        show_only: args.show_only.clone(),
        version: args.version.clone(),
        namespace: args.namespace.clone(),
        skip_tests: args.skip_tests,
        skip_crds: args.skip_crds,
        validate: args.validate,
        debug: log::log_enabled!(log::Level::Debug),
    };
    Ok(helm.template(release, chart, &options)?)
}
