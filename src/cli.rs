use crate::analyzer::images::output::OutputMode;
use crate::analyzer::images::skip::ReleaseSkip;
use crate::analyzer::images::types::{SkipRule, WorkloadKind};
use crate::config::PolicyOverrides;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chart-images")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the container images a Helm chart or release would pull")]
#[command(long_about = "Renders a chart (or fetches a deployed release), splits the manifest into resources and reports every image referenced by workloads, monitoring operator resources and ConfigMaps.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List images of one chart or release
    Get(GetArgs),

    /// List images of every deployed release
    All(AllArgs),

    /// Show the resource kinds images are extracted from
    Kinds,

    /// Show version information
    Version,
}

/// Flags shared by every extracting command.
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Only keep images from these registries (comma separated prefixes)
    #[arg(short = 'r', long = "registry", value_delimiter = ',', value_name = "REGISTRY")]
    pub registries: Vec<String>,

    /// Only extract from these kinds (comma separated)
    #[arg(short = 'k', long = "kind", value_delimiter = ',', value_name = "KIND")]
    pub kinds: Vec<WorkloadKind>,

    /// Regex used to split the rendered manifest into resources
    #[arg(long = "image-regex", value_name = "REGEX")]
    pub image_regex: Option<String>,

    /// Regex matched against ConfigMap keys to find images
    #[arg(long, value_name = "REGEX")]
    pub configmap_image_pattern: Option<String>,

    /// Only list unique images
    #[arg(short, long)]
    pub unique: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "list")]
    pub output: OutputFormat,

    /// Skip a resource, as KIND=NAME (repeatable, case-insensitive)
    #[arg(long = "skip-resource", value_name = "KIND=NAME", value_parser = parse_skip_rule)]
    pub skip_resources: Vec<SkipRule>,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Release name, or the chart when it is the only argument
    #[arg(value_name = "RELEASE")]
    pub release: Option<String>,

    /// Chart reference or path
    #[arg(value_name = "CHART")]
    pub chart: Option<String>,

    /// Read the manifest of a deployed release instead of rendering a chart
    #[arg(long)]
    pub from_release: bool,

    /// Read a rendered manifest from FILE ('-' for stdin)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["from_release", "release", "chart"])]
    pub raw: Option<PathBuf>,

    /// Release revision to read with --from-release
    #[arg(long, requires = "from_release")]
    pub revision: Option<u32>,

    /// Values files passed to helm template
    #[arg(short = 'f', long = "values", value_name = "FILE")]
    pub value_files: Vec<PathBuf>,

    /// Values passed to helm template (--set)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub values: Vec<String>,

    /// String values passed to helm template (--set-string)
    #[arg(long = "set-string", value_name = "KEY=VALUE")]
    pub string_values: Vec<String>,

    /// Values read from files (--set-file)
    #[arg(long = "set-file", value_name = "KEY=PATH")]
    pub file_values: Vec<String>,

    /// Only render these templates
    #[arg(short = 's', long = "show-only", value_name = "TEMPLATE")]
    pub show_only: Vec<String>,

    /// Chart version constraint
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Namespace of the release
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Skip tests from templated output
    #[arg(long)]
    pub skip_tests: bool,

    /// Skip CRDs from templated output
    #[arg(long)]
    pub skip_crds: bool,

    /// Validate manifests against the cluster while rendering
    #[arg(long)]
    pub validate: bool,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    /// Only list releases of this namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Skip a release, as NAME=NAMESPACE (repeatable)
    #[arg(long = "skip-release", value_name = "NAME=NAMESPACE", value_parser = parse_release_skip)]
    pub skip_releases: Vec<ReleaseSkip>,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    List,
    Json,
    Yaml,
    Table,
    Csv,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::List => OutputMode::List,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Yaml => OutputMode::Yaml,
            OutputFormat::Table => OutputMode::Table,
            OutputFormat::Csv => OutputMode::Csv,
        }
    }
}

impl ExtractArgs {
    /// Policy settings given by these flags.
    pub fn overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            registries: self.registries.clone(),
            kinds: self.kinds.clone(),
            unique: self.unique,
            separator_pattern: self.image_regex.clone(),
            configmap_image_pattern: self.configmap_image_pattern.clone(),
            skip_resources: self.skip_resources.clone(),
        }
    }
}

fn parse_skip_rule(value: &str) -> Result<SkipRule, String> {
    SkipRule::parse(value).map_err(|e| e.to_string())
}

fn parse_release_skip(value: &str) -> Result<ReleaseSkip, String> {
    ReleaseSkip::parse(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("chart-images").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_get_flags() {
        let cli = parse(&[
            "get", "web", "./chart", "-r", "quay.io,ghcr.io", "-k", "deployment,Receiver",
            "--skip-resource", "ConfigMap=cfg", "-u", "-o", "yaml", "--set", "a=b",
        ]);
        let Commands::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.release.as_deref(), Some("web"));
        assert_eq!(args.chart.as_deref(), Some("./chart"));
        assert_eq!(args.extract.registries, vec!["quay.io", "ghcr.io"]);
        assert_eq!(
            args.extract.kinds,
            vec![WorkloadKind::Deployment, WorkloadKind::ThanosReceiver]
        );
        assert_eq!(args.extract.skip_resources, vec![SkipRule::new("configmap", "cfg")]);
        assert!(args.extract.unique);
        assert_eq!(args.extract.output, OutputFormat::Yaml);
        assert_eq!(args.values, vec!["a=b"]);
    }

    #[test]
    fn test_raw_conflicts_with_release() {
        let result = Cli::try_parse_from(["chart-images", "get", "web", "--raw", "-"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_skip_values_are_rejected() {
        assert!(Cli::try_parse_from(["chart-images", "get", "--raw", "-", "--skip-resource", "web"]).is_err());
        assert!(Cli::try_parse_from(["chart-images", "all", "--skip-release", "web"]).is_err());
        assert!(Cli::try_parse_from(["chart-images", "get", "--raw", "-", "-k", "Service"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&["-vv", "all", "--skip-release", "traefik=kube-system", "-o", "json"]);
        assert_eq!(cli.verbose, 2);
        let Commands::All(args) = cli.command else {
            panic!("expected all");
        };
        assert_eq!(args.skip_releases.len(), 1);
        assert_eq!(args.extract.output, OutputFormat::Json);
    }
}
