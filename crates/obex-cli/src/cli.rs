//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, extract, and validate a bundle in one pass
    Run(RunArgs),
    /// Fetch the bundle archive from a ConfigMap and write it to disk
    Fetch(FetchArgs),
    /// Extract a bundle archive into a directory
    Extract(ExtractArgs),
    /// Validate the manifests of an extracted bundle
    Validate(ValidateArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Flags describing where the bundle archive lives in the cluster.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Name of the ConfigMap holding the bundle
    #[arg(long, env = "CONFIGMAP_NAME", value_name = "NAME")]
    pub configmap: String,

    /// Namespace of the ConfigMap
    #[arg(long, env = "POD_NAMESPACE", value_name = "NAMESPACE")]
    pub namespace: String,

    /// binaryData key holding the archive bytes
    #[arg(long, default_value = "bundle", value_name = "KEY")]
    pub key: String,

    /// Path to a kubeconfig file (default: ~/.kube/config, falls back to
    /// in-cluster configuration when the file does not exist)
    #[arg(long, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to extract the bundle into
    #[arg(short, long, default_value = "bundle-output", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Keep the fetched archive at this path instead of a temp file
    #[arg(long, value_name = "FILE")]
    pub save_archive: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Where to write the fetched archive
    #[arg(short, long, default_value = "bundle.zip", value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the bundle archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to extract into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Directory holding the extracted bundle manifests
    #[arg(value_name = "BUNDLE_DIR")]
    pub bundle_dir: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_args_parse() {
        let cli = Cli::try_parse_from(["obex", "extract", "bundle.zip", "out"]).unwrap();
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.archive, PathBuf::from("bundle.zip"));
                assert_eq!(args.output_dir, PathBuf::from("out"));
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_fetch_args_defaults() {
        let cli = Cli::try_parse_from([
            "obex",
            "fetch",
            "--configmap",
            "my-bundle",
            "--namespace",
            "operators",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.source.key, "bundle");
                assert_eq!(args.out, PathBuf::from("bundle.zip"));
                assert!(args.source.kubeconfig.is_none());
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["obex", "--quiet", "--verbose", "validate", "dir"]);
        assert!(result.is_err());
    }
}
