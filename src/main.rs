//! trawl - collect files under a directory by name suffix.
//!
//! Usage:
//!   trawl [PATH]                 List every file under PATH
//!   trawl [PATH] -s .md          List files ending with `.md`
//!   trawl [PATH] -s .md --json   Print the full scan result as JSON
//!   trawl --help                 Show help

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use filetrawl_scan::{Collector, ScanConfig, ScanError, ScanOrder};

#[derive(Parser)]
#[command(
    name = "trawl",
    version,
    about = "Recursively collect files whose names end with a suffix",
    long_about = "trawl walks a directory tree and prints the absolute path of every \
                  regular file whose name ends with the given suffix.\n\n\
                  Set RUST_LOG=debug to trace the walk."
)]
struct Cli {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Literal file name suffix, e.g. ".md" (no glob semantics)
    #[arg(short, long)]
    suffix: Option<String>,

    /// Maximum directory depth to descend into
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Skip entries whose names start with '.'
    #[arg(long)]
    no_hidden: bool,

    /// Maximum directory listings in flight (0 = unbounded)
    #[arg(short = 'j', long, default_value = "0")]
    jobs: usize,

    /// Emit subdirectory matches before a directory's own files
    #[arg(long)]
    descendants_first: bool,

    /// Print the scan result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let result = Collector::new()
        .scan(&config)
        .await
        .with_context(|| format!("Scan of {} failed", cli.path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &result).context("Failed to serialize result")?;
        writeln!(out)?;
    } else {
        for path in result.paths() {
            writeln!(out, "{}", path.display())?;
        }
    }

    Ok(())
}

/// Translate command-line flags into a scan config.
fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let order = if cli.descendants_first {
        ScanOrder::DescendantsFirst
    } else {
        ScanOrder::Listing
    };

    ScanConfig::builder()
        .root(cli.path.clone())
        .filter(cli.suffix.clone())
        .max_depth(cli.max_depth)
        .include_hidden(!cli.no_hidden)
        .max_concurrency(cli.jobs)
        .order(order)
        .build()
        .map_err(ScanError::from)
        .context("Invalid scan options")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let cli = Cli::parse_from(["trawl"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.filter.is_empty());
        assert!(config.include_hidden);
        assert_eq!(config.max_concurrency, 0);
        assert_eq!(config.order, ScanOrder::Listing);
    }

    #[test]
    fn test_build_config_flags() {
        let cli = Cli::parse_from([
            "trawl",
            "example",
            "-s",
            ".md",
            "-d",
            "2",
            "--no-hidden",
            "-j",
            "4",
            "--descendants-first",
        ]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.root, PathBuf::from("example"));
        assert_eq!(config.filter.as_str(), ".md");
        assert_eq!(config.max_depth, Some(2));
        assert!(!config.include_hidden);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.order, ScanOrder::DescendantsFirst);
    }

    #[test]
    fn test_build_config_rejects_empty_root() {
        let cli = Cli {
            path: PathBuf::new(),
            suffix: None,
            max_depth: None,
            no_hidden: false,
            jobs: 0,
            descendants_first: false,
            json: false,
        };
        let report = build_config(&cli).unwrap_err();

        let err = report.downcast_ref::<ScanError>().unwrap();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
        assert!(err.to_string().contains("Root path cannot be empty"));
    }
}
