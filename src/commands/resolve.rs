//! Resolve the release or snapshot version of the current commit.
//!
//! HEAD exactly on a tag with a clean working tree (or any tree under CI)
//! resolves to the tag name; everything else resolves to
//! `<commit-id>-SNAPSHOT`.
//!
//! # Examples
//!
//! ```bash
//! # Print the version
//! cargo release-version resolve
//!
//! # JSON with release flag and channel
//! cargo release-version resolve --format json
//!
//! # Write version, release and channel to $GITHUB_OUTPUT
//! cargo release-version resolve --format github-actions
//!
//! # Ignore the CI variable and apply the local dirty-tree rule
//! cargo release-version resolve --no-ci
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use cargo_plugin_utils::logger::Logger;
use clap::Parser;

use super::common::{
    CiArgs,
    write_github_output,
};
use crate::repository::resolve_repository;
use crate::resolver::VersionDecision;

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path to the git repository.
    ///
    /// The repository is discovered here or in any parent directory.
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    #[command(flatten)]
    pub ci: CiArgs,

    /// Output format.
    ///
    /// - `version`: Print just the version
    /// - `json`: Print JSON with version, release and channel fields
    /// - `github-actions`: Append to the GITHUB_OUTPUT file
    #[arg(long, default_value = "version")]
    pub format: String,

    /// Path to GitHub Actions output file.
    ///
    /// Only used with `--format github-actions`. Defaults to the
    /// `GITHUB_OUTPUT` environment variable, then stdout.
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<String>,
}

/// Resolve the version and print it to stdout.
///
/// # Errors
///
/// Fails when the repository cannot be read or the format is unknown. A
/// dirty working tree is not an error; it yields a snapshot version.
pub fn resolve(args: ResolveArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    resolve_to_writer(&mut handle, args)
}

/// Resolve the version and write it to `writer`.
pub fn resolve_to_writer(writer: &mut dyn Write, args: ResolveArgs) -> Result<()> {
    check_format(&args.format)?;

    let mut logger = Logger::new();
    let decision = resolve_repository(&args.repo_path, args.ci.is_ci(), &mut logger)
        .with_context(|| {
            format!(
                "Failed to resolve version for {}",
                args.repo_path.display()
            )
        })?;

    write_decision(writer, &decision, &args.format, args.github_output.as_deref())
}

fn check_format(format: &str) -> Result<()> {
    match format {
        "version" | "json" | "github-actions" => Ok(()),
        _ => anyhow::bail!(crate::error::Error::InvalidFormat(format.to_string())),
    }
}

fn write_decision(
    writer: &mut dyn Write,
    decision: &VersionDecision,
    format: &str,
    github_output: Option<&str>,
) -> Result<()> {
    match format {
        "version" => writeln!(writer, "{}", decision.version)?,
        "json" => {
            let json = serde_json::json!({
                "version": decision.version,
                "release": decision.is_release,
                "channel": decision.channel(),
            });
            writeln!(writer, "{}", json)?;
        }
        "github-actions" => write_github_output(
            github_output,
            &[
                ("version", decision.version.clone()),
                ("release", decision.is_release.to_string()),
                ("channel", decision.channel().to_string()),
            ],
        )?,
        _ => anyhow::bail!(crate::error::Error::InvalidFormat(format.to_string())),
    }
    Ok(())
}
