//! Show the publishing plan for the current commit.
//!
//! Combines the resolved version with `release-version.toml` and whatever
//! credentials are available: releases go to the releases repository and
//! are signed for Maven Central, snapshots go to the snapshots repository
//! unsigned, and targets without credentials are skipped.
//!
//! # Examples
//!
//! ```bash
//! # Human-readable plan
//! cargo release-version plan
//!
//! # JSON for scripting
//! cargo release-version plan --format json
//!
//! # Alternate configuration file
//! cargo release-version plan --config ci/release-version.toml
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
};
use cargo_plugin_utils::logger::Logger;
use clap::Parser;

use super::common::CiArgs;
use crate::config::{
    BuildConfig,
    CredentialSources,
    Credentials,
};
use crate::error::Error;
use crate::publish::plan_publication;
use crate::repository::resolve_repository;

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Path to the git repository.
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    /// Configuration file.
    ///
    /// Defaults to `release-version.toml` in the repository path; a missing
    /// default file means an empty configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub ci: CiArgs,

    /// Output format.
    ///
    /// - `text`: Human-readable summary
    /// - `json`: Full plan as JSON
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Username for the self-hosted Maven repository.
    #[arg(long, env = "MAVEN_USERNAME", hide_env_values = true)]
    pub maven_username: Option<String>,

    /// Password for the self-hosted Maven repository.
    #[arg(long, env = "MAVEN_PASSWORD", hide_env_values = true)]
    pub maven_password: Option<String>,

    /// Username for Maven Central.
    #[arg(long, env = "MAVEN_CENTRAL_USERNAME", hide_env_values = true)]
    pub central_username: Option<String>,

    /// Password for Maven Central.
    #[arg(long, env = "MAVEN_CENTRAL_PASSWORD", hide_env_values = true)]
    pub central_password: Option<String>,
}

/// Print the publishing plan.
///
/// # Errors
///
/// Fails when the configuration is invalid, the repository cannot be read,
/// or the format is unknown. Missing credentials only skip targets.
pub fn plan(args: PlanArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    plan_to_writer(&mut handle, args)
}

pub fn plan_to_writer(writer: &mut dyn Write, args: PlanArgs) -> Result<()> {
    if !matches!(args.format.as_str(), "text" | "json") {
        anyhow::bail!(Error::InvalidFormat(args.format));
    }

    let credentials = CredentialSources {
        repository: Credentials::from_parts(args.maven_username, args.maven_password),
        central: Credentials::from_parts(args.central_username, args.central_password),
    };
    let config = BuildConfig::load(args.config.as_deref(), &args.repo_path, credentials)?;

    let mut logger = Logger::new();
    let decision = resolve_repository(&args.repo_path, args.ci.is_ci(), &mut logger)
        .with_context(|| {
            format!(
                "Failed to resolve version for {}",
                args.repo_path.display()
            )
        })?;
    let plan = plan_publication(&config, &decision, &mut logger);
    if !plan.publishes_anything() {
        logger.warning("Nothing", "will be published for this commit");
    }

    match args.format.as_str() {
        "text" => write!(writer, "{}", plan)?,
        _ => {
            let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            writeln!(writer, "{}", json)?;
        }
    }

    Ok(())
}
