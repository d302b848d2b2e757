//! Cargo subcommand that derives release or snapshot versions from git.
//!
//! - Resolve the version of the current commit (tag or `<sha>-SNAPSHOT`)
//! - Print the tag HEAD resolves to
//! - Show the publishing plan: destination, signing, coordinates
//!
//! One rule for every build script, CI job and release step.

use std::fs;

use anyhow::Result;
use cargo_release_version::commands;
use cargo_release_version::commands::{
    PlanArgs,
    ResolveArgs,
    TagArgs,
};
use clap::{
    ArgAction,
    CommandFactory,
    Parser,
    Subcommand,
};

#[derive(Parser, Debug)]
#[command(
    bin_name = "cargo",
    disable_version_flag = true,
    arg_required_else_help = false
)]
struct CargoArgs {
    #[command(subcommand)]
    subcmd: Option<TopCommand>,
}

#[derive(Subcommand, Debug)]
enum TopCommand {
    /// Release/snapshot versions and publishing plans from git state
    #[command(name = "release-version")]
    ReleaseVersion(ReleaseVersionCli),
}

#[derive(Parser, Debug)]
#[command(
    disable_version_flag = true,
    subcommand_required = false,
    arg_required_else_help = false
)]
struct ReleaseVersionCli {
    /// Print the version of this tool.
    #[arg(long = "version", short = 'V', action = ArgAction::SetTrue)]
    version_flag: bool,

    #[command(subcommand)]
    command: Option<ReleaseVersionCommand>,
}

#[derive(Parser, Debug)]
enum ReleaseVersionCommand {
    /// Resolve the version of the current commit
    #[command(name = "resolve")]
    Resolve(ResolveArgs),
    /// Print the tag HEAD resolves to
    #[command(name = "tag")]
    Tag(TagArgs),
    /// Show the publishing plan for the current commit
    #[command(name = "plan")]
    Plan(PlanArgs),
}

/// Check if any .env* files exist in the current directory.
fn has_env_files() -> bool {
    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(_) => return false,
    };

    let patterns = [".env", ".env.local", ".env.prod", ".env.dev", ".env.test"];
    for pattern in &patterns {
        let path = current_dir.join(pattern);
        if fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            return true;
        }
    }

    if let Ok(user) = std::env::var("USER") {
        let path = current_dir.join(format!(".env.{}", user));
        if fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            return true;
        }
    }

    false
}

fn main() -> Result<()> {
    // Publishing credentials usually live in (encrypted) .env.local files.
    if has_env_files()
        && let Err(e) = dotenvage::EnvLoader::new().and_then(|loader| loader.load())
    {
        eprintln!("Warning: Failed to load/decrypt env files: {}", e);
        eprintln!("Continuing with existing environment variables...");
    }

    let args = CargoArgs::parse();

    if let Some(TopCommand::ReleaseVersion(cli)) = args.subcmd {
        if cli.version_flag {
            println!(
                "cargo-release-version {} ({})",
                env!("CARGO_PKG_VERSION"),
                env!("RELEASE_VERSION_BUILD")
            );
            return Ok(());
        }

        return match cli.command {
            Some(ReleaseVersionCommand::Resolve(args)) => commands::resolve(args),
            Some(ReleaseVersionCommand::Tag(args)) => commands::tag(args),
            Some(ReleaseVersionCommand::Plan(args)) => commands::plan(args),
            None => {
                ReleaseVersionCli::command().print_help()?;
                println!();
                Ok(())
            }
        };
    }

    CargoArgs::command().print_help()?;
    println!();
    Ok(())
}
