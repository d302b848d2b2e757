//! Print the tag HEAD resolves to.
//!
//! When several tags point at HEAD the same tie-break as `resolve` applies:
//! semantic versions first, highest version wins, then the greatest name.
//! Unlike `resolve`, this ignores working tree state.
//!
//! # Examples
//!
//! ```bash
//! # Print the tag (e.g., "v0.1.2")
//! cargo release-version tag
//!
//! # JSON with the tag, commit and every tag on HEAD
//! cargo release-version tag --format json
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::error::Error;
use crate::repository::read_repository_state;

/// Arguments for the `tag` command.
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Path to the git repository.
    #[arg(long, default_value = ".")]
    pub repo_path: PathBuf,

    /// Output format for the tag.
    ///
    /// - `tag`: Print just the tag
    /// - `json`: Print JSON with tag, commit and candidates fields
    #[arg(long, default_value = "tag")]
    pub format: String,
}

/// Print the tag on HEAD.
///
/// # Errors
///
/// Fails when the repository cannot be read, HEAD carries no tag, or the
/// format is unknown.
pub fn tag(args: TagArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    tag_to_writer(&mut handle, args)
}

pub fn tag_to_writer(writer: &mut dyn Write, args: TagArgs) -> Result<()> {
    if !matches!(args.format.as_str(), "tag" | "json") {
        anyhow::bail!(Error::InvalidFormat(args.format));
    }

    // Cleanliness is irrelevant here; CI state does not matter either.
    let state = read_repository_state(&args.repo_path, false)?;
    let Some(tag) = state.head_tag() else {
        anyhow::bail!(Error::HeadNotTagged {
            head: state.head_commit_id.clone(),
        });
    };

    match args.format.as_str() {
        "tag" => writeln!(writer, "{}", tag)?,
        _ => {
            let mut candidates: Vec<&str> = state.head_tags().collect();
            candidates.sort_unstable();
            let json = serde_json::json!({
                "tag": tag,
                "commit": state.head_commit_id,
                "candidates": candidates,
            });
            writeln!(writer, "{}", json)?;
        }
    }

    Ok(())
}
