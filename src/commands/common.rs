//! Common helpers shared across commands.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{
    Context,
    Result,
};
use clap::Args;

use crate::environment;

/// Overrides for CI detection.
#[derive(Args, Debug, Clone, Default)]
pub struct CiArgs {
    /// Treat the build as running under CI, regardless of the `CI` variable.
    ///
    /// Under CI a dirty working tree does not prevent a release.
    #[arg(long, conflicts_with = "no_ci")]
    pub ci: bool,

    /// Treat the build as local, regardless of the `CI` variable.
    #[arg(long)]
    pub no_ci: bool,
}

impl CiArgs {
    pub fn is_ci(&self) -> bool {
        if self.ci {
            true
        } else if self.no_ci {
            false
        } else {
            environment::is_ci()
        }
    }
}

/// Append `key=value` lines to a GitHub Actions output file.
///
/// Falls back to stdout when no file is configured.
pub fn write_github_output(output_file: Option<&str>, lines: &[(&str, String)]) -> Result<()> {
    let mut output = String::new();
    for (key, value) in lines {
        output.push_str(&format!("{}={}\n", key, value));
    }

    match output_file {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(Path::new(path))
                .with_context(|| format!("Failed to open {}", path))?;
            file.write_all(output.as_bytes())
                .with_context(|| format!("Failed to write to {}", path))?;
        }
        None => print!("{}", output),
    }
    Ok(())
}
