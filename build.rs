//! Build script that stamps the binary with its own release/snapshot
//! version, using the same rule the tool applies:
//!
//! 1. HEAD tagged and the tree clean (or `CI` set): the tag name
//! 2. Otherwise: `<commit-id>-SNAPSHOT`
//! 3. Not a git checkout (e.g. a crates.io tarball): `CARGO_PKG_VERSION`
//!
//! The result is exposed as `RELEASE_VERSION_BUILD`.

use std::env;
use std::path::Path;

#[path = "src/environment.rs"]
mod environment;
#[allow(dead_code)]
#[path = "src/version.rs"]
mod version;
#[path = "src/worktree.rs"]
mod worktree;

fn main() {
    let version = compute_version_string(Path::new(".")).unwrap_or_else(|e| {
        println!(
            "cargo:warning=Version computation failed: {}, using package version",
            e
        );
        env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string())
    });

    println!("cargo:rustc-env=RELEASE_VERSION_BUILD={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-changed=src/environment.rs");
    println!("cargo:rerun-if-changed=src/version.rs");
    println!("cargo:rerun-if-changed=src/worktree.rs");
    println!("cargo:rerun-if-env-changed=CI");
}

fn compute_version_string(repo_path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let repo = gix::discover(repo_path)
        .map_err(|e| format!("Failed to discover git repository: {}", e))?;

    let head = repo
        .head()
        .map_err(|e| format!("Failed to read HEAD: {}", e))?;
    let head_id = head
        .id()
        .ok_or_else(|| "HEAD does not point to a commit".to_string())?
        .detach();

    let is_ci = environment::is_ci();
    let is_clean = !worktree::is_dirty(&repo).map_err(|e| e.to_string())?;

    let mut head_tags = Vec::new();
    for reference in repo.references()?.all()? {
        let Ok(mut reference) = reference else {
            continue;
        };
        let name = reference.name().as_bstr().to_string();
        let Some(tag) = name.strip_prefix("refs/tags/") else {
            continue;
        };
        if reference.peel_to_id().is_ok_and(|id| id.detach() == head_id) {
            head_tags.push(tag.to_string());
        }
    }

    match version::select_tag(head_tags.iter().map(String::as_str)) {
        Some(tag) if is_clean || is_ci => Ok(tag.to_string()),
        _ => Ok(format!("{}-SNAPSHOT", head_id)),
    }
}
