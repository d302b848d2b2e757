//! Tag name parsing and precedence.
//!
//! A commit can carry more than one tag. Selection between them must not
//! depend on the order git happens to list references in, so every tag name
//! maps to a [`TagPrecedence`] key and the greatest key wins:
//!
//! 1. tags that parse as `major.minor.patch` (optional `v`/`V` prefix) beat
//!    tags that don't;
//! 2. among those, the higher version wins, and a final release beats a
//!    pre-release of the same `major.minor.patch`;
//! 3. anything still tied is decided by the lexicographically greatest name.

use std::cmp::Ordering;

use anyhow::{
    Context,
    Result,
};

/// Parse a semantic version string (e.g., "0.1.2" or "v0.1.2").
///
/// Anything after a `-` in the patch component is treated as a pre-release
/// suffix and ignored here; see [`is_prerelease`].
pub fn parse_version(version_str: &str) -> Result<(u32, u32, u32)> {
    let version_str = strip_tag_prefix(version_str);

    let parts: Vec<&str> = version_str.splitn(3, '.').collect();
    if parts.len() < 3 {
        anyhow::bail!(
            "Version must have at least 3 parts (major.minor.patch), got: {}",
            version_str
        );
    }

    let major = parts[0]
        .parse::<u32>()
        .with_context(|| format!("Invalid major version: {}", parts[0]))?;
    let minor = parts[1]
        .parse::<u32>()
        .with_context(|| format!("Invalid minor version: {}", parts[1]))?;
    let patch_str = parts[2]
        .split(['-', '+'])
        .next()
        .unwrap_or(parts[2]);
    let patch = patch_str
        .parse::<u32>()
        .with_context(|| format!("Invalid patch version: {}", parts[2]))?;

    Ok((major, minor, patch))
}

/// Whether a version string carries a pre-release suffix (`1.2.3-rc.1`).
pub fn is_prerelease(version_str: &str) -> bool {
    let version_str = strip_tag_prefix(version_str);
    let core = version_str.split('+').next().unwrap_or(version_str);
    core.contains('-')
}

fn strip_tag_prefix(name: &str) -> &str {
    name.strip_prefix('v')
        .or_else(|| name.strip_prefix('V'))
        .unwrap_or(name)
}

/// Ordering key for a tag name. Greater means preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPrecedence<'a> {
    semantic: Option<((u32, u32, u32), bool)>,
    name: &'a str,
}

impl<'a> TagPrecedence<'a> {
    pub fn new(name: &'a str) -> Self {
        let semantic = parse_version(name)
            .ok()
            .map(|triple| (triple, !is_prerelease(name)));
        Self { semantic, name }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

impl Ord for TagPrecedence<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)`, so semantic tags outrank free-form ones.
        self.semantic
            .cmp(&other.semantic)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl PartialOrd for TagPrecedence<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pick the preferred tag among `names`.
pub fn select_tag<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(TagPrecedence::new)
        .max()
        .map(|precedence| precedence.name())
}
