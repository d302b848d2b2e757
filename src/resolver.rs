//! Release/snapshot version decision.
//!
//! The decision is a pure function of [`RepositoryState`]:
//!
//! - HEAD carries a tag and the working tree is clean (or the build runs
//!   under CI): **release**, versioned by the tag name.
//! - Anything else: **snapshot**, versioned as `<head commit id>-SNAPSHOT`.
//!
//! A dirty tree only counts outside CI. CI checkouts are not edited by hand,
//! so any dirt there comes from the build itself.

use std::fmt;

use serde::Serialize;

use crate::version::select_tag;

/// Suffix appended to the commit id of non-release builds.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// A tag and the commit it peels to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_id: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }
}

/// Snapshot of the repository facts the decision depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub head_commit_id: String,
    pub tags: Vec<Tag>,
    pub is_clean: bool,
    pub is_ci: bool,
}

impl RepositoryState {
    /// Names of all tags pointing at HEAD, in listing order.
    pub fn head_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|tag| tag.commit_id == self.head_commit_id)
            .map(|tag| tag.name.as_str())
    }

    /// The tag HEAD resolves to, if any. Ties between several tags on the
    /// same commit are broken by [`select_tag`].
    pub fn head_tag(&self) -> Option<&str> {
        select_tag(self.head_tags())
    }

    /// Clean, or dirty but running under CI.
    pub fn is_effectively_clean(&self) -> bool {
        self.is_clean || self.is_ci
    }

    /// Dirty tree on a local build; the only case that downgrades a tagged
    /// HEAD to a snapshot.
    pub fn is_dirty_local(&self) -> bool {
        !self.is_effectively_clean()
    }
}

/// Publishing channel selected by a [`VersionDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Releases,
    Snapshots,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Releases => "releases",
            Self::Snapshots => "snapshots",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version string plus release flag, computed once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDecision {
    pub version: String,
    #[serde(rename = "release")]
    pub is_release: bool,
}

impl VersionDecision {
    pub fn release(tag: impl Into<String>) -> Self {
        Self {
            version: tag.into(),
            is_release: true,
        }
    }

    pub fn snapshot(head_commit_id: &str) -> Self {
        Self {
            version: format!("{head_commit_id}{SNAPSHOT_SUFFIX}"),
            is_release: false,
        }
    }

    pub fn channel(&self) -> Channel {
        if self.is_release {
            Channel::Releases
        } else {
            Channel::Snapshots
        }
    }
}

/// Logged when a local dirty tree downgrades the build to a snapshot.
pub const DIRTY_NOTICE: &str = "Git state is dirty, version is a snapshot.";

/// The notice to log for `repo`, if any.
pub fn dirty_notice(repo: &RepositoryState) -> Option<&'static str> {
    repo.is_dirty_local().then_some(DIRTY_NOTICE)
}

/// Map repository state to a version decision.
pub fn resolve_version(repo: &RepositoryState) -> VersionDecision {
    match repo.head_tag() {
        Some(tag) if repo.is_effectively_clean() => VersionDecision::release(tag),
        _ => VersionDecision::snapshot(&repo.head_commit_id),
    }
}
