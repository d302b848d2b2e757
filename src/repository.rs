//! Reading [`RepositoryState`] from a git working directory.
//!
//! This is the only module that touches the repository. The `gix` handle
//! lives for the duration of [`read_repository_state`] and is dropped on
//! every return path, including errors.

use std::path::Path;

use cargo_plugin_utils::logger::Logger;

use crate::error::{
    Error,
    Result,
};
use crate::resolver::{
    RepositoryState,
    Tag,
    VersionDecision,
    dirty_notice,
    resolve_version,
};
use crate::worktree;

/// Read HEAD, tags and working tree cleanliness.
///
/// The repository is discovered at `path` or any of its parents. Tags are
/// peeled to the commit they ultimately point at; tags of trees or blobs are
/// skipped. Untracked files make the tree dirty unless they are ignored.
///
/// # Errors
///
/// [`Error::RepositoryAccess`] when the repository cannot be found or its
/// metadata cannot be read, including an unborn HEAD.
pub fn read_repository_state(path: &Path, is_ci: bool) -> Result<RepositoryState> {
    let repo = gix::discover(path)
        .map_err(|e| Error::repository_access(path, "discover repository", e))?;

    let head = repo
        .head()
        .map_err(|e| Error::repository_access(path, "read HEAD", e))?;
    let head_commit_id = head
        .id()
        .ok_or_else(|| {
            Error::repository_access(path, "read HEAD", "HEAD does not point to a commit")
        })?
        .to_string();

    let mut tags = Vec::new();
    let platform = repo
        .references()
        .map_err(|e| Error::repository_access(path, "read references", e))?;
    let references = platform
        .all()
        .map_err(|e| Error::repository_access(path, "read references", e))?;
    for reference in references {
        let mut reference =
            reference.map_err(|e| Error::repository_access(path, "read references", e))?;
        let full_name = reference.name().as_bstr().to_string();
        let Some(name) = full_name.strip_prefix("refs/tags/") else {
            continue;
        };

        let target = reference
            .peel_to_id()
            .map_err(|e| Error::repository_access(path, "peel tag", e))?;
        let object = repo
            .find_object(target)
            .map_err(|e| Error::repository_access(path, "read tagged object", e))?;
        if object.kind != gix::object::Kind::Commit {
            continue;
        }

        tags.push(Tag::new(name, target.to_string()));
    }

    let is_dirty = worktree::is_dirty(&repo)
        .map_err(|e| Error::repository_access(path, "check working tree status", e))?;

    Ok(RepositoryState {
        head_commit_id,
        tags,
        is_clean: !is_dirty,
        is_ci,
    })
}

/// Read the repository at `path` and decide its version.
///
/// Logs a notice when a local dirty tree forces a snapshot, then the final
/// decision.
pub fn resolve_repository(
    path: &Path,
    is_ci: bool,
    logger: &mut Logger,
) -> Result<VersionDecision> {
    logger.status("Reading", "git state");
    let state = read_repository_state(path, is_ci)?;
    logger.finish();

    if let Some(notice) = dirty_notice(&state) {
        logger.print_message(notice);
    }

    let decision = resolve_version(&state);
    logger.print_message(&format!(
        "Version: {} (release: {})",
        decision.version, decision.is_release
    ));
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DIRTY_NOTICE;
    use crate::test_support::TestRepo;

    #[test]
    fn test_read_clean_untagged_repository() {
        let repo = TestRepo::new();
        let state = read_repository_state(repo.path(), false).unwrap();

        assert_eq!(state.head_commit_id, repo.head());
        assert_eq!(state.head_commit_id.len(), 40);
        assert!(state.tags.is_empty());
        assert!(state.is_clean);
        assert!(!state.is_ci);
    }

    #[test]
    fn test_read_lightweight_and_annotated_tags() {
        let repo = TestRepo::new();
        let first = repo.head();
        repo.tag("v0.1.0");
        repo.commit_file("lib.txt", "second\n", "Second commit");
        repo.annotated_tag("v0.2.0");
        let second = repo.head();

        let state = read_repository_state(repo.path(), false).unwrap();
        let mut tags = state.tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        // The annotated tag is peeled to its commit, not the tag object.
        assert_eq!(
            tags,
            vec![Tag::new("v0.1.0", first), Tag::new("v0.2.0", second.clone())]
        );
        assert_eq!(state.head_tag(), Some("v0.2.0"));
        assert_eq!(state.head_commit_id, second);
    }

    #[test]
    fn test_modified_tracked_file_is_dirty() {
        let repo = TestRepo::new();
        repo.write("README.md", "# test\n\nwork in progress, longer than before\n");

        let state = read_repository_state(repo.path(), false).unwrap();
        assert!(!state.is_clean);
    }

    #[test]
    fn test_staged_change_is_dirty() {
        let repo = TestRepo::new();
        repo.write("staged.txt", "staged\n");
        repo.git(&["add", "staged.txt"]);

        let state = read_repository_state(repo.path(), false).unwrap();
        assert!(!state.is_clean);
    }

    #[test]
    fn test_untracked_file_is_dirty() {
        let repo = TestRepo::new();
        repo.tag("v2.0.0");
        repo.write("notes.txt", "not tracked\n");

        let state = read_repository_state(repo.path(), false).unwrap();
        assert!(!state.is_clean);
        assert_eq!(
            resolve_version(&state),
            VersionDecision::snapshot(&repo.head())
        );
    }

    #[test]
    fn test_ignored_file_keeps_tree_clean() {
        let repo = TestRepo::new();
        repo.commit_file(".gitignore", "*.log\n", "Ignore logs");
        repo.write("build.log", "ignored\n");

        let state = read_repository_state(repo.path(), false).unwrap();
        assert!(state.is_clean);
    }

    #[test]
    fn test_dirty_local_state_emits_notice() {
        let repo = TestRepo::new();
        repo.tag("v2.0.0");
        repo.write("notes.txt", "stray local file\n");

        let local = read_repository_state(repo.path(), false).unwrap();
        assert_eq!(dirty_notice(&local), Some(DIRTY_NOTICE));

        let ci = read_repository_state(repo.path(), true).unwrap();
        assert_eq!(dirty_notice(&ci), None);

        let mut logger = Logger::new();
        let decision = resolve_repository(repo.path(), false, &mut logger).unwrap();
        assert!(!decision.is_release);
    }

    #[test]
    fn test_discovers_repository_from_subdirectory() {
        let repo = TestRepo::new();
        let nested = repo.path().join("nested/dir");
        std::fs::create_dir_all(&nested).unwrap();

        let state = read_repository_state(&nested, false).unwrap();
        assert_eq!(state.head_commit_id, repo.head());
    }

    #[test]
    fn test_not_a_repository_is_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = read_repository_state(&missing, false).unwrap_err();
        assert!(matches!(err, Error::RepositoryAccess { .. }));
    }

    #[test]
    fn test_unborn_head_is_access_error() {
        let repo = TestRepo::empty();

        let err = read_repository_state(repo.path(), false).unwrap_err();
        match err {
            Error::RepositoryAccess { action, .. } => assert_eq!(action, "read HEAD"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_tagged_clean_repository_is_release() {
        let repo = TestRepo::new();
        repo.annotated_tag("v2.0.0");

        let mut logger = Logger::new();
        let decision = resolve_repository(repo.path(), false, &mut logger).unwrap();
        assert_eq!(decision, VersionDecision::release("v2.0.0"));
    }

    #[test]
    fn test_resolve_tagged_dirty_repository() {
        let repo = TestRepo::new();
        repo.tag("v2.0.0");
        repo.write("README.md", "# test\n\nlocal edits that change the size\n");
        let head = repo.head();

        let mut logger = Logger::new();
        let local = resolve_repository(repo.path(), false, &mut logger).unwrap();
        assert_eq!(local, VersionDecision::snapshot(&head));
        assert_eq!(local.version, format!("{head}-SNAPSHOT"));

        let ci = resolve_repository(repo.path(), true, &mut logger).unwrap();
        assert_eq!(ci, VersionDecision::release("v2.0.0"));
    }

    #[test]
    fn test_resolve_untagged_repository_is_snapshot() {
        let repo = TestRepo::new();
        repo.tag("v1.0.0");
        repo.commit_file("next.txt", "next\n", "Next commit");

        let mut logger = Logger::new();
        let decision = resolve_repository(repo.path(), true, &mut logger).unwrap();
        assert!(!decision.is_release);
        assert_eq!(decision.version, format!("{}-SNAPSHOT", repo.head()));
    }
}
