//! Working tree cleanliness.
//!
//! Shared with `build.rs`, so it depends on nothing but `gix`.

/// Whether the working tree differs from HEAD.
///
/// Staged changes, unstaged changes to tracked files and untracked files
/// that are not ignored all count. The walk stops at the first change.
pub fn is_dirty(
    repo: &gix::Repository,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let changes = repo
        .status(gix::progress::Discard)?
        .untracked_files(gix::status::UntrackedFiles::Files)
        .into_iter(Vec::<gix::bstr::BString>::new())?;

    for change in changes {
        if counts_as_dirty(&change?) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn counts_as_dirty(change: &gix::status::Item) -> bool {
    match change {
        gix::status::Item::IndexWorktree(
            gix::status::index_worktree::Item::DirectoryContents { entry, .. },
        ) => !matches!(entry.status, gix::dir::entry::Status::Ignored(_)),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    fn open(repo: &TestRepo) -> gix::Repository {
        gix::open(repo.path()).unwrap()
    }

    #[test]
    fn test_fresh_commit_is_clean() {
        let repo = TestRepo::new();
        assert!(!is_dirty(&open(&repo)).unwrap());
    }

    #[test]
    fn test_untracked_file_in_subdirectory_is_dirty() {
        let repo = TestRepo::new();
        std::fs::create_dir_all(repo.path().join("docs/drafts")).unwrap();
        repo.write("docs/drafts/notes.md", "draft\n");
        assert!(is_dirty(&open(&repo)).unwrap());
    }

    #[test]
    fn test_ignored_directory_is_clean() {
        let repo = TestRepo::new();
        repo.commit_file(".gitignore", "target/\n", "Ignore build output");
        std::fs::create_dir_all(repo.path().join("target/debug")).unwrap();
        repo.write("target/debug/out.bin", "binary\n");
        assert!(!is_dirty(&open(&repo)).unwrap());
    }
}
