//! Scratch git repositories for tests.
//!
//! Setup shells out to the git binary; only the code under test goes
//! through gix.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub(crate) struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// A repository with one commit containing `README.md`.
    pub(crate) fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# test\n", "Initial commit");
        repo
    }

    /// An initialized repository with no commits.
    pub(crate) fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Self { dir };
        repo.git(&["init", "--quiet"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.git(&["config", "tag.gpgsign", "false"]);
        repo
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository and return trimmed stdout.
    pub(crate) fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    pub(crate) fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    pub(crate) fn commit_file(&self, name: &str, content: &str, message: &str) {
        self.write(name, content);
        self.git(&["add", name]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    pub(crate) fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).unwrap();
    }

    pub(crate) fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    pub(crate) fn annotated_tag(&self, name: &str) {
        self.git(&["tag", "-a", name, "-m", &format!("Release {}", name)]);
    }
}
