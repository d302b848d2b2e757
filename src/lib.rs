#![doc = include_str!("../README.md")]

/// Command implementations and argument types.
pub mod commands;
/// Build configuration and credentials.
pub mod config;
/// CI detection.
pub mod environment;
/// Error types.
pub mod error;
/// Publishing plan.
pub mod publish;
/// Reading repository state from git.
pub mod repository;
/// Release/snapshot decision.
///
/// # Example
///
/// ```
/// use cargo_release_version::resolver::{
///     RepositoryState,
///     Tag,
///     resolve_version,
/// };
///
/// let state = RepositoryState {
///     head_commit_id: "abc123".to_string(),
///     tags: vec![Tag::new("v2.0.0", "abc123")],
///     is_clean: false,
///     is_ci: true,
/// };
/// let decision = resolve_version(&state);
/// assert_eq!(decision.version, "v2.0.0");
/// assert!(decision.is_release);
/// ```
pub mod resolver;
/// Tag name parsing and precedence.
pub mod version;
/// Working tree cleanliness.
pub mod worktree;

#[cfg(test)]
mod test_support;

pub use config::{
    BuildConfig,
    Credentials,
};
pub use error::{
    Error,
    Result,
};
pub use publish::{
    PublishPlan,
    plan_publication,
};
pub use repository::{
    read_repository_state,
    resolve_repository,
};
pub use resolver::{
    Channel,
    RepositoryState,
    VersionDecision,
    resolve_version,
};
