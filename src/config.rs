//! Immutable build configuration.
//!
//! Loaded once at startup from `release-version.toml` and handed to every
//! step by reference. Credentials never come from the file; they are
//! supplied by flags or environment variables and are only present when
//! both halves are non-empty.
//!
//! ```toml
//! group = "dev.arbjerg"
//! modules = ["main", "natives", "extensions-project"]
//! skip_modules = ["natives", "extensions-project"]
//!
//! [repository]
//! name = "maven.lavalink.dev"
//! releases = "https://maven.lavalink.dev/releases"
//! snapshots = "https://maven.lavalink.dev/snapshots"
//!
//! [metadata]
//! name = "lavaplayer"
//! description = "A Lavaplayer fork maintained by Lavalink"
//! url = "https://github.com/lavalink-devs/lavaplayer"
//! ```

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::{
    Error,
    Result,
};

/// File looked up in the repository root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "release-version.toml";

/// Proof that a publishing target has a username and password.
///
/// Planning only needs to know the pair exists and who it belongs to, so
/// the password is checked and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
}

impl Credentials {
    /// `Some` only when both parts are present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|u| !u.trim().is_empty())?;
        password.filter(|p| !p.is_empty())?;
        Some(Self { username })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Self-hosted Maven repository with separate release and snapshot URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RepositorySettings {
    /// Display name used in log lines; defaults to the releases URL host.
    #[serde(default)]
    pub name: Option<String>,
    pub releases: String,
    pub snapshots: String,
}

impl RepositorySettings {
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref() {
            return name;
        }
        let without_scheme = self
            .releases
            .split_once("://")
            .map_or(self.releases.as_str(), |(_, rest)| rest);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct License {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Developer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scm {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_connection: Option<String>,
}

/// POM-style project metadata, passed through to the publishing plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<License>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub developers: Vec<Developer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm: Option<Scm>,
}

/// On-disk shape of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    group: String,
    #[serde(default)]
    modules: Vec<String>,
    #[serde(default)]
    skip_modules: Vec<String>,
    #[serde(default)]
    repository: Option<RepositorySettings>,
    #[serde(default)]
    metadata: ProjectMetadata,
}

/// Credentials gathered from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    pub repository: Option<Credentials>,
    pub central: Option<Credentials>,
}

/// Configuration shared by every step of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub group: String,
    pub modules: Vec<String>,
    pub skip_modules: Vec<String>,
    pub repository: Option<RepositorySettings>,
    pub metadata: ProjectMetadata,
    pub repository_credentials: Option<Credentials>,
    pub central_credentials: Option<Credentials>,
}

impl BuildConfig {
    /// Load from `explicit` if given, otherwise from [`DEFAULT_CONFIG_FILE`]
    /// under `repo_root`, falling back to defaults when that file is absent.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the file cannot be read or parsed, or when the
    /// result fails [`BuildConfig::validate`].
    pub fn load(
        explicit: Option<&Path>,
        repo_root: &Path,
        credentials: CredentialSources,
    ) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (repo_root.join(DEFAULT_CONFIG_FILE), false),
        };

        let file = if !required && !path.exists() {
            ConfigFile::default()
        } else {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::config(&path, format!("failed to read file: {e}")))?;
            toml::from_str(&content).map_err(|e| Error::config(&path, e.to_string()))?
        };

        let config = Self::from_file(file, credentials);
        config.validate().map_err(|message| Error::config(&path, message))?;
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str, credentials: CredentialSources) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::config(PathBuf::from("<inline>"), e.to_string()))?;
        let config = Self::from_file(file, credentials);
        config
            .validate()
            .map_err(|message| Error::config(PathBuf::from("<inline>"), message))?;
        Ok(config)
    }

    fn from_file(file: ConfigFile, credentials: CredentialSources) -> Self {
        Self {
            group: file.group,
            modules: file.modules,
            skip_modules: file.skip_modules,
            repository: file.repository,
            metadata: file.metadata,
            repository_credentials: credentials.repository,
            central_credentials: credentials.central,
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.modules.is_empty() && self.group.trim().is_empty() {
            return Err("`group` must be set when `modules` are listed".to_string());
        }
        if self.repository_credentials.is_some() && self.repository.is_none() {
            return Err(
                "repository credentials are set but no [repository] section is configured"
                    .to_string(),
            );
        }
        if let Some(repository) = &self.repository
            && (repository.releases.trim().is_empty() || repository.snapshots.trim().is_empty())
        {
            return Err("[repository] needs both `releases` and `snapshots` URLs".to_string());
        }
        Ok(())
    }

    /// Modules that get published, in configuration order.
    pub fn published_modules(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .map(String::as_str)
            .filter(|module| !self.skip_modules.iter().any(|skip| skip.as_str() == *module))
    }
}
