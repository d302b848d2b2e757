//! Publishing plan derived from a [`VersionDecision`].
//!
//! The plan answers, for one invocation: which coordinates get published,
//! where the self-hosted repository upload goes, and whether Maven Central
//! publications are signed. Targets without credentials are skipped with a
//! log line rather than failing the build.

use std::fmt;

use cargo_plugin_utils::logger::Logger;
use serde::Serialize;

use crate::config::{
    BuildConfig,
    ProjectMetadata,
};
use crate::resolver::{
    Channel,
    VersionDecision,
};

/// Maven coordinates of one publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Upload to the self-hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RepositoryTarget {
    Publish {
        name: String,
        url: String,
        username: String,
    },
    Skipped { reason: String },
}

/// Upload to Maven Central.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CentralTarget {
    Publish { sign: bool, username: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
    pub version: String,
    pub release: bool,
    pub channel: Channel,
    pub publications: Vec<Coordinates>,
    pub repository: RepositoryTarget,
    pub central: CentralTarget,
    pub metadata: ProjectMetadata,
}

impl PublishPlan {
    /// Whether any target will actually receive artifacts.
    pub fn publishes_anything(&self) -> bool {
        !self.publications.is_empty()
            && (matches!(self.repository, RepositoryTarget::Publish { .. })
                || matches!(self.central, CentralTarget::Publish { .. }))
    }
}

/// Build the plan for `decision` under `config`.
pub fn plan_publication(
    config: &BuildConfig,
    decision: &VersionDecision,
    logger: &mut Logger,
) -> PublishPlan {
    let channel = decision.channel();

    let publications = config
        .published_modules()
        .map(|artifact| Coordinates {
            group: config.group.clone(),
            artifact: artifact.to_string(),
            version: decision.version.clone(),
        })
        .collect();

    let repository = match (&config.repository, &config.repository_credentials) {
        (Some(settings), Some(credentials)) => {
            let url = match channel {
                Channel::Releases => &settings.releases,
                Channel::Snapshots => &settings.snapshots,
            };
            RepositoryTarget::Publish {
                name: settings.display_name().to_string(),
                url: url.clone(),
                username: credentials.username().to_string(),
            }
        }
        (Some(settings), None) => {
            let reason = format!(
                "Not publishing to {} because credentials are not set",
                settings.display_name()
            );
            logger.warning("Skipping", &reason);
            RepositoryTarget::Skipped { reason }
        }
        (None, _) => RepositoryTarget::Skipped {
            reason: "No repository configured".to_string(),
        },
    };

    let central = match &config.central_credentials {
        Some(credentials) => CentralTarget::Publish {
            sign: decision.is_release,
            username: credentials.username().to_string(),
        },
        None => {
            let reason = "Not publishing to OSSRH due to missing credentials".to_string();
            logger.warning("Skipping", &reason);
            CentralTarget::Skipped { reason }
        }
    };

    PublishPlan {
        version: decision.version.clone(),
        release: decision.is_release,
        channel,
        publications,
        repository,
        central,
        metadata: config.metadata.clone(),
    }
}

impl fmt::Display for PublishPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version: {}", self.version)?;
        writeln!(f, "release: {}", self.release)?;
        writeln!(f, "channel: {}", self.channel)?;

        match &self.repository {
            RepositoryTarget::Publish {
                name,
                url,
                username,
            } => writeln!(f, "repository: {} ({}) as {}", name, url, username)?,
            RepositoryTarget::Skipped { reason } => writeln!(f, "repository: skipped ({})", reason)?,
        }
        match &self.central {
            CentralTarget::Publish { sign, username } => writeln!(
                f,
                "central: publish ({}) as {}",
                if *sign { "signed" } else { "unsigned" },
                username
            )?,
            CentralTarget::Skipped { reason } => writeln!(f, "central: skipped ({})", reason)?,
        }

        if self.publications.is_empty() {
            writeln!(f, "publications: none")?;
        } else {
            writeln!(f, "publications:")?;
            for coordinates in &self.publications {
                writeln!(f, "  {}", coordinates)?;
            }
        }
        Ok(())
    }
}
