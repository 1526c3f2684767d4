//! Repository descriptors and GitHub repository detection.

use anyhow::{Context, Result};
use regex_macro::regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Version control system tag identifying git repositories.
const GIT: &str = "git";

/// Source control repository reference of a package.
///
/// Mirrors the `repository` field of package manifests: `kind` names the
/// version control system and `url` is its clone URL in whatever syntax
/// that system uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    #[serde(rename = "type")]
    kind: String,
    url: String,
}

impl RepositoryDescriptor {
    /// Creates descriptor from version control tag and URL.
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
        }
    }

    /// Creates git descriptor for URL.
    pub fn git(url: impl Into<String>) -> Self {
        Self::new(GIT, url)
    }

    /// Version control system tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Repository URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reads descriptor from the `repository` field of a JSON manifest.
    ///
    /// Accepts `package.json` files and jsii assemblies. The field may be an
    /// object with `type` and `url`, or a bare URL string which is taken to
    /// be a git repository.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to JSON manifest
    ///
    /// # Returns
    ///
    /// Descriptor, or None if manifest has no repository field
    ///
    /// # Errors
    ///
    /// Returns error if manifest cannot be read or is not valid JSON
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::from_manifest_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    /// Parses descriptor from JSON manifest content.
    ///
    /// # Errors
    ///
    /// Returns error if content is not valid JSON or repository field has
    /// an unexpected shape
    pub fn from_manifest_str(content: &str) -> Result<Option<Self>> {
        let manifest: Manifest =
            serde_json::from_str(content).context("Invalid manifest JSON")?;

        Ok(manifest.repository.map(|field| match field {
            RepositoryField::Url(url) => Self::git(url),
            RepositoryField::Descriptor(descriptor) => descriptor,
        }))
    }

    /// Reads descriptor from the default fetch remote of a git repository.
    ///
    /// Discovers the repository containing `path` by walking up parent
    /// directories.
    ///
    /// # Returns
    ///
    /// Git descriptor of the default remote URL, or None if no repository
    /// or remote is found
    pub fn from_git_remote(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let repo = match gix::discover(path) {
            Ok(repo) => repo,
            Err(e) => {
                log::debug!("No git repository at {}: {}", path.display(), e);
                return None;
            }
        };

        let remote = match repo.find_default_remote(gix::remote::Direction::Fetch)? {
            Ok(remote) => remote,
            Err(e) => {
                log::debug!("Failed to load default remote: {}", e);
                return None;
            }
        };

        let url = remote.url(gix::remote::Direction::Fetch)?.to_bstring();
        Some(Self::git(url.to_string()))
    }
}

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepository {
    owner: String,
    repo: String,
}

impl ResolvedRepository {
    /// Creates resolved repository from owner and repository name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

/// Subset of a JSON manifest holding the repository reference.
#[derive(Debug, Deserialize)]
struct Manifest {
    repository: Option<RepositoryField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Descriptor(RepositoryDescriptor),
}

/// Parses GitHub owner and repository name from a repository descriptor.
///
/// Recognizes scp-like (`git@github.com:owner/repo`) and HTTP(S)
/// (`https://github.com/owner/repo`) URLs, each optionally ending in
/// `.git`. Only the single trailing `.git` is dropped; owner and
/// repository are otherwise returned verbatim.
///
/// # Arguments
///
/// * `descriptor`: Repository descriptor to inspect
///
/// # Returns
///
/// Owner and repository, or None if descriptor is not a git repository
/// hosted on GitHub
pub fn parse_github_repository(descriptor: &RepositoryDescriptor) -> Option<ResolvedRepository> {
    if descriptor.kind() != GIT {
        return None;
    }

    // Lazy repo capture leaves a trailing `.git` to the optional group
    let re = regex!(
        r"^(?:(?:git@)?github\.com:|https?://github\.com/)(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?$"
    );

    let captures = re.captures(descriptor.url())?;
    let resolved = ResolvedRepository::new(&captures["owner"], &captures["repo"]);

    log::debug!(
        "Resolved GitHub repository {}/{} from {}",
        resolved.owner(),
        resolved.repo(),
        descriptor.url()
    );

    Some(resolved)
}
