//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::repository::RepositoryDescriptor;

/// Command line configuration for Hubmark.
#[derive(Debug, Clone, Parser)]
#[command(name = "hubmark", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render
    #[arg(default_value = "README.md")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Print sanitized HTML fragment to stdout instead of writing a page
    #[arg(long)]
    pub fragment: bool,

    /// Version control system of the repository
    #[arg(long, default_value = "git")]
    pub repo_type: String,

    /// Repository URL used to resolve relative links
    #[arg(long)]
    pub repo_url: Option<String>,

    /// JSON manifest (package.json or .jsii) with a repository field
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// Do not open generated page in browser
    #[arg(long)]
    pub no_open: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if input file does not exist or both a repository URL
    /// and a manifest are given.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if self.repo_url.is_some() && self.manifest.is_some() {
            bail!("--repo-url and --manifest cannot be used together");
        }

        Ok(())
    }

    /// Resolves repository descriptor for the input document.
    ///
    /// Uses `--repo-url` first, then the manifest's repository field, then
    /// the default remote of the git repository containing the input.
    ///
    /// # Errors
    ///
    /// Returns error if the manifest cannot be read or parsed.
    pub fn descriptor(&self) -> Result<Option<RepositoryDescriptor>> {
        if let Some(url) = &self.repo_url {
            return Ok(Some(RepositoryDescriptor::new(&self.repo_type, url)));
        }

        if let Some(manifest) = &self.manifest {
            return RepositoryDescriptor::from_manifest(manifest)
                .context("Failed to read repository from manifest");
        }

        Ok(RepositoryDescriptor::from_git_remote(self.input_dir()))
    }

    /// Returns page title from configuration or input file name.
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        self.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("README")
            .to_string()
    }

    /// Returns input file name for display.
    pub fn input_name(&self) -> String {
        self.input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("README.md")
            .to_string()
    }

    fn input_dir(&self) -> &Path {
        match self.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(input: PathBuf) -> Config {
        Config {
            input,
            output: PathBuf::from("dist"),
            fragment: false,
            repo_type: "git".to_string(),
            repo_url: None,
            manifest: None,
            title: None,
            no_open: true,
        }
    }

    #[test]
    fn test_validate_missing_input() {
        // Arrange
        let config = config(PathBuf::from("does/not/exist.md"));

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err(), "Missing input should be rejected");
    }

    #[test]
    fn test_validate_existing_input() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let input = dir.path().join("README.md");
        fs::write(&input, "# Hi\n")?;

        // Act
        let result = config(input).validate();

        // Assert
        assert!(result.is_ok(), "Existing input should be valid");
        Ok(())
    }

    #[test]
    fn test_validate_rejects_url_and_manifest() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let input = dir.path().join("README.md");
        fs::write(&input, "# Hi\n")?;
        let mut config = config(input);
        config.repo_url = Some("https://github.com/acme/widgets".to_string());
        config.manifest = Some(dir.path().join("package.json"));

        // Act
        let result = config.validate();

        // Assert
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_descriptor_from_repo_url() -> Result<()> {
        // Arrange
        let mut config = config(PathBuf::from("README.md"));
        config.repo_type = "hg".to_string();
        config.repo_url = Some("https://github.com/acme/widgets".to_string());

        // Act
        let descriptor = config.descriptor()?;

        // Assert
        assert_eq!(
            descriptor,
            Some(RepositoryDescriptor::new("hg", "https://github.com/acme/widgets"))
        );
        Ok(())
    }

    #[test]
    fn test_descriptor_from_manifest() -> Result<()> {
        // Arrange
        let dir = TempDir::new()?;
        let manifest = dir.path().join("package.json");
        fs::write(
            &manifest,
            r#"{ "repository": { "type": "git", "url": "git@github.com:acme/widgets.git" } }"#,
        )?;
        let mut config = config(dir.path().join("README.md"));
        config.manifest = Some(manifest);

        // Act
        let descriptor = config.descriptor()?;

        // Assert
        assert_eq!(
            descriptor,
            Some(RepositoryDescriptor::git("git@github.com:acme/widgets.git"))
        );
        Ok(())
    }

    #[test]
    fn test_descriptor_from_unreadable_manifest() {
        // Arrange
        let mut config = config(PathBuf::from("README.md"));
        config.manifest = Some(PathBuf::from("does/not/exist.json"));

        // Act
        let result = config.descriptor();

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_title_defaults_to_file_stem() {
        // Arrange
        let mut config = config(PathBuf::from("docs/GUIDE.md"));

        // Act & Assert
        assert_eq!(config.title(), "GUIDE");
        assert_eq!(config.input_name(), "GUIDE.md");

        config.title = Some("Widgets".to_string());
        assert_eq!(config.title(), "Widgets");
    }

    #[test]
    fn test_input_dir_for_bare_file_name() {
        // Arrange
        let config = config(PathBuf::from("README.md"));

        // Act & Assert
        assert_eq!(config.input_dir(), Path::new("."));
    }
}
