//! Shared test utilities for integration tests.
//!
//! Provides helpers for creating temporary git repositories with remotes
//! and writing fixture files.

#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Creates temporary git repository with test configuration.
///
/// # Errors
///
/// Returns error if git commands fail or directory creation fails
pub fn create_test_repo() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    run_git(path, &["init"])?;
    run_git(path, &["config", "user.name", "Test User"])?;
    run_git(path, &["config", "user.email", "test@example.com"])?;

    Ok(dir)
}

/// Adds remote to repository.
///
/// # Errors
///
/// Returns error if git remote add fails
pub fn git_remote_add(repo_path: &Path, name: &str, url: &str) -> Result<()> {
    run_git(repo_path, &["remote", "add", name, url])
}

/// Writes file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<()> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

/// README exercising links, images, raw HTML and code.
pub const SAMPLE_README: &str = r#"# Widgets

[![build](https://img.shields.io/badge/build-passing-green.svg)](https://ci.example.com)

See the [guide](docs/guide.md) and the [changelog](/CHANGELOG.md).
Jump to [usage](#usage).

![Architecture](docs/architecture.png)

<p align="center"><img src="docs/banner.svg" alt="banner"></p>

## Usage

```rust,no_run
let widget = Widget::new();
```
"#;

fn run_git(path: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).current_dir(path).output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}
