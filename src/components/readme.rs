//! Rendered README card component

use maud::{Markup, PreEscaped, html};

use crate::repository::ResolvedRepository;

/// Renders README card with header and sanitized content
///
/// Shows the repository as `owner / repo` linking to GitHub when resolved,
/// followed by the rendered markdown.
///
/// # Arguments
///
/// * `file_name`: Name of rendered markdown file
/// * `repository`: Resolved GitHub repository, if any
/// * `content_html`: Sanitized HTML produced by the markdown renderer
///
/// # Returns
///
/// README card markup
pub fn readme_card(
    file_name: &str,
    repository: Option<&ResolvedRepository>,
    content_html: &str,
) -> Markup {
    html! {
        @if let Some(repo) = repository {
            header class="repo-header" {
                a href=(format!("https://github.com/{}/{}", repo.owner(), repo.repo())) class="repo-link" {
                    span class="repo-owner" { (repo.owner()) " / " }
                    span class="repo-name" { (repo.repo()) }
                }
            }
        }
        section class="readme-section" {
            div class="readme-card" {
                div class="readme-header" {
                    span class="readme-title" { (file_name) }
                }
                div class="readme-content" {
                    (PreEscaped(content_html))
                }
            }
        }
    }
}
