//! Link and image URI rewriting for GitHub hosted repositories.

use crate::repository::ResolvedRepository;

/// URI schemes kept by [`sanitize_uri`].
const SAFE_PROTOCOLS: &[&str] = &["http", "https", "mailto", "tel"];

/// Replacement for URIs with unsafe schemes.
const NEUTRALIZED_URI: &str = "javascript:void(0)";

/// GitHub host and ref segment used to build absolute URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteContext {
    prefix_host: &'static str,
    ref_suffix: &'static str,
}

impl RewriteContext {
    /// Raw file contents, used for image sources.
    pub const IMAGE: Self = Self::new("raw.githubusercontent.com", "HEAD");

    /// Rendered blob view, used for link targets.
    pub const LINK: Self = Self::new("github.com", "blob/HEAD");

    /// Creates context for host and ref segment.
    pub const fn new(prefix_host: &'static str, ref_suffix: &'static str) -> Self {
        Self {
            prefix_host,
            ref_suffix,
        }
    }

    /// GitHub host (e.g. `github.com`).
    pub fn prefix_host(&self) -> &'static str {
        self.prefix_host
    }

    /// Path segment between repository and file path (e.g. `blob/HEAD`).
    pub fn ref_suffix(&self) -> &'static str {
        self.ref_suffix
    }
}

/// Rewrites relative URIs into absolute GitHub URLs.
///
/// Holds the rewrite context of one call site (links or images) together
/// with the repository resolved for the current render. Without a resolved
/// repository, URIs are only normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRewriter {
    context: RewriteContext,
    repository: Option<ResolvedRepository>,
}

impl UriRewriter {
    /// Creates rewriter for context and optional resolved repository.
    pub fn new(context: RewriteContext, repository: Option<ResolvedRepository>) -> Self {
        Self {
            context,
            repository,
        }
    }

    /// Creates rewriter for link targets.
    pub fn links(repository: Option<ResolvedRepository>) -> Self {
        Self::new(RewriteContext::LINK, repository)
    }

    /// Creates rewriter for image sources.
    pub fn images(repository: Option<ResolvedRepository>) -> Self {
        Self::new(RewriteContext::IMAGE, repository)
    }

    /// Rewrite context of this rewriter.
    pub fn context(&self) -> RewriteContext {
        self.context
    }

    /// Repository URIs are rewritten against, if any.
    pub fn repository(&self) -> Option<&ResolvedRepository> {
        self.repository.as_ref()
    }

    /// Rewrites URI found in rendered content.
    ///
    /// See [`rewrite_uri`].
    pub fn rewrite(&self, uri: &str) -> String {
        rewrite_uri(uri, self.context, self.repository.as_ref())
    }
}

/// Normalizes URI and rewrites it into an absolute GitHub URL when relative.
///
/// The URI is first passed through [`sanitize_uri`]. The normalized URI is
/// returned as is when no repository is resolved, when it is an anchor
/// (`#...`), root relative (`/...`), or already carries a scheme (`://`).
/// Everything else becomes
/// `https://{host}/{owner}/{repo}/{ref_suffix}/{uri}`.
///
/// # Arguments
///
/// * `uri`: Link target or image source
/// * `context`: Host and ref segment for this call site
/// * `repository`: Resolved GitHub repository, if any
///
/// # Returns
///
/// Normalized or rewritten URI
pub fn rewrite_uri(
    uri: &str,
    context: RewriteContext,
    repository: Option<&ResolvedRepository>,
) -> String {
    let url = sanitize_uri(uri);

    let Some(repository) = repository else {
        return url;
    };

    if url.starts_with('#') || url.starts_with('/') || url.contains("://") {
        return url;
    }

    format!(
        "https://{}/{}/{}/{}/{}",
        context.prefix_host(),
        repository.owner(),
        repository.repo(),
        context.ref_suffix(),
        url
    )
}

/// Baseline URI validation applied before rewriting.
///
/// Trims surrounding whitespace and neutralizes URIs whose scheme is not
/// http, https, mailto or tel. A colon appearing after a `?` or `#` is not
/// treated as a scheme separator.
///
/// # Arguments
///
/// * `uri`: Raw URI from document
///
/// # Returns
///
/// Trimmed URI, or `javascript:void(0)` for unsafe schemes
pub fn sanitize_uri(uri: &str) -> String {
    let url = uri.trim();

    if url.starts_with('#') || url.starts_with('/') {
        return url.to_string();
    }

    let Some(colon) = url.find(':') else {
        return url.to_string();
    };

    let scheme = &url[..colon];
    if SAFE_PROTOCOLS
        .iter()
        .any(|protocol| scheme.eq_ignore_ascii_case(protocol))
    {
        return url.to_string();
    }

    // Colon inside query or fragment, not a scheme
    let after_delimiter = |delimiter: char| url.find(delimiter).is_some_and(|pos| colon > pos);
    if after_delimiter('?') || after_delimiter('#') {
        return url.to_string();
    }

    NEUTRALIZED_URI.to_string()
}
