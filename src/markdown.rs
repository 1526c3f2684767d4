//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module renders markdown using comrak with GFM extensions (tables,
//! strikethrough, autolinks, task lists), styled element renderers, and
//! rewriting of relative links and images for GitHub hosted repositories.
//! Output is sanitized with ammonia as the final pipeline stage.

mod elements;
mod highlight;
mod links;
mod pipeline;
mod renderer;

pub use elements::{
    CodeRenderer, Content, Element, ElementRenderer, ElementTag, HeadingRenderer, PlainRenderer,
    PreRenderer, RendererTable, RuleRenderer, StyledRenderer,
};
pub use highlight::CodeHighlighter;
pub use links::{RewriteContext, UriRewriter, rewrite_uri, sanitize_uri};
pub use pipeline::{
    Pipeline, PipelineBuilder, RewriteUris, Sanitizer, TextTransform, TreeTransform, TrimCodeInfo,
    normalize_line_endings,
};
pub use renderer::MarkdownRenderer;
