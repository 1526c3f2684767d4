//! Package README rendering with GitHub aware link rewriting.

mod assets;
pub mod components;
mod config;
mod markdown;
mod repository;

pub use assets::{STYLESHEET, write_css_assets};
pub use config::Config;
pub use markdown::{
    CodeHighlighter, CodeRenderer, Content, Element, ElementRenderer, ElementTag,
    HeadingRenderer, MarkdownRenderer, Pipeline, PipelineBuilder, PlainRenderer, PreRenderer,
    RendererTable, RewriteContext, RewriteUris, RuleRenderer, Sanitizer, StyledRenderer,
    TextTransform, TreeTransform, TrimCodeInfo, UriRewriter, normalize_line_endings, rewrite_uri,
    sanitize_uri,
};
pub use repository::{RepositoryDescriptor, ResolvedRepository, parse_github_repository};
