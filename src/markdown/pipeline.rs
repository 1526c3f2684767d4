//! Ordered document processing stages.
//!
//! A [`Pipeline`] runs text transforms on the raw Markdown, parses it,
//! runs tree transforms over the AST, hands the tree to a render step and
//! sanitizes the resulting HTML. The sanitizer is supplied to
//! [`PipelineBuilder::build`] so it is always the final stage.

use ammonia::{Builder, UrlRelative};
use anyhow::Result;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options};
use std::borrow::Cow;

use super::links::UriRewriter;
use crate::repository::ResolvedRepository;

/// Transform applied to Markdown text before parsing.
pub type TextTransform = Box<dyn Fn(String) -> String>;

/// Transform applied to the parsed Markdown tree.
pub trait TreeTransform {
    /// Mutates the tree in place.
    fn transform<'a>(&self, root: &'a AstNode<'a>);
}

/// Rewrites link targets and image sources of Markdown nodes.
#[derive(Debug, Clone)]
pub struct RewriteUris {
    links: UriRewriter,
    images: UriRewriter,
}

impl RewriteUris {
    /// Creates transform using separate link and image rewriters.
    pub fn new(links: UriRewriter, images: UriRewriter) -> Self {
        Self { links, images }
    }
}

impl TreeTransform for RewriteUris {
    fn transform<'a>(&self, root: &'a AstNode<'a>) {
        for node in root.descendants() {
            match node.data.borrow_mut().value {
                NodeValue::Link(ref mut link) => link.url = self.links.rewrite(&link.url),
                NodeValue::Image(ref mut image) => image.url = self.images.rewrite(&image.url),
                _ => {}
            }
        }
    }
}

/// Drops code fence annotations after the first comma (`rust,no_run`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimCodeInfo;

impl TreeTransform for TrimCodeInfo {
    fn transform<'a>(&self, root: &'a AstNode<'a>) {
        for node in root.descendants() {
            if let NodeValue::CodeBlock(ref mut block) = node.data.borrow_mut().value
                && let Some((before_comma, _)) = block.info.split_once(',')
            {
                block.info = before_comma.trim_end().to_string();
            }
        }
    }
}

/// Converts CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// HTML sanitizer with a GitHub style allowlist.
///
/// Raw HTML anchors and images are passed through the configured URI
/// rewriters while being cleaned.
pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    /// Creates sanitizer that leaves URIs as they are.
    pub fn new() -> Self {
        Self {
            builder: Self::policy(),
        }
    }

    /// Creates sanitizer rewriting raw HTML `a[href]` and `img[src]`.
    ///
    /// The filter sees every `href` and `src` in the rendered document,
    /// including those of Markdown links already handled by [`RewriteUris`].
    /// Those pass through unchanged since a rewritten URI is absolute and
    /// rewriting is idempotent.
    pub fn with_rewriters(links: UriRewriter, images: UriRewriter) -> Self {
        let mut builder = Self::policy();
        builder.attribute_filter(move |element, attribute, value| match (element, attribute) {
            ("a", "href") => Some(Cow::Owned(links.rewrite(value))),
            ("img", "src") => Some(Cow::Owned(images.rewrite(value))),
            _ => Some(Cow::Borrowed(value)),
        });
        Self { builder }
    }

    fn policy() -> Builder<'static> {
        let mut builder = Builder::default();
        builder
            .add_tags(&["input", "ol", "picture", "section", "source"])
            .link_rel(Some("nofollow noopener noreferrer"))
            .add_generic_attributes(&["align", "class", "id"])
            .add_tag_attributes("a", &["target"])
            .add_tag_attributes("input", &["checked", "disabled", "type"])
            .add_tag_attributes("source", &["media", "srcset"])
            .url_relative(UrlRelative::PassThrough)
            .id_prefix(Some("user-content-"));
        builder
    }

    /// Removes disallowed tags and attributes from HTML.
    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered processing stages ending in sanitization.
pub struct Pipeline {
    text_transforms: Vec<TextTransform>,
    tree_transforms: Vec<Box<dyn TreeTransform>>,
    sanitizer: Sanitizer,
}

impl Pipeline {
    /// Starts building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Creates the standard pipeline for a render pass.
    ///
    /// Normalizes line endings, trims code fence annotations, rewrites
    /// Markdown link and image URIs, then sanitizes with raw HTML URIs
    /// rewritten the same way.
    pub fn for_repository(repository: Option<ResolvedRepository>) -> Self {
        let links = UriRewriter::links(repository.clone());
        let images = UriRewriter::images(repository);

        Self::builder()
            .text_transform(normalize_line_endings)
            .tree_transform(TrimCodeInfo)
            .tree_transform(RewriteUris::new(links.clone(), images.clone()))
            .build(Sanitizer::with_rewriters(links, images))
    }

    #[cfg(test)]
    fn text_transform_count(&self) -> usize {
        self.text_transforms.len()
    }

    #[cfg(test)]
    fn tree_transform_count(&self) -> usize {
        self.tree_transforms.len()
    }

    /// Runs every stage over Markdown text.
    ///
    /// # Arguments
    ///
    /// * `text`: Markdown document
    /// * `options`: Parser options
    /// * `render`: Converts the transformed tree to HTML
    ///
    /// # Returns
    ///
    /// Sanitized HTML
    ///
    /// # Errors
    ///
    /// Returns error if the render step fails
    pub fn run<F>(&self, text: &str, options: &Options, render: F) -> Result<String>
    where
        F: for<'a> FnOnce(&'a AstNode<'a>) -> Result<String>,
    {
        let text = self
            .text_transforms
            .iter()
            .fold(text.to_string(), |text, transform| transform(text));

        let arena = Arena::new();
        let root = comrak::parse_document(&arena, &text, options);

        for transform in &self.tree_transforms {
            transform.transform(root);
        }

        let html = render(root)?;
        Ok(self.sanitizer.clean(&html))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::for_repository(None)
    }
}

/// Builder collecting transforms in application order.
#[derive(Default)]
pub struct PipelineBuilder {
    text_transforms: Vec<TextTransform>,
    tree_transforms: Vec<Box<dyn TreeTransform>>,
}

impl PipelineBuilder {
    /// Appends transform applied to text before parsing.
    pub fn text_transform(mut self, transform: impl Fn(String) -> String + 'static) -> Self {
        self.text_transforms.push(Box::new(transform));
        self
    }

    /// Appends transform applied to the parsed tree.
    pub fn tree_transform(mut self, transform: impl TreeTransform + 'static) -> Self {
        self.tree_transforms.push(Box::new(transform));
        self
    }

    /// Finishes pipeline with sanitizer as its last stage.
    pub fn build(self, sanitizer: Sanitizer) -> Pipeline {
        Pipeline {
            text_transforms: self.text_transforms,
            tree_transforms: self.tree_transforms,
            sanitizer,
        }
    }
}
