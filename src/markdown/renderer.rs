//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::Options;
use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use std::collections::HashMap;
use std::path::Path;

use super::elements::{Element, ElementTag, RendererTable};
use super::highlight::html_escape;
use super::pipeline::Pipeline;
use crate::repository::{RepositoryDescriptor, ResolvedRepository, parse_github_repository};

/// Renders markdown to sanitized HTML with GitHub Flavored Markdown extensions.
///
/// Markdown elements are rendered through a [`RendererTable`]; relative link
/// and image URIs are rewritten to GitHub URLs when a GitHub repository is
/// known. Output is always sanitized.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    elements: RendererTable,
    pipeline: Pipeline,
    repository: Option<ResolvedRepository>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer that leaves relative URIs as they are.
    ///
    /// Enables tables, strikethrough, autolinks, task lists, superscript and
    /// the GFM tag filter. Raw HTML is kept for the sanitizer to clean.
    pub fn new() -> Self {
        Self::with_repository(None)
    }

    /// Creates renderer for a package's repository descriptor.
    ///
    /// The descriptor is parsed once; if it names a GitHub repository,
    /// relative links point at the blob view and relative images at raw
    /// file contents of its default branch.
    ///
    /// # Arguments
    ///
    /// * `descriptor`: Repository reference of the package
    pub fn for_repository(descriptor: &RepositoryDescriptor) -> Self {
        let repository = parse_github_repository(descriptor);
        if repository.is_none() {
            log::debug!(
                "Repository {} ({}) is not on GitHub, relative links kept",
                descriptor.url(),
                descriptor.kind()
            );
        }
        Self::with_repository(repository)
    }

    /// Creates renderer for an already resolved repository.
    pub fn with_repository(repository: Option<ResolvedRepository>) -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.superscript = true;
        options.extension.tagfilter = true;

        // Sanitized after rendering
        options.render.unsafe_ = true;

        Self {
            options,
            elements: RendererTable::new(),
            pipeline: Pipeline::for_repository(repository.clone()),
            repository,
        }
    }

    /// Replaces the processing pipeline.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replaces the element renderer table.
    pub fn with_elements(mut self, elements: RendererTable) -> Self {
        self.elements = elements;
        self
    }

    /// Element renderer table, for registering custom renderers.
    pub fn elements_mut(&mut self) -> &mut RendererTable {
        &mut self.elements
    }

    /// GitHub repository URIs are rewritten against, if any.
    pub fn repository(&self) -> Option<&ResolvedRepository> {
        self.repository.as_ref()
    }

    /// Renders markdown content to sanitized HTML.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Errors
    ///
    /// Returns error if a node falls back to comrak's formatter and
    /// formatting fails
    pub fn render(&self, content: &str) -> Result<String> {
        let options = &self.options;
        let elements = &self.elements;

        self.pipeline.run(content, options, |root| {
            HtmlWriter::new(elements, options).render(root)
        })
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the markdown tree and lowers nodes to elements.
///
/// Nodes of extensions that are not enabled are formatted by comrak
/// directly.
struct HtmlWriter<'r, 'o> {
    elements: &'r RendererTable,
    options: &'r Options<'o>,
    slugs: HashMap<String, usize>,
}

impl<'r, 'o> HtmlWriter<'r, 'o> {
    fn new(elements: &'r RendererTable, options: &'r Options<'o>) -> Self {
        Self {
            elements,
            options,
            slugs: HashMap::new(),
        }
    }

    fn render<'a>(&mut self, root: &'a AstNode<'a>) -> Result<String> {
        self.render_node(root)
    }

    fn render_children<'a>(&mut self, node: &'a AstNode<'a>) -> Result<String> {
        let mut html = String::new();
        for child in node.children() {
            html.push_str(&self.render_node(child)?);
        }
        Ok(html)
    }

    fn render_node<'a>(&mut self, node: &'a AstNode<'a>) -> Result<String> {
        let value = node.data.borrow().value.clone();

        let html = match value {
            NodeValue::Document => self.render_children(node)?,
            NodeValue::Paragraph => {
                let children = self.render_children(node)?;
                if is_tight_paragraph(node) {
                    children
                } else {
                    self.element(Element::new(ElementTag::P, children))
                }
            }
            NodeValue::Heading(heading) => {
                let tag = ElementTag::heading(heading.level).unwrap_or(ElementTag::H6);
                let slug = self.slug(&collect_text(node));
                let mut element = Element::new(tag, self.render_children(node)?);
                if !slug.is_empty() {
                    element = element.attr("id", slug);
                }
                self.element(element)
            }
            NodeValue::BlockQuote => {
                let children = self.render_children(node)?;
                self.element(Element::new(ElementTag::Blockquote, format!("\n{}", children)))
            }
            NodeValue::List(list) => {
                let children = self.render_children(node)?;
                match list.list_type {
                    ListType::Bullet => {
                        self.element(Element::new(ElementTag::Ul, format!("\n{}", children)))
                    }
                    ListType::Ordered => {
                        let mut element = Element::new(ElementTag::Ol, format!("\n{}", children));
                        if list.start != 1 {
                            element = element.attr("start", list.start.to_string());
                        }
                        self.element(element)
                    }
                }
            }
            NodeValue::Item(_) => {
                let children = self.render_children(node)?;
                self.element(Element::new(ElementTag::Li, children))
            }
            NodeValue::TaskItem(symbol) => {
                let mut checkbox = Element::void(ElementTag::Input)
                    .attr("type", "checkbox")
                    .attr("disabled", "");
                if symbol.is_some() {
                    checkbox = checkbox.attr("checked", "");
                }
                let checkbox = self.element(checkbox);
                let children = self.render_children(node)?;
                self.element(Element::new(
                    ElementTag::Li,
                    format!("{} {}", checkbox, children),
                ))
            }
            NodeValue::Table(table) => self.table(node, &table.alignments)?,
            NodeValue::TableRow(_) | NodeValue::TableCell => self.render_children(node)?,
            NodeValue::CodeBlock(block) => {
                let language = block.info.split_whitespace().next();
                let mut code = Element::code(&block.literal, language);
                if let Some(language) = language {
                    code = code.attr("class", format!("language-{}", language));
                }
                let code = self.element(code);
                self.element(Element::new(ElementTag::Pre, code))
            }
            NodeValue::ThematicBreak => self.element(Element::void(ElementTag::Hr)),
            NodeValue::HtmlBlock(block) => block.literal,
            NodeValue::HtmlInline(raw) => raw,
            NodeValue::Text(text) => html_escape(&text),
            NodeValue::SoftBreak => "\n".to_string(),
            NodeValue::LineBreak => self.element(Element::void(ElementTag::Br)) + "\n",
            NodeValue::Code(code) => self.element(Element::code(&code.literal, None)),
            NodeValue::Emph => self.inline(ElementTag::Em, node)?,
            NodeValue::Strong => self.inline(ElementTag::Strong, node)?,
            NodeValue::Strikethrough => self.inline(ElementTag::Del, node)?,
            NodeValue::Superscript => self.inline(ElementTag::Sup, node)?,
            NodeValue::Link(link) => {
                let mut element =
                    Element::new(ElementTag::A, self.render_children(node)?).attr("href", link.url);
                if !link.title.is_empty() {
                    element = element.attr("title", link.title);
                }
                self.element(element)
            }
            NodeValue::Image(image) => {
                let mut element = Element::void(ElementTag::Img)
                    .attr("src", image.url)
                    .attr("alt", collect_text(node));
                if !image.title.is_empty() {
                    element = element.attr("title", image.title);
                }
                self.element(element)
            }
            _ => self.format_with_comrak(node)?,
        };

        Ok(html)
    }

    fn element(&self, element: Element<'_>) -> String {
        self.elements.render(&element)
    }

    fn inline<'a>(&mut self, tag: ElementTag, node: &'a AstNode<'a>) -> Result<String> {
        let children = self.render_children(node)?;
        Ok(self.element(Element::new(tag, children)))
    }

    fn table<'a>(
        &mut self,
        node: &'a AstNode<'a>,
        alignments: &[TableAlignment],
    ) -> Result<String> {
        let mut head = String::new();
        let mut body = String::new();

        for row in node.children() {
            let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let cell_tag = if header { ElementTag::Th } else { ElementTag::Td };

            let mut cells = String::from("\n");
            for (column, cell) in row.children().enumerate() {
                let mut element = Element::new(cell_tag, self.render_children(cell)?);
                if let Some(align) = alignments.get(column).and_then(|a| alignment_name(*a)) {
                    element = element.attr("align", align);
                }
                cells.push_str(&self.element(element));
            }

            let row_html = self.element(Element::new(ElementTag::Tr, cells));
            if header {
                head.push_str(&row_html);
            } else {
                body.push_str(&row_html);
            }
        }

        let mut children = String::from("\n");
        if !head.is_empty() {
            children.push_str(
                &self.element(Element::new(ElementTag::Thead, format!("\n{}", head))),
            );
        }
        if !body.is_empty() {
            children.push_str(
                &self.element(Element::new(ElementTag::Tbody, format!("\n{}", body))),
            );
        }
        Ok(self.element(Element::new(ElementTag::Table, children)))
    }

    fn format_with_comrak<'a>(&self, node: &'a AstNode<'a>) -> Result<String> {
        let mut html = Vec::new();
        comrak::format_html(node, self.options, &mut html)
            .context("Failed to format markdown node")?;
        String::from_utf8(html).context("Formatted markdown contains invalid UTF8")
    }

    /// Returns unique GitHub style anchor slug for heading text.
    fn slug(&mut self, text: &str) -> String {
        let base: String = text
            .trim()
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('-'),
                '-' | '_' => Some(c),
                c if c.is_alphanumeric() => Some(c),
                _ => None,
            })
            .collect();

        let mut slug = base.clone();
        while self.slugs.contains_key(&slug) {
            let count = self.slugs.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.slugs.insert(slug.clone(), 0);
        slug
    }
}

/// Returns `align` attribute value for table column alignment.
fn alignment_name(alignment: TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::Left => Some("left"),
        TableAlignment::Center => Some("center"),
        TableAlignment::Right => Some("right"),
        TableAlignment::None => None,
    }
}

/// Paragraphs directly inside items of tight lists render without `<p>`.
fn is_tight_paragraph<'a>(node: &'a AstNode<'a>) -> bool {
    let Some(list) = node.parent().and_then(|item| item.parent()) else {
        return false;
    };
    matches!(list.data.borrow().value, NodeValue::List(ref nl) if nl.tight)
}

/// Concatenates text and inline code beneath node.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(literal) => text.push_str(literal),
            NodeValue::Code(code) => text.push_str(&code.literal),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::elements::StyledRenderer;

    fn acme_renderer() -> MarkdownRenderer<'static> {
        MarkdownRenderer::for_repository(&RepositoryDescriptor::git(
            "git@github.com:acme/widgets.git",
        ))
    }

    #[test]
    fn test_render_basic_markdown() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "# Hello\n\nThis is **bold** text.";

        // Act
        let html = renderer.render(markdown).expect("Should render markdown");

        // Assert
        assert!(
            html.contains("<h1 class=\"md-heading md-h1\" id=\"user-content-hello\">Hello</h1>"),
            "Should render styled heading: {}",
            html
        );
        assert!(
            html.contains("<p class=\"md-p\">This is <strong>bold</strong> text.</p>"),
            "Should render styled paragraph: {}",
            html
        );
    }

    #[test]
    fn test_render_empty_markdown() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("").expect("Empty markdown should render");

        // Assert
        assert!(html.is_empty());
    }

    #[test]
    fn test_render_gfm_tables() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | [x](a.md) |\n";

        // Act
        let html = renderer.render(markdown).expect("Should render table");

        // Assert
        assert!(html.contains("<table>"), "Should contain table: {}", html);
        assert!(html.contains("<th>Header 1</th>"), "Should contain header: {}", html);
        assert!(html.contains("<td>Cell 1</td>"), "Should contain cell: {}", html);
    }

    #[test]
    fn test_render_gfm_strikethrough_and_superscript() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("~~gone~~ and e=mc^2^")
            .expect("Should render");

        // Assert
        assert!(html.contains("<del>gone</del>"), "Should strike: {}", html);
        assert!(
            html.contains("<sup class=\"md-sup\">2</sup>"),
            "Should render styled superscript: {}",
            html
        );
    }

    #[test]
    fn test_render_gfm_tasklist() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "- [ ] Unchecked task\n- [x] Checked task\n";

        // Act
        let html = renderer.render(markdown).expect("Should render tasklist");

        // Assert
        assert!(html.contains("type=\"checkbox\""), "Should contain checkbox: {}", html);
        assert!(html.contains("disabled"), "Checkboxes should be disabled: {}", html);
        assert!(html.contains("Checked task"));
    }

    #[test]
    fn test_table_cells_use_element_renderers() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "| Name | Notes |\n|:-----|------:|\n| [x](a.md) | *e* `c` |\n";

        // Act
        let html = renderer.render(markdown).expect("Should render table");

        // Assert
        assert!(html.contains("<thead>"), "Should have head: {}", html);
        assert!(html.contains("<tbody>"), "Should have body: {}", html);
        assert!(html.contains("<th align=\"left\">Name</th>"), "{}", html);
        assert!(html.contains("<th align=\"right\">Notes</th>"), "{}", html);
        assert!(html.contains("<a class=\"md-link\" href=\"a.md\""), "{}", html);
        assert!(html.contains("<em class=\"md-em\">e</em>"), "{}", html);
        assert!(html.contains("<code class=\"md-code\">c</code>"), "{}", html);
    }

    #[test]
    fn test_table_links_rewritten_for_github_repository() {
        // Arrange
        let renderer = acme_renderer();

        // Act
        let html = renderer
            .render("| Doc |\n|-----|\n| [guide](docs/guide.md) |\n")
            .expect("Should render table");

        // Assert
        assert!(
            html.contains("href=\"https://github.com/acme/widgets/blob/HEAD/docs/guide.md\""),
            "{}",
            html
        );
    }

    #[test]
    fn test_task_items_use_element_renderers() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "- [ ] task with [x](a.md)\n  - nested\n- [x] done\n";

        // Act
        let html = renderer.render(markdown).expect("Should render tasklist");

        // Assert
        assert!(
            html.contains("<li class=\"md-li\"><input type=\"checkbox\" disabled=\"\"> task with"),
            "Task item should be styled with checkbox first: {}",
            html
        );
        assert!(html.contains("<a class=\"md-link\" href=\"a.md\""), "{}", html);
        assert!(html.contains("<ul class=\"md-ul\">"), "Nested list styled: {}", html);
        assert!(
            html.contains("<li class=\"md-li\">nested</li>"),
            "Nested item styled: {}",
            html
        );
        assert!(
            html.contains("<input type=\"checkbox\" disabled=\"\" checked=\"\">"),
            "Checked task should be checked: {}",
            html
        );
    }

    #[test]
    fn test_render_tight_and_loose_lists() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let tight = renderer.render("- one\n- two\n").expect("Should render");
        let loose = renderer.render("- one\n\n- two\n").expect("Should render");

        // Assert
        assert!(
            tight.contains("<li class=\"md-li\">one</li>"),
            "Tight items have no paragraph: {}",
            tight
        );
        assert!(
            loose.contains("<li class=\"md-li\"><p class=\"md-p\">one</p>"),
            "Loose items wrap paragraphs: {}",
            loose
        );
        assert!(tight.contains("<ul class=\"md-ul\">"));
    }

    #[test]
    fn test_render_ordered_list_start() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("3. three\n4. four\n").expect("Should render");

        // Assert
        assert!(
            html.contains("<ol class=\"md-ol\" start=\"3\">"),
            "Should keep start number: {}",
            html
        );
    }

    #[test]
    fn test_render_code_block_highlighted() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n";

        // Act
        let html = renderer.render(markdown).expect("Should render code block");

        // Assert
        assert!(html.contains("<pre class=\"md-pre\">"), "Should contain pre: {}", html);
        assert!(
            html.contains("<code class=\"md-code-block language-rust\">"),
            "Should keep language class: {}",
            html
        );
        assert!(html.contains("<span class=\"hljs-"), "Should highlight: {}", html);
        assert!(html.contains("println!"));
    }

    #[test]
    fn test_render_code_block_annotation_after_comma() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("```rust, no_run\nlet x = 1;\n```\n")
            .expect("Should render");

        // Assert
        assert!(
            html.contains("language-rust\""),
            "Annotation should be dropped: {}",
            html
        );
    }

    #[test]
    fn test_render_inline_code_escaped() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("Use `Vec<u8>` here").expect("Should render");

        // Assert
        assert!(
            html.contains("<code class=\"md-code\">Vec&lt;u8&gt;</code>"),
            "Should escape inline code: {}",
            html
        );
    }

    #[test]
    fn test_render_blockquote_and_rule() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("> quoted\n\n---\n").expect("Should render");

        // Assert
        assert!(html.contains("<blockquote class=\"md-blockquote\">"), "{}", html);
        assert!(html.contains("<hr class=\"md-hr\">"), "{}", html);
    }

    #[test]
    fn test_heading_slugs_are_unique() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("## Usage\n\n## Usage\n\n## What's `new`?\n")
            .expect("Should render");

        // Assert
        assert!(html.contains("id=\"user-content-usage\""), "{}", html);
        assert!(html.contains("id=\"user-content-usage-1\""), "{}", html);
        assert!(html.contains("id=\"user-content-whats-new\""), "{}", html);
    }

    #[test]
    fn test_heading_slug_suffix_never_collides() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("## Usage\n\n## Usage\n\n## Usage 1\n")
            .expect("Should render");

        // Assert
        assert_eq!(html.matches("id=\"user-content-usage\"").count(), 1, "{}", html);
        assert_eq!(html.matches("id=\"user-content-usage-1\"").count(), 1, "{}", html);
        assert!(html.contains("id=\"user-content-usage-1-1\""), "{}", html);
    }

    #[test]
    fn test_script_and_handlers_are_removed() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "<script>alert('xss')</script>\n\n<a href=\"https://example.com\" onclick=\"steal()\">x</a>\n";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert!(!html.contains("<script"), "Script must be removed: {}", html);
        assert!(!html.contains("onclick"), "Handlers must be removed: {}", html);
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_javascript_links_are_neutralized() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("[click](javascript:alert(1))")
            .expect("Should render");

        // Assert
        assert!(!html.contains("alert"), "Script URI must not survive: {}", html);
    }

    #[test]
    fn test_relative_links_rewritten_for_github_repository() {
        // Arrange
        let renderer = acme_renderer();
        let markdown = "[Guide](docs/guide.md)\n[Anchor](#section)\n[Root](/abs/path)\n[Site](https://example.com/x)\n![Logo](assets/logo.png)\n";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert!(
            html.contains("href=\"https://github.com/acme/widgets/blob/HEAD/docs/guide.md\""),
            "Relative link should use blob view: {}",
            html
        );
        assert!(html.contains("href=\"#section\""), "{}", html);
        assert!(html.contains("href=\"/abs/path\""), "{}", html);
        assert!(html.contains("href=\"https://example.com/x\""), "{}", html);
        assert!(
            html.contains("src=\"https://raw.githubusercontent.com/acme/widgets/HEAD/assets/logo.png\""),
            "Relative image should use raw content: {}",
            html
        );
    }

    #[test]
    fn test_raw_html_uris_rewritten_for_github_repository() {
        // Arrange
        let renderer = acme_renderer();
        let markdown = "<p align=\"center\"><img src=\"docs/banner.png\" alt=\"banner\"></p>\n";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert!(
            html.contains("src=\"https://raw.githubusercontent.com/acme/widgets/HEAD/docs/banner.png\""),
            "Raw HTML image should be rewritten: {}",
            html
        );
        assert!(html.contains("align=\"center\""), "{}", html);
    }

    #[test]
    fn test_relative_links_kept_without_github_repository() {
        // Arrange
        let renderer =
            MarkdownRenderer::for_repository(&RepositoryDescriptor::git("https://gitlab.com/acme/widgets"));

        // Act
        let html = renderer.render("[Guide](docs/guide.md)").expect("Should render");

        // Assert
        assert!(renderer.repository().is_none());
        assert!(html.contains("href=\"docs/guide.md\""), "{}", html);
    }

    #[test]
    fn test_links_get_rel_and_title() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("[x](https://example.com \"Example\")")
            .expect("Should render");

        // Assert
        assert!(html.contains("title=\"Example\""), "{}", html);
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""), "{}", html);
        assert!(html.contains("class=\"md-link\""), "{}", html);
    }

    #[test]
    fn test_image_alt_text() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("![The *logo*](logo.png)")
            .expect("Should render");

        // Assert
        assert!(html.contains("alt=\"The logo\""), "{}", html);
    }

    #[test]
    fn test_custom_element_renderer() {
        // Arrange
        let mut renderer = MarkdownRenderer::new();
        renderer
            .elements_mut()
            .insert(ElementTag::Strong, StyledRenderer::new("loud"));

        // Act
        let html = renderer.render("**hey**").expect("Should render");

        // Assert
        assert!(html.contains("<strong class=\"loud\">hey</strong>"), "{}", html);
    }

    #[test]
    fn test_plain_element_table() {
        // Arrange
        let renderer = MarkdownRenderer::new().with_elements(RendererTable::empty());

        // Act
        let html = renderer.render("*hi*").expect("Should render");

        // Assert
        assert_eq!(html, "<p><em>hi</em></p>\n");
    }

    #[test]
    fn test_crlf_input() {
        // Arrange
        let renderer = MarkdownRenderer::new().with_elements(RendererTable::empty());

        // Act
        let html = renderer.render("line one\r\nline two\r\n").expect("Should render");

        // Assert
        assert_eq!(html, "<p>line one\nline two</p>\n");
    }

    #[test]
    fn test_render_file() {
        // Arrange
        let dir = tempfile::TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("README.md");
        std::fs::write(&path, "# Title\n").expect("Should write file");
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render_file(&path).expect("Should render file");

        // Assert
        assert!(html.contains("Title"));
    }

    #[test]
    fn test_render_file_missing() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let result = renderer.render_file("does/not/exist.md");

        // Assert
        assert!(result.is_err(), "Missing file should fail");
    }
}
