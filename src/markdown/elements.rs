//! Element renderers keyed by HTML tag.
//!
//! Markdown nodes are lowered to [`Element`]s and rendered by whichever
//! [`ElementRenderer`] the [`RendererTable`] holds for their tag. Tags
//! without an entry render as plain HTML elements.

use maud::{PreEscaped, html};
use std::collections::HashMap;
use std::fmt::Write;

use super::highlight::{CodeHighlighter, html_escape};

/// HTML tags produced from Markdown nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    A,
    Blockquote,
    Br,
    Code,
    Del,
    Em,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Hr,
    Img,
    Input,
    Li,
    Ol,
    P,
    Pre,
    Strong,
    Sup,
    Table,
    Tbody,
    Td,
    Th,
    Thead,
    Tr,
    Ul,
}

impl ElementTag {
    /// Heading tags in level order.
    pub const HEADINGS: [ElementTag; 6] = [
        ElementTag::H1,
        ElementTag::H2,
        ElementTag::H3,
        ElementTag::H4,
        ElementTag::H5,
        ElementTag::H6,
    ];

    /// Returns heading tag for level 1 through 6.
    pub fn heading(level: u8) -> Option<Self> {
        let index = usize::from(level).checked_sub(1)?;
        Self::HEADINGS.get(index).copied()
    }

    /// HTML tag name.
    pub fn name(&self) -> &'static str {
        match self {
            ElementTag::A => "a",
            ElementTag::Blockquote => "blockquote",
            ElementTag::Br => "br",
            ElementTag::Code => "code",
            ElementTag::Del => "del",
            ElementTag::Em => "em",
            ElementTag::H1 => "h1",
            ElementTag::H2 => "h2",
            ElementTag::H3 => "h3",
            ElementTag::H4 => "h4",
            ElementTag::H5 => "h5",
            ElementTag::H6 => "h6",
            ElementTag::Hr => "hr",
            ElementTag::Img => "img",
            ElementTag::Input => "input",
            ElementTag::Li => "li",
            ElementTag::Ol => "ol",
            ElementTag::P => "p",
            ElementTag::Pre => "pre",
            ElementTag::Strong => "strong",
            ElementTag::Sup => "sup",
            ElementTag::Table => "table",
            ElementTag::Tbody => "tbody",
            ElementTag::Td => "td",
            ElementTag::Th => "th",
            ElementTag::Thead => "thead",
            ElementTag::Tr => "tr",
            ElementTag::Ul => "ul",
        }
    }

    /// Returns true for elements without content or closing tag.
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            ElementTag::Br | ElementTag::Hr | ElementTag::Img | ElementTag::Input
        )
    }

    /// Returns true for block level elements followed by a newline.
    pub fn is_block(&self) -> bool {
        !matches!(
            self,
            ElementTag::A
                | ElementTag::Br
                | ElementTag::Code
                | ElementTag::Del
                | ElementTag::Em
                | ElementTag::Img
                | ElementTag::Input
                | ElementTag::Strong
                | ElementTag::Sup
        )
    }
}

/// Content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'e> {
    /// Already rendered child markup.
    Html(String),
    /// Unescaped source code, with fence language for code blocks.
    Code {
        literal: &'e str,
        language: Option<&'e str>,
    },
    /// No content (void elements).
    Empty,
}

/// Element ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'e> {
    tag: ElementTag,
    attributes: Vec<(&'static str, String)>,
    content: Content<'e>,
}

impl<'e> Element<'e> {
    /// Creates element with rendered children.
    pub fn new(tag: ElementTag, children: impl Into<String>) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            content: Content::Html(children.into()),
        }
    }

    /// Creates void element.
    pub fn void(tag: ElementTag) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            content: Content::Empty,
        }
    }

    /// Creates code element holding unescaped source.
    pub fn code(literal: &'e str, language: Option<&'e str>) -> Self {
        Self {
            tag: ElementTag::Code,
            attributes: Vec::new(),
            content: Content::Code { literal, language },
        }
    }

    /// Adds attribute (value is escaped on render).
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Element tag.
    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    /// Returns attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Element content.
    pub fn content(&self) -> &Content<'e> {
        &self.content
    }
}

/// Renders one kind of element to HTML.
pub trait ElementRenderer {
    /// Renders element including its opening and closing tags.
    fn render(&self, element: &Element<'_>) -> String;
}

/// Renders element as plain HTML with its own attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl ElementRenderer for PlainRenderer {
    fn render(&self, element: &Element<'_>) -> String {
        write_element(element, None)
    }
}

/// Renders element with an added CSS class.
#[derive(Debug, Clone, Copy)]
pub struct StyledRenderer {
    class: &'static str,
}

impl StyledRenderer {
    /// Creates renderer adding `class` to every element.
    pub const fn new(class: &'static str) -> Self {
        Self { class }
    }
}

impl ElementRenderer for StyledRenderer {
    fn render(&self, element: &Element<'_>) -> String {
        write_element(element, Some(self.class))
    }
}

/// Renders headings with level specific classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingRenderer;

impl ElementRenderer for HeadingRenderer {
    fn render(&self, element: &Element<'_>) -> String {
        let class = match element.tag() {
            ElementTag::H1 => "md-heading md-h1",
            ElementTag::H2 => "md-heading md-h2",
            ElementTag::H3 => "md-heading md-h3",
            ElementTag::H4 => "md-heading md-h4",
            ElementTag::H5 => "md-heading md-h5",
            ElementTag::H6 => "md-heading md-h6",
            _ => "md-heading",
        };
        write_element(element, Some(class))
    }
}

/// Renders horizontal rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleRenderer;

impl ElementRenderer for RuleRenderer {
    fn render(&self, _element: &Element<'_>) -> String {
        html! { hr class="md-hr"; }.into_string() + "\n"
    }
}

/// Renders preformatted blocks wrapping code.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreRenderer;

impl ElementRenderer for PreRenderer {
    fn render(&self, element: &Element<'_>) -> String {
        let children = match element.content() {
            Content::Html(children) => children.as_str(),
            _ => "",
        };
        html! { pre class="md-pre" { (PreEscaped(children)) } }.into_string() + "\n"
    }
}

/// Renders inline code and highlighted code block contents.
pub struct CodeRenderer {
    highlighter: CodeHighlighter,
}

impl CodeRenderer {
    /// Creates code renderer with its own highlighter.
    pub fn new() -> Self {
        Self {
            highlighter: CodeHighlighter::new(),
        }
    }
}

impl Default for CodeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRenderer for CodeRenderer {
    fn render(&self, element: &Element<'_>) -> String {
        let (literal, language) = match element.content() {
            Content::Code { literal, language } => (*literal, *language),
            Content::Html(_) => return write_element(element, Some("md-code")),
            Content::Empty => ("", None),
        };

        match language {
            Some(language) => {
                let class = match element.attribute("class") {
                    Some(own) => format!("md-code-block {}", own),
                    None => "md-code-block".to_string(),
                };
                let highlighted = self
                    .highlighter
                    .highlight(literal, language)
                    .unwrap_or_else(|e| {
                        log::warn!("Highlighting {} code block failed: {:#}", language, e);
                        html_escape(literal)
                    });
                html! { code class=(class) { (PreEscaped(highlighted)) } }.into_string()
            }
            None => html! { code class="md-code" { (literal) } }.into_string(),
        }
    }
}

/// Mapping from element tag to renderer.
pub struct RendererTable {
    renderers: HashMap<ElementTag, Box<dyn ElementRenderer>>,
    fallback: PlainRenderer,
}

impl RendererTable {
    /// Creates table without entries; every element renders plain.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: PlainRenderer,
        }
    }

    /// Creates table with the default styled renderers.
    ///
    /// Covers links, blockquotes, code, emphasis, headings, rules, lists,
    /// paragraphs, preformatted blocks and superscripts.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.insert(ElementTag::A, StyledRenderer::new("md-link"));
        table.insert(ElementTag::Blockquote, StyledRenderer::new("md-blockquote"));
        table.insert(ElementTag::Code, CodeRenderer::new());
        table.insert(ElementTag::Em, StyledRenderer::new("md-em"));
        for tag in ElementTag::HEADINGS {
            table.insert(tag, HeadingRenderer);
        }
        table.insert(ElementTag::Hr, RuleRenderer);
        table.insert(ElementTag::Li, StyledRenderer::new("md-li"));
        table.insert(ElementTag::Ol, StyledRenderer::new("md-ol"));
        table.insert(ElementTag::P, StyledRenderer::new("md-p"));
        table.insert(ElementTag::Pre, PreRenderer);
        table.insert(ElementTag::Sup, StyledRenderer::new("md-sup"));
        table.insert(ElementTag::Ul, StyledRenderer::new("md-ul"));
        table
    }

    /// Sets renderer for tag, returning the one it replaces.
    pub fn insert(
        &mut self,
        tag: ElementTag,
        renderer: impl ElementRenderer + 'static,
    ) -> Option<Box<dyn ElementRenderer>> {
        self.renderers.insert(tag, Box::new(renderer))
    }

    /// Returns true if tag has a dedicated renderer.
    #[cfg(test)]
    fn contains(&self, tag: ElementTag) -> bool {
        self.renderers.contains_key(&tag)
    }

    /// Returns renderer for tag, or the plain renderer.
    pub fn get(&self, tag: ElementTag) -> &dyn ElementRenderer {
        match self.renderers.get(&tag) {
            Some(renderer) => renderer.as_ref(),
            None => &self.fallback,
        }
    }

    /// Renders element with the renderer registered for its tag.
    pub fn render(&self, element: &Element<'_>) -> String {
        self.get(element.tag()).render(element)
    }
}

impl Default for RendererTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes element as HTML, prepending `class` to any class attribute.
fn write_element(element: &Element<'_>, class: Option<&str>) -> String {
    let tag = element.tag();
    let mut out = String::new();

    out.push('<');
    out.push_str(tag.name());

    let own_class = element.attribute("class");
    let merged_class = match (class, own_class) {
        (Some(extra), Some(own)) => Some(format!("{} {}", extra, own)),
        (Some(extra), None) => Some(extra.to_string()),
        (None, own) => own.map(String::from),
    };
    if let Some(merged) = merged_class {
        let _ = write!(out, " class=\"{}\"", html_escape(&merged));
    }

    for (name, value) in element.attributes() {
        if *name == "class" {
            continue;
        }
        let _ = write!(out, " {}=\"{}\"", name, html_escape(value));
    }
    out.push('>');

    if !tag.is_void() {
        match element.content() {
            Content::Html(children) => out.push_str(children),
            Content::Code { literal, .. } => out.push_str(&html_escape(literal)),
            Content::Empty => {}
        }
        let _ = write!(out, "</{}>", tag.name());
    }

    if tag.is_block() {
        out.push('\n');
    }

    out
}
