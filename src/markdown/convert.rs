//! Markdown to document tree conversion using pulldown-cmark.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::tree::{Attrs, Element, Node, parse_fragment};

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
}

impl MarkdownOptions {
    /// GitHub-flavored-Markdown extension set.
    pub fn gfm() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        opts
    }
}

/// Markdown to tree converter
struct MarkdownConverter {
    /// Stack of open elements (for nested structures)
    stack: Vec<Element>,
    /// Root children (collected when stack is empty)
    root_children: Vec<Node>,
    /// Buffered raw lines of a block-level HTML island
    html_block: Option<String>,
}

impl MarkdownConverter {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root_children: Vec::new(),
            html_block: None,
        }
    }

    /// Convert markdown source to a document tree rooted at `<article>`
    fn convert(mut self, markdown: &str, options: &MarkdownOptions) -> Element {
        let parser = Parser::new_ext(markdown, options.to_pulldown_options());

        for event in parser {
            self.handle_event(event);
        }

        let mut root = Element::new("article");
        root.children = self.root_children;
        root
    }

    /// Handle a single pulldown-cmark event
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(text.as_ref()),
            Event::Code(code) => self.add_inline_code(code.as_ref()),
            Event::Html(html) => self.add_block_html(html.as_ref()),
            Event::InlineHtml(html) => self.add_node(Node::Raw(html.to_string())),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_node(Node::element("br")),
            Event::Rule => self.add_node(Node::element("hr")),
            Event::FootnoteReference(name) => self.add_footnote_ref(name.as_ref()),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.add_text(math.as_ref()),
        }
    }

    /// Start a new tag (push onto stack)
    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::HtmlBlock => {
                self.html_block = Some(String::new());
            }
            Tag::CodeBlock(kind) => {
                // Fenced blocks open both the pre and the code frame so the
                // language class lands on the code element
                self.stack.push(Element::new("pre"));
                let mut code = Element::new("code");
                if let pulldown_cmark::CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    code.set_attr("class", format!("language-{lang}"));
                }
                self.stack.push(code);
            }
            other => {
                let (tag_name, attrs) = tag_to_element(&other);
                self.stack.push(Element::with_attrs(&tag_name, attrs));
            }
        }
    }

    /// End a tag (pop from stack)
    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock => {
                if let Some(buffer) = self.html_block.take() {
                    for node in parse_fragment(&buffer) {
                        self.add_node(node);
                    }
                }
            }
            TagEnd::CodeBlock => {
                // Close code, then pre
                self.pop_frame();
                self.pop_frame();
            }
            TagEnd::Image => {
                // Alt text was collected as children; move it into the attr
                if let Some(mut img) = self.stack.pop() {
                    let alt = img.text_content();
                    img.children.clear();
                    img.set_attr("alt", alt);
                    self.add_node(Node::Element(img));
                }
            }
            _ => self.pop_frame(),
        }
    }

    fn pop_frame(&mut self) {
        if let Some(elem) = self.stack.pop() {
            self.add_node(Node::Element(elem));
        }
    }

    /// Add text content
    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(buffer) = self.html_block.as_mut() {
            buffer.push_str(text);
            return;
        }
        self.add_node(Node::text(text));
    }

    /// Add inline code
    fn add_inline_code(&mut self, code: &str) {
        let mut elem = Element::new("code");
        elem.children.push(Node::text(code));
        self.add_node(Node::Element(elem));
    }

    /// Collect block-level raw HTML; the whole island is parsed at block end
    /// so elements inside it (notably JSX-style `<img/>`) stay visible to
    /// the tree passes.
    fn add_block_html(&mut self, html: &str) {
        match self.html_block.as_mut() {
            Some(buffer) => buffer.push_str(html),
            // Html event outside an HtmlBlock: parse in place
            None => {
                for node in parse_fragment(html) {
                    self.add_node(node);
                }
            }
        }
    }

    /// Add footnote reference
    fn add_footnote_ref(&mut self, name: &str) {
        let mut sup = Element::with_attrs("sup", Attrs::from([("class", "footnote-ref")]));
        let href = format!("#fn-{name}");
        let id = format!("fnref-{name}");
        let mut link =
            Element::with_attrs("a", Attrs::from([("href", href.as_str()), ("id", id.as_str())]));
        link.children.push(Node::text(format!("[{name}]")));
        sup.children.push(Node::Element(link));
        self.add_node(Node::Element(sup));
    }

    /// Add task list marker
    fn add_task_marker(&mut self, checked: bool) {
        let mut attrs = Attrs::from([("type", "checkbox"), ("disabled", "")]);
        if checked {
            attrs.set("checked", "");
        }
        self.add_node(Node::Element(Element::with_attrs("input", attrs)));
    }

    /// Add a node to current context (top of stack or root)
    fn add_node(&mut self, node: Node) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(node);
        } else {
            self.root_children.push(node);
        }
    }
}

/// Convert pulldown-cmark Tag to (tag_name, attributes)
fn tag_to_element(tag: &Tag) -> (String, Attrs) {
    match tag {
        // Block elements
        Tag::Paragraph => ("p".to_string(), Attrs::new()),
        Tag::Heading { level, id, .. } => {
            let tag_name = heading_level_to_tag(*level);
            let mut attrs = Attrs::new();
            if let Some(id) = id {
                attrs.set("id", id.to_string());
            }
            (tag_name, attrs)
        }
        Tag::BlockQuote(_) => ("blockquote".to_string(), Attrs::new()),
        Tag::List(start) => {
            if let Some(start_num) = start {
                let mut attrs = Attrs::new();
                if *start_num != 1 {
                    attrs.set("start", start_num.to_string());
                }
                ("ol".to_string(), attrs)
            } else {
                ("ul".to_string(), Attrs::new())
            }
        }
        Tag::Item => ("li".to_string(), Attrs::new()),
        Tag::FootnoteDefinition(name) => {
            let mut attrs = Attrs::from([("class", "footnote")]);
            attrs.set("id", format!("fn-{name}"));
            ("div".to_string(), attrs)
        }

        // Table elements
        Tag::Table(_) => ("table".to_string(), Attrs::new()),
        Tag::TableHead => ("thead".to_string(), Attrs::new()),
        Tag::TableRow => ("tr".to_string(), Attrs::new()),
        Tag::TableCell => ("td".to_string(), Attrs::new()),

        // Inline elements
        Tag::Emphasis => ("em".to_string(), Attrs::new()),
        Tag::Strong => ("strong".to_string(), Attrs::new()),
        Tag::Strikethrough => ("del".to_string(), Attrs::new()),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut attrs = Attrs::new();
            attrs.set("href", dest_url.to_string());
            if !title.is_empty() {
                attrs.set("title", title.to_string());
            }
            ("a".to_string(), attrs)
        }
        Tag::Image {
            dest_url, title, ..
        } => {
            let mut attrs = Attrs::new();
            attrs.set("src", dest_url.to_string());
            if !title.is_empty() {
                attrs.set("title", title.to_string());
            }
            ("img".to_string(), attrs)
        }

        // Extended syntax not part of the GFM option set; inert wrappers
        Tag::DefinitionList => ("dl".to_string(), Attrs::new()),
        Tag::DefinitionListTitle => ("dt".to_string(), Attrs::new()),
        Tag::DefinitionListDefinition => ("dd".to_string(), Attrs::new()),
        Tag::Superscript => ("sup".to_string(), Attrs::new()),
        Tag::Subscript => ("sub".to_string(), Attrs::new()),
        Tag::MetadataBlock(_) => ("__metadata".to_string(), Attrs::new()),

        // Handled in start_tag; unreachable here
        Tag::CodeBlock(_) | Tag::HtmlBlock => unreachable!("handled in start_tag"),
    }
}

/// Convert heading level to tag name
fn heading_level_to_tag(level: HeadingLevel) -> String {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
    .to_string()
}

/// Convert markdown source to a document tree
pub fn from_markdown(markdown: &str, options: &MarkdownOptions) -> Element {
    MarkdownConverter::new().convert(markdown, options)
}

// =============================================================================
// Tests
// =============================================================================
