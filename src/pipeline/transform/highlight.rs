use crate::config::HighlightConfig;
use crate::pipeline::Pass;
use crate::tree::{visit_nodes_mut, Element, Node};
use crate::{debug, log};
use anyhow::Result;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const FALLBACK_THEME: &str = "base16-ocean.dark";

// =============================================================================
// Highlighter
// =============================================================================

/// Syntax highlighter over the bundled grammar and theme sets.
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl CodeHighlighter {
    pub fn new(config: &HighlightConfig) -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = match themes.themes.remove(&config.theme) {
            Some(theme) => theme,
            None => {
                log!("warn"; "unknown highlight theme '{}', using {FALLBACK_THEME}", config.theme);
                themes.themes.remove(FALLBACK_THEME).unwrap_or_default()
            }
        };
        Self { syntaxes, theme }
    }

    /// Render `source` as styled HTML. Unknown languages fall back to plain
    /// text rather than failing the block.
    pub fn highlight(&self, source: &str, lang: Option<&str>) -> Result<String> {
        let syntax = lang
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let html = highlighted_html_for_string(source, &self.syntaxes, syntax, &self.theme)?;
        Ok(html)
    }
}

// =============================================================================
// Pass
// =============================================================================

/// Replaces `pre > code` blocks with highlighted markup.
///
/// The highlighter emits a styled `pre` which gets wrapped in a container
/// `div`; [`super::UnwrapPreDivs`] collapses that wrapper afterwards. The
/// emitted `pre` holds spans rather than a `code` child, so a re-run leaves
/// already-highlighted blocks alone.
pub struct HighlightCode<'a> {
    highlighter: &'a CodeHighlighter,
}

impl<'a> HighlightCode<'a> {
    pub fn new(highlighter: &'a CodeHighlighter) -> Self {
        Self { highlighter }
    }
}

impl Pass for HighlightCode<'_> {
    fn name(&self) -> &'static str {
        "highlight-code"
    }

    fn apply(&self, root: &mut Element) {
        visit_nodes_mut(root, &mut |node| {
            let Some((source, lang)) = code_block_source(node) else {
                return;
            };
            match self.highlighter.highlight(&source, lang.as_deref()) {
                Ok(html) => {
                    if let Some(block) = into_block(html, lang.as_deref()) {
                        *node = Node::Element(block);
                    }
                }
                Err(err) => {
                    log!("warn"; "highlighting failed, leaving block as-is: {err}");
                }
            }
        });
    }
}

/// Extract source text and language token from a `pre > code` node.
fn code_block_source(node: &Node) -> Option<(String, Option<String>)> {
    let pre = node.as_element()?;
    if !pre.is_tag("pre") {
        return None;
    }
    let code = pre.sole_element_child()?;
    if !code.is_tag("code") {
        return None;
    }
    let lang = code
        .get_attr("class")
        .and_then(|class| class.split_whitespace().find_map(|c| c.strip_prefix("language-")))
        .map(str::to_string);
    Some((code.text_content(), lang))
}

/// Wrap the highlighter's `pre` output in a container div.
///
/// The inner span markup is carried as a raw node rather than re-parsed, so
/// whitespace inside the block survives exactly as the highlighter emitted
/// it.
fn into_block(html: String, lang: Option<&str>) -> Option<Element> {
    let open_end = html.find('>')?;
    let close = html.rfind("</pre>")?;
    if !html.starts_with("<pre") || close < open_end {
        return None;
    }

    let mut pre = Element::new("pre");
    if let Some(style) = extract_attr(&html[..open_end], "style") {
        pre.set_attr("style", style);
    }
    if let Some(lang) = lang {
        pre.set_attr("data-language", lang);
    } else {
        debug!("compile"; "code block without language token");
    }
    let inner = html[open_end + 1..close].trim_start_matches('\n');
    pre.children.push(Node::Raw(inner.to_string()));

    let mut div = Element::with_attrs("div", [("class", "code-block")]);
    div.children.push(Node::Element(pre));
    Some(div)
}

fn extract_attr<'a>(opening: &'a str, name: &str) -> Option<&'a str> {
    let idx = opening.find(&format!("{name}=\""))?;
    let rest = &opening[idx + name.len() + 2..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::render;

    fn highlighter() -> CodeHighlighter {
        CodeHighlighter::new(&HighlightConfig::default())
    }

    fn block(lang: Option<&str>, source: &str) -> Element {
        let mut code = Element::new("code");
        if let Some(lang) = lang {
            code.set_attr("class", format!("language-{lang}"));
        }
        code.children.push(Node::text(source));
        let mut pre = Element::new("pre");
        pre.children.push(Node::Element(code));
        pre
    }

    #[test]
    fn test_known_language_highlighted() {
        let hl = highlighter();
        let mut root = Element::new("article");
        root.children.push(Node::Element(block(Some("rs"), "let x = 1;")));

        HighlightCode::new(&hl).apply(&mut root);

        let out = render(&root);
        assert!(out.contains("class=\"code-block\""));
        assert!(out.contains("data-language=\"rs\""));
        assert!(out.contains("<span"));
        assert!(!out.contains("<code"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let hl = highlighter();
        let mut root = Element::new("article");
        root.children.push(Node::Element(block(Some("klingon"), "nuqneH")));

        HighlightCode::new(&hl).apply(&mut root);

        let out = render(&root);
        assert!(out.contains("class=\"code-block\""));
        assert!(out.contains("nuqneH"));
    }

    #[test]
    fn test_highlighted_output_not_rehighlighted() {
        let hl = highlighter();
        let mut root = Element::new("article");
        root.children.push(Node::Element(block(Some("rs"), "let x = 1;")));

        let pass = HighlightCode::new(&hl);
        pass.apply(&mut root);
        let once = render(&root);
        pass.apply(&mut root);
        assert_eq!(render(&root), once);
    }

    #[test]
    fn test_inline_code_untouched() {
        let hl = highlighter();
        let mut p = Element::new("p");
        let mut code = Element::new("code");
        code.children.push(Node::text("x"));
        p.children.push(Node::Element(code));
        let mut root = Element::new("article");
        root.children.push(Node::Element(p));

        HighlightCode::new(&hl).apply(&mut root);

        assert!(render(&root).contains("<p><code>x</code></p>"));
    }
}
