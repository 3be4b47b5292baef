use crate::embed::{resolve_embed, EmbedTransformer};
use crate::pipeline::Pass;
use crate::tree::{visit_nodes_mut, Element, Node};
use url::Url;

/// Replaces paragraphs that consist of a single bare link with provider
/// embed markup.
///
/// A paragraph qualifies when its only content is an anchor whose text
/// equals its href, or a lone text node that parses as an absolute http(s)
/// URL. Qualifying paragraphs are swapped wholesale for the raw fragment
/// returned by the first matching transformer; paragraphs with surrounding
/// prose are left alone.
pub struct EmbedLinks<'a> {
    embedders: &'a [Box<dyn EmbedTransformer>],
}

impl<'a> EmbedLinks<'a> {
    pub fn new(embedders: &'a [Box<dyn EmbedTransformer>]) -> Self {
        Self { embedders }
    }
}

impl Pass for EmbedLinks<'_> {
    fn name(&self) -> &'static str {
        "embed-links"
    }

    fn apply(&self, root: &mut Element) {
        visit_nodes_mut(root, &mut |node| {
            let Some(url) = bare_link_url(node) else {
                return;
            };
            if let Some(html) = resolve_embed(&url, self.embedders) {
                *node = Node::Raw(html);
            }
        });
    }
}

/// Extract the URL of a paragraph that is nothing but one link.
fn bare_link_url(node: &Node) -> Option<Url> {
    let elem = node.as_element()?;
    if !elem.is_tag("p") || elem.children.len() != 1 {
        return None;
    }
    let candidate = match &elem.children[0] {
        Node::Element(a) if a.is_tag("a") => {
            let href = a.get_attr("href")?;
            if a.text_content().trim() != href {
                return None;
            }
            href.to_string()
        }
        Node::Text(text) => text.trim().to_string(),
        _ => return None,
    };
    let url = Url::parse(&candidate).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
