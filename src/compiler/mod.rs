//! Compilation orchestrator.
//!
//! `compile` takes a slug and the content item's file set, locates the entry
//! document, and turns its Markdown/MDX source into a compiled artifact:
//! rendered code, frontmatter mapping, and a reading-time estimate. A slug
//! with no entry document is a designed "not found" outcome, not an error;
//! everything else that goes wrong is logged with slug context and
//! propagated.

use std::sync::Arc;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::ForgeConfig;
use crate::content::{find_entry, relative_files, ContentFile};
use crate::embed::fetch::{HttpClient, HttpFetch};
use crate::embed::{EggheadTransformer, EmbedTransformer, OembedTransformer, TwitterTransformer};
use crate::log;
use crate::markdown::convert::{from_markdown, MarkdownOptions};
use crate::markdown::frontmatter::{extract_frontmatter, Frontmatter};
use crate::pipeline::{content_pipeline, CodeHighlighter};
use crate::tree::{render, visit_elements_mut, Element};
use crate::utils::readtime::{self, ReadTime};

// =============================================================================
// Context + artifact
// =============================================================================

/// Everything a compilation needs beyond its input files. Built once and
/// shared across invocations; the collaborators are injectable for tests.
pub struct CompileContext {
    pub config: ForgeConfig,
    pub embedders: Vec<Box<dyn EmbedTransformer>>,
    pub highlighter: CodeHighlighter,
}

impl CompileContext {
    /// Context with the default embed resolvers, in their fixed resolution
    /// order: social post, video lesson, generic oEmbed.
    pub fn new(config: ForgeConfig) -> Result<Self> {
        let fetch: Arc<dyn HttpFetch> = Arc::new(HttpClient::new()?);
        let embedders: Vec<Box<dyn EmbedTransformer>> = vec![
            Box::new(TwitterTransformer::new(Arc::clone(&fetch))),
            Box::new(EggheadTransformer::new(config.affiliate.egghead_code.clone())),
            Box::new(OembedTransformer::new(fetch)),
        ];
        let highlighter = CodeHighlighter::new(&config.highlight);
        Ok(Self {
            config,
            embedders,
            highlighter,
        })
    }

    /// Replace the resolver list, keeping its ordering significant.
    pub fn with_embedders(mut self, embedders: Vec<Box<dyn EmbedTransformer>>) -> Self {
        self.embedders = embedders;
        self
    }
}

/// The output of one successful compilation. Owned by the caller;
/// serializable so the CLI can emit it as JSON.
#[derive(Debug, Serialize)]
pub struct CompiledArtifact {
    pub code: String,
    pub frontmatter: Frontmatter,
    pub read_time: ReadTime,
}

// =============================================================================
// compile
// =============================================================================

/// Compile the content item `slug` out of `files`.
///
/// Returns `Ok(None)` when no file matches `<slug>/index.md(x)`. Compilation
/// failures are logged with the slug and returned as errors, never
/// swallowed.
pub fn compile(
    slug: &str,
    files: &[ContentFile],
    ctx: &CompileContext,
) -> Result<Option<CompiledArtifact>> {
    let Some(entry) = find_entry(slug, files)? else {
        return Ok(None);
    };
    let file_map = relative_files(&entry.path, files)?;

    let compiled = (|| -> Result<CompiledArtifact> {
        let (frontmatter, body) = extract_frontmatter(&entry.content)?;
        let code = bundle(body, &file_map, ctx)?;
        let read_time = readtime::estimate(body, ctx.config.read_time.words_per_minute);
        Ok(CompiledArtifact {
            code,
            frontmatter,
            read_time,
        })
    })();

    match compiled {
        Ok(artifact) => Ok(Some(artifact)),
        Err(err) => {
            log!("error"; "failed to compile '{slug}'");
            Err(err).with_context(|| format!("compiling '{slug}'"))
        }
    }
}

/// Markdown body -> tree -> full pass pipeline -> rendered code.
fn bundle(body: &str, file_map: &FxHashMap<String, String>, ctx: &CompileContext) -> Result<String> {
    let mut root = from_markdown(body, &MarkdownOptions::gfm());
    warn_unresolved_refs(&mut root, file_map);
    content_pipeline(ctx).run(&mut root);
    Ok(render(&root))
}

/// Relative references must resolve inside the content item's own file set.
/// Unresolved ones are either typos or assets missing from the fetch, so
/// they are worth a warning, but never fatal.
fn warn_unresolved_refs(root: &mut Element, file_map: &FxHashMap<String, String>) {
    visit_elements_mut(root, &mut |elem| {
        let reference = match elem.tag.as_str() {
            "img" => elem.get_attr("src"),
            "a" => elem.get_attr("href"),
            _ => None,
        };
        let Some(reference) = reference else { return };
        if reference.starts_with("./") && !file_map.contains_key(reference) {
            log!("warn"; "unresolved relative reference: {reference}");
        }
    });
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CompileContext {
        CompileContext::new(ForgeConfig::default()).expect("context")
    }

    fn post(body: &str) -> Vec<ContentFile> {
        vec![ContentFile::new(
            "blog/my-post/index.mdx",
            format!("---\ntitle: My Post\ndraft: false\n---\n\n{body}"),
        )]
    }

    #[test]
    fn test_unknown_slug_compiles_to_none() {
        let files = post("hello");
        assert!(compile("other", &files, &ctx()).unwrap().is_none());
    }

    #[test]
    fn test_artifact_carries_frontmatter_and_read_time() {
        let files = post("one two three four five six seven eight");
        let artifact = compile("my-post", &files, &ctx()).unwrap().unwrap();

        assert_eq!(
            artifact.frontmatter.get("title").and_then(|v| v.as_str()),
            Some("My Post")
        );
        assert_eq!(
            artifact.frontmatter.get("draft").and_then(|v| v.as_bool()),
            Some(false)
        );
        assert_eq!(artifact.read_time.words, 8);
        assert!(artifact.code.starts_with("<article>"));
    }

    #[test]
    fn test_full_pipeline_applies_in_order() {
        let files = post(concat!(
            "## Getting Started\n",
            "\n",
            "Buy [the book](https://amazon.com/dp/B01).\n",
            "\n",
            "```rs\n",
            "let x = 1;\n",
            "```\n",
        ));
        let artifact = compile("my-post", &files, &ctx()).unwrap().unwrap();
        let code = &artifact.code;

        assert!(code.contains("<h2 id=\"getting-started\"><a href=\"#getting-started\">"));
        assert!(code.contains("https://amazon.com/dp/B01?tag=kentcdodds-20"));
        assert!(code.contains("data-language=\"rs\""));
        assert!(!code.contains("class=\"code-block\""), "wrapper div must collapse");
    }

    #[test]
    fn test_cdn_image_rewritten_through_pipeline() {
        let files = post(
            "![pic](https://res.cloudinary.com/kentcdodds-com/image/upload/v1/blog/pic.png)",
        );
        let artifact = compile("my-post", &files, &ctx()).unwrap().unwrap();
        assert!(artifact
            .code
            .contains("/image/upload/f_auto,q_auto,dpr_2.0,w_1600/v1/blog/pic.png"));
    }

    #[test]
    fn test_bare_video_link_becomes_embed() {
        struct Canned;
        impl EmbedTransformer for Canned {
            fn name(&self) -> &'static str {
                "canned"
            }
            fn matches(&self, url: &url::Url) -> bool {
                url.host_str() == Some("video.test")
            }
            fn resolve(&self, _url: &url::Url) -> Result<String> {
                Ok("<iframe src=\"https://video.test/embed/1\"></iframe>".to_string())
            }
        }

        let ctx = ctx().with_embedders(vec![Box::new(Canned)]);
        let files = post("intro text\n\nhttps://video.test/v/1\n\noutro");
        let artifact = compile("my-post", &files, &ctx).unwrap().unwrap();

        assert!(artifact.code.contains("<iframe src=\"https://video.test/embed/1\">"));
        assert!(!artifact.code.contains("<p>https://video.test/v/1</p>"));
    }

    #[test]
    fn test_duplicate_sibling_paths_are_an_error() {
        let mut files = post("hello");
        files.push(ContentFile::new("blog/my-post/extra.mdx", "a"));
        files.push(ContentFile::new("blog/my-post/extra.mdx", "b"));
        assert!(compile("my-post", &files, &ctx()).is_err());
    }
}
