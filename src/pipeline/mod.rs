//! Document tree processing pipeline.
//!
//! A pass is a single tree-visiting transform; the pipeline is nothing more
//! than sequential application of an explicit ordered pass list. Stage
//! ordering carries the semantics: the link-level passes (heading slugs,
//! autolinks, embeds, affiliates) run before the element-level passes
//! (images, code trimming, highlighting, wrapper collapse), mirroring the
//! Markdown-AST stage / HTML-tree stage split of the source format.

pub mod transform;

use crate::compiler::CompileContext;
use crate::tree::Element;

pub use transform::{
    AutoAffiliates, AutolinkHeadings, CdnImages, CodeHighlighter, EmbedLinks, HeadingSlugs,
    HighlightCode, TrimCodeBlocks, UnwrapPreDivs,
};

// =============================================================================
// Pass + Pipeline
// =============================================================================

/// One tree transform applied in place.
pub trait Pass {
    /// Pass name for logs and order assertions.
    fn name(&self) -> &'static str;

    /// Apply the transform to the tree rooted at `root`.
    fn apply(&self, root: &mut Element);
}

/// An ordered list of passes.
pub struct Pipeline<'a> {
    passes: Vec<Box<dyn Pass + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn pipe(mut self, pass: impl Pass + 'a) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run every pass, in order, over the tree.
    pub fn run(&self, root: &mut Element) {
        for pass in &self.passes {
            crate::debug!("compile"; "pass {}", pass.name());
            pass.apply(root);
        }
    }

    /// Pass names in execution order.
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Build the full content pipeline in its fixed order.
pub fn content_pipeline<'a>(ctx: &'a CompileContext) -> Pipeline<'a> {
    Pipeline::new()
        .pipe(HeadingSlugs)
        .pipe(AutolinkHeadings)
        .pipe(EmbedLinks::new(&ctx.embedders))
        .pipe(AutoAffiliates::new(&ctx.config.affiliate))
        .pipe(CdnImages::new(&ctx.config.cdn))
        .pipe(TrimCodeBlocks)
        .pipe(HighlightCode::new(&ctx.highlighter))
        .pipe(UnwrapPreDivs)
}

// =============================================================================
// Tests
// =============================================================================
