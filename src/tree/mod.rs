//! HTML-equivalent document tree.
//!
//! The tree is produced once per compilation from the entry document's
//! Markdown source, mutated in place by each transform pass, rendered to a
//! code string, and discarded. It is never shared across compilations.
//!
//! - [`node`]: node/element/attribute types
//! - [`visit`]: depth-first traversal utilities
//! - [`parse`]: HTML fragment -> nodes (via `tl`)
//! - [`render`]: tree -> HTML string

pub mod node;
pub mod parse;
pub mod render;
pub mod visit;

pub use node::{Attrs, Element, Node};
pub use parse::parse_fragment;
pub use render::render;
pub use visit::{visit_elements_mut, visit_nodes_mut};
