//! Node Graph Module
//!
//! Compiler output built from three substrate primitives:
//! - Constant leaves (one value on one channel)
//! - Clamped 1D interpolation between two children
//! - Weighted mixes, raw or normalized
//!
//! Subtrees are shared through `Rc`, so a constant leaf reused by several
//! operations within a pass is one node.

mod leaf_cache;
mod node;

pub use leaf_cache::LeafCache;
pub use node::{MixChild, Node};
