//! An insert-only AVL tree.
//!
//! Keys are inserted one at a time; after each insert at most one single or double
//! rotation restores the AVL balance. The tree can be walked in order and rendered
//! sideways for inspection. There is no removal or lookup by key.

mod tree;
pub use tree::{balance_factor, height, Iter, Node, Tree};

pub mod driver;
pub mod render;
pub use render::{RenderLine, Rendering};
