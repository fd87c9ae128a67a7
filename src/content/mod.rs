//! The content tree: node model, arena, tree operations and traversal.
//!
//! | Module | Role |
//! |--------|------|
//! | [`value`] | [`Value`]/[`Data`], the dynamically-typed metadata every node carries |
//! | [`node`] | [`Node`] and its closed variant set: directory, text file, binary file |
//! | [`tree`] | [`ContentTree`] arena, attach/detach/merge, path lookup, relative paths |
//! | [`visit`] | [`Visitor`] protocol and the [`Cursor`] handed to every callback |

pub mod node;
pub mod tree;
pub mod value;
pub mod visit;

pub use node::{BinaryFile, BinarySource, Directory, FileName, Node, NodeId, NodeKind, TextFile};
pub use tree::{ContentTree, TreeError};
pub use value::{Data, Value};
pub use visit::{Cursor, Visitor};
