//! This crate contains an ordered word set based on red-black trees.
//!
//! To use it, create a [RbTree] and pick a [Comparator] for its keys.
#![doc = include_str!("../README.md")]

#![warn(missing_docs)]

/// Errors reported by tree operations
pub mod error;
/// Key orderings the tree can be configured with
pub mod order;
/// The red-black tree
pub mod tree;

/// Contains a basic red-black tree implementation based on slab.
mod rb_base;


pub use error::{Result, TreeError};
pub use order::{Comparator, Natural, WordOrder};
pub use tree::{Iter, LevelOrder, RbTree};
