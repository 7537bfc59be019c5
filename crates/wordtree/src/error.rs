//! Outcomes of tree operations that did not change the tree

use thiserror::Error;

/// Result type alias using [TreeError]
pub type Result<T> = std::result::Result<T, TreeError>;

/// Why an operation left the tree untouched
///
/// Both variants are ordinary outcomes rather than faults: callers usually
/// report them to the user and carry on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// An equal key (under the tree's comparator) is already stored
    #[error("key already exists")]
    AlreadyExists,

    /// No stored key compares equal to the query
    #[error("key not found")]
    NotFound,
}
