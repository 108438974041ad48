//! Crate-wide error type.
//!
//! Every fallible operation returns [Result], whose error [Phylo2VecError]
//! tells invalid vectors and matrices, Newick parsing problems (wrapping a
//! [ParsingError] with position and context), out-of-range indices and
//! invalid arguments apart.

use crate::parser::ParsingError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Phylo2VecError>;

// =#========================================================================#=
// PHYLO2VEC ERROR
// =#========================================================================#=
/// Errors returned by the vector, matrix and Newick operations of this crate.
#[derive(Debug, Error)]
pub enum Phylo2VecError {
    /// Sequence is not a well-formed Phylo2Vec vector.
    #[error("Invalid Phylo2Vec vector: {0}")]
    InvalidVector(String),

    /// Matrix has an invalid vector column or non-positive branch lengths.
    #[error("Invalid Phylo2Vec matrix: {0}")]
    InvalidMatrix(String),

    /// Newick string could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParsingError),

    /// Leaf or node index outside of the tree.
    #[error("Index {index} out of bounds (must be less than {bound})")]
    IndexOutOfBounds { index: usize, bound: usize },

    /// Argument has an invalid value, e.g. a permutation that is no bijection.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A leaf label has no entry in the label mapping.
    #[error("Label '{0}' not found in label mapping")]
    MissingLabel(String),
}
