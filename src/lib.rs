//! Phylo2Vec is a library to encode rooted binary phylogenetic trees as
//! integer vectors and back.
//!
//! A tree on `n` leaves labelled `0..n-1` corresponds to exactly one vector
//! `v` of length `n-1` with `v[k] ∈ [0, 2k]`: leaf `k+1` is attached next to
//! a leaf or next to an internal vertex created earlier, depending on `v[k]`.
//! The encoding is a bijection, so vectors can be sampled, stored and
//! compared instead of trees.
//!
//! Core functionality provided:
//! - Vector: validation, encoding to and decoding from Newick strings,
//!   uniform sampling and edits (adding, removing and relabelling leaves,
//!   common ancestors, rerooting). See [crate::vector].
//! - Matrix: vectors extended by two branch lengths per internal vertex.
//!   See [crate::matrix].
//! - Newick: an iterative parser for binary trees, lenient string scans
//!   (leaf count, annotation and label removal) and the conversion between
//!   string and integer leaf labels. See [crate::newick].
//! - Tree models: both [Tree] (parsed, labelled) and [Topology]
//!   (leaf `i` at index `i`) use the arena pattern, so no direct vertex
//!   references are stored, only vertex indices. See [crate::model].
//!
//! Limitations:
//! - Only binary trees
//! - Only leaf labels considered; internal labels are dropped when parsing
//! - Single Newick strings, no file I/O
//!
//! # Usage patterns
//! The most common operations are re-exported at the crate root.
//!
//! ## Example Encoding and Decoding
//! ```
//! use phylo2vec::{sample_vector, seed_everything, to_newick, to_vector};
//!
//! let mut rng = seed_everything(42);
//! let v = sample_vector(10, &mut rng).unwrap();
//! let newick = to_newick(&v);
//! assert_eq!(to_vector(&newick).unwrap(), v);
//! ```
//!
//! ## Example String Labels
//! ```
//! use phylo2vec::{apply_label_mapping, create_label_mapping, to_newick, to_vector};
//!
//! let (newick_int, mapping) = create_label_mapping("((A,B),(D,E));")?;
//! let v = to_vector(&newick_int)?;
//! assert_eq!(v, vec![0, 2, 2]);
//!
//! let relabelled = apply_label_mapping(&to_newick(&v), &mapping)?;
//! assert_eq!(relabelled, "((A,B)5,(D,E)4)6;");
//! # Ok::<(), phylo2vec::Phylo2VecError>(())
//! ```

pub mod error;
pub mod matrix;
pub mod model;
pub mod newick;
pub mod parser;
pub mod vector;

pub use crate::error::{Phylo2VecError, Result};
pub use crate::model::{LabelMapping, Topology, Tree};

// ============================================================================
// Quick Vector API
// ============================================================================
pub use crate::vector::{
    add_leaf, check_v, get_common_ancestor, remove_leaf, reorder_v, reroot_at_random,
    sample_vector, seed_everything, to_newick, to_vector,
};

// ============================================================================
// Quick Matrix API
// ============================================================================
pub use crate::matrix::{sample_matrix, to_matrix, to_newick_from_matrix};
pub use crate::vector::check_m;

// ============================================================================
// Quick Newick API
// ============================================================================
pub use crate::newick::{
    apply_label_mapping, create_label_mapping, find_num_leaves, has_parents, remove_annotations,
    remove_parent_labels,
};
