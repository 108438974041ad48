//! Phylo2Vec vectors: validation, encoding to and decoding from Newick
//! strings, random sampling and tree edits.
//!
//! A vector `v` of length `n-1` describes a rooted binary tree on the leaves
//! `0..n-1`. Starting from the cherry `(0,1)`, leaf `k+1` is attached
//! according to `v[k] ∈ [0, 2k]`:
//! * `v[k] ≤ k` - as sibling of leaf `v[k]`
//! * `v[k] > k` - as sibling of an internal vertex, namely the one at position
//!   `v[k] - k - 1` in the current merge order (see [`get_pairs`])
//!
//! # Quick API
//! * [`check_v`], [`check_m`] - validation
//! * [`to_newick`], [`to_vector`] - encoding and decoding
//! * [`get_pairs`], [`get_ancestry`], [`build_newick`] - intermediate forms
//! * [`sample_vector`], [`sample_vector_with`], [`seed_everything`] - sampling
//! * [`add_leaf`], [`remove_leaf`], [`get_common_ancestor`], [`reorder_v`],
//!   [`reroot`], [`reroot_at_random`] - edits and queries
//!
//! # Example
//! ```
//! use phylo2vec::vector::{to_newick, to_vector};
//!
//! let newick = to_newick(&[0, 1, 2, 3, 4]);
//! assert_eq!(newick, "(0,(1,(2,(3,(4,5)6)7)8)9)10;");
//! assert_eq!(to_vector(&newick).unwrap(), vec![0, 1, 2, 3, 4]);
//! ```

pub(crate) mod codec;
mod editing;
mod sampling;
mod validation;

pub use self::codec::{build_newick, get_ancestry, get_pairs, to_newick, to_vector};
pub use self::editing::{
    add_leaf, get_common_ancestor, remove_leaf, reorder_v, reroot, reroot_at_random,
};
pub use self::sampling::{SampleOrdering, sample_vector, sample_vector_with, seed_everything};
pub use self::validation::{check_m, check_v};
pub(crate) use self::validation::vector_column;
