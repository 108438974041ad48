//! Conversion between Phylo2Vec vectors and Newick strings.
//!
//! Encoding builds the cherry list of a vector (the order in which pairs of
//! vertices are merged), turns it into an ancestry table and writes the tree.
//! Decoding parses a Newick string into a [Topology] and derives the vector
//! from it, see [Topology::to_vector].

use crate::error::Result;
use crate::model::fenwick::FenwickTree;
use crate::model::topology::Topology;
use crate::newick::{NewickParser, find_num_leaves};
use crate::parser::byte_parser::ByteParser;
use crate::vector::validation::check_v;
use log::debug;

// =#========================================================================#=
// ENCODING
// =#========================================================================#=
/// Returns the merge pairs of a vector.
///
/// Pair `i` merges the vertices that are represented by the leaves `pair.0`
/// and `pair.1`, with `pair.1` being the leaf that was attached last. The
/// parent created by pair `i` has id `n + i`.
///
/// Runs in `O(n log n)` using a Fenwick tree over the pair slots.
///
/// # Example
/// ```
/// use phylo2vec::vector::get_pairs;
///
/// assert_eq!(get_pairs(&[0, 0, 1]), vec![(1, 3), (0, 2), (0, 1)]);
/// ```
pub fn get_pairs(v: &[usize]) -> Vec<(usize, usize)> {
    let num_pairs = v.len();
    if num_pairs == 0 {
        return Vec::new();
    }

    // Place pairs in reverse: pair k goes to the p-th slot still free
    let mut free_slots = FenwickTree::new_filled(num_pairs);
    let mut slot_of = vec![0; num_pairs];
    for k in (0..num_pairs).rev() {
        let p = if v[k] <= k { 0 } else { v[k] - k };
        let slot = free_slots.find_nth(p);
        slot_of[k] = slot;
        free_slots.decrement(slot);
    }

    let mut pair_at = vec![0; num_pairs];
    for (k, &slot) in slot_of.iter().enumerate() {
        pair_at[slot] = k;
    }

    // A pair attached to an earlier pair shares its first leaf
    let mut pairs = Vec::with_capacity(num_pairs);
    let mut first = 0;
    for &k in &pair_at {
        if v[k] <= k {
            first = v[k];
        }
        pairs.push((first, k + 1));
    }

    pairs
}

/// Returns the ancestry table of a vector.
///
/// Row `i` is `[child1, child2, parent]`, listing the vertices merged by
/// pair `i` of [get_pairs] and their new parent `n + i`.
///
/// # Example
/// ```
/// use phylo2vec::vector::get_ancestry;
///
/// assert_eq!(get_ancestry(&[0, 0, 1]), vec![[1, 3, 4], [0, 2, 5], [5, 4, 6]]);
/// ```
pub fn get_ancestry(v: &[usize]) -> Vec<[usize; 3]> {
    let num_leaves = v.len() + 1;
    let mut current: Vec<usize> = (0..num_leaves).collect();

    get_pairs(v)
        .into_iter()
        .enumerate()
        .map(|(i, (a, b))| {
            let parent = num_leaves + i;
            let row = [current[a], current[b], parent];
            current[a] = parent;
            current[b] = parent;
            row
        })
        .collect()
}

/// Writes the Newick string of an ancestry table.
///
/// Internal vertices carry their id as label.
///
/// # Example
/// ```
/// use phylo2vec::vector::build_newick;
///
/// assert_eq!(build_newick(&[[1, 3, 4], [0, 2, 5], [5, 4, 6]]), "((0,2)5,(1,3)4)6;");
/// ```
pub fn build_newick(ancestry: &[[usize; 3]]) -> String {
    Topology::from_ancestry(ancestry).to_newick()
}

/// Encodes a vector as Newick string with integer leaf and internal labels.
///
/// `v` must satisfy [check_v]; this is only checked in debug builds.
///
/// # Example
/// ```
/// use phylo2vec::vector::to_newick;
///
/// assert_eq!(to_newick(&[0, 0, 1]), "((0,2)5,(1,3)4)6;");
/// assert_eq!(to_newick(&[0, 1, 2]), "(0,(1,(2,3)4)5)6;");
/// ```
pub fn to_newick(v: &[usize]) -> String {
    debug_assert!(check_v(v).is_ok(), "invalid vector {v:?}");
    topology_from_vector(v).to_newick()
}

/// Builds the [Topology] encoded by a vector.
pub(crate) fn topology_from_vector(v: &[usize]) -> Topology {
    Topology::from_ancestry(&get_ancestry(v))
}

// =#========================================================================#=
// DECODING
// =#========================================================================#=
/// Decodes a Newick string with integer leaf labels into its vector.
///
/// Leaves must be labelled `0..n-1`. Internal labels, branch lengths and
/// comments are ignored; the result depends only on the leaf-labelled topology.
/// If the leaf labels are not exactly `0..n-1`, leaves are numbered in order
/// of appearance instead.
///
/// # Errors
/// [Phylo2VecError::Parse](crate::error::Phylo2VecError::Parse) if `newick`
/// is not a binary Newick tree with at least two leaves.
///
/// # Example
/// ```
/// use phylo2vec::vector::to_vector;
///
/// assert_eq!(to_vector("((0,2)5,(1,3)4)6;").unwrap(), vec![0, 0, 1]);
/// assert_eq!(to_vector("((1,3),(0,2));").unwrap(), vec![0, 0, 1]);
/// ```
pub fn to_vector(newick: &str) -> Result<Vec<usize>> {
    let topology = parse_topology(newick, false)?;
    let v = topology.to_vector();
    debug!("Decoded Newick string into vector for {} leaves", topology.num_leaves());
    Ok(v)
}

/// Parses a Newick string into a [Topology].
///
/// # Arguments
/// * `newick` - Newick string, ideally with leaves labelled `0..n-1`
/// * `branch_lengths_required` - Whether every non-root vertex needs a branch length
pub(crate) fn parse_topology(newick: &str, branch_lengths_required: bool) -> Result<Topology> {
    let mut byte_parser = ByteParser::for_str(newick);
    let mut newick_parser = NewickParser::new().with_num_leaves(find_num_leaves(newick));
    if branch_lengths_required {
        newick_parser = newick_parser.with_branch_lengths_required();
    }

    let tree = newick_parser.parse(&mut byte_parser)?;
    let labels = newick_parser.into_label_mapping();
    let leaf_ids = labels.canonical_indices().unwrap_or_else(|| {
        debug!("Leaf labels are not 0..n-1, numbering leaves by appearance");
        (0..labels.num_labels()).collect()
    });

    Ok(Topology::from_tree(&tree, &leaf_ids))
}
