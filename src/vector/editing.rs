//! Tree edits and queries expressed on Phylo2Vec vectors.
//!
//! Every operation validates its input vector with [check_v] and leaves it
//! untouched; edits return a new vector. Vertex ids refer to the numbering
//! of [to_newick](crate::vector::to_newick): leaves `0..n-1`, internal
//! vertices `n..2n-2` with the root at `2n-2`.

use crate::error::{Phylo2VecError, Result};
use crate::vector::codec::topology_from_vector;
use crate::vector::validation::check_v;
use log::debug;
use rand::Rng;

/// Adds a new leaf `n` to the tree of `v`.
///
/// The leaf is attached the way the encoding attaches leaf `n`: next to leaf
/// `attach_index` if `attach_index ≤ n-1`, otherwise next to an internal vertex.
///
/// # Errors
/// * [Phylo2VecError::InvalidVector] if `v` is invalid
/// * [Phylo2VecError::IndexOutOfBounds] if `attach_index > 2(n-1)`
///
/// # Example
/// ```
/// use phylo2vec::vector::{add_leaf, to_newick};
///
/// let v = add_leaf(&[0, 0, 1], 6).unwrap();
/// assert_eq!(to_newick(&v), "(((0,2)6,(1,3)5)7,4)8;");
/// ```
pub fn add_leaf(v: &[usize], attach_index: usize) -> Result<Vec<usize>> {
    check_v(v)?;

    let bound = 2 * v.len() + 1;
    if attach_index >= bound {
        return Err(Phylo2VecError::IndexOutOfBounds {
            index: attach_index,
            bound,
        });
    }

    let mut new_v = Vec::with_capacity(v.len() + 1);
    new_v.extend_from_slice(v);
    new_v.push(attach_index);
    Ok(new_v)
}

/// Removes `leaf` from the tree of `v`.
///
/// The sibling of `leaf` takes the place of their parent and leaves above
/// `leaf` are renumbered down by one.
///
/// # Errors
/// * [Phylo2VecError::InvalidVector] if `v` is invalid or the tree has only two leaves
/// * [Phylo2VecError::IndexOutOfBounds] if `leaf ≥ n`
///
/// # Example
/// ```
/// use phylo2vec::vector::remove_leaf;
///
/// assert_eq!(remove_leaf(&[0, 0, 0, 1, 3], 5).unwrap(), vec![0, 0, 0, 1]);
/// assert_eq!(remove_leaf(&[0, 0, 0, 1, 3], 2).unwrap(), vec![0, 0, 1, 2]);
/// ```
pub fn remove_leaf(v: &[usize], leaf: usize) -> Result<Vec<usize>> {
    check_v(v)?;

    let num_leaves = v.len() + 1;
    if num_leaves <= 2 {
        return Err(Phylo2VecError::InvalidVector(
            "Cannot remove a leaf from a tree with two leaves".to_string(),
        ));
    }
    check_leaf(leaf, num_leaves)?;

    Ok(topology_from_vector(v).without_leaf(leaf).to_vector())
}

/// Returns the id of the lowest common ancestor of leaves `i` and `j`.
///
/// Returns the leaf itself if `i == j`.
///
/// # Errors
/// * [Phylo2VecError::InvalidVector] if `v` is invalid
/// * [Phylo2VecError::IndexOutOfBounds] if `i ≥ n` or `j ≥ n`
///
/// # Example
/// ```
/// use phylo2vec::vector::get_common_ancestor;
///
/// // "((0,2)5,(1,3)4)6;"
/// assert_eq!(get_common_ancestor(&[0, 0, 1], 0, 2).unwrap(), 5);
/// assert_eq!(get_common_ancestor(&[0, 0, 1], 2, 1).unwrap(), 6);
/// ```
pub fn get_common_ancestor(v: &[usize], i: usize, j: usize) -> Result<usize> {
    check_v(v)?;

    let num_leaves = v.len() + 1;
    check_leaf(i, num_leaves)?;
    check_leaf(j, num_leaves)?;

    Ok(topology_from_vector(v).common_ancestor(i, j))
}

/// Relabels the leaves of `v`: old leaf `permutation[x]` becomes leaf `x`.
///
/// # Errors
/// * [Phylo2VecError::InvalidVector] if `v` is invalid
/// * [Phylo2VecError::InvalidValue] if `permutation` is not a permutation of `0..n-1`
///
/// # Example
/// ```
/// use phylo2vec::vector::reorder_v;
///
/// // Reversing the caterpillar (0,(1,(2,3))) gives (((0,1),2),3)
/// assert_eq!(reorder_v(&[0, 1, 2], &[3, 2, 1, 0]).unwrap(), vec![0, 2, 4]);
/// ```
pub fn reorder_v(v: &[usize], permutation: &[usize]) -> Result<Vec<usize>> {
    check_v(v)?;

    let num_leaves = v.len() + 1;
    if permutation.len() != num_leaves {
        return Err(Phylo2VecError::InvalidValue(format!(
            "Permutation has {} entries, but the tree has {num_leaves} leaves",
            permutation.len()
        )));
    }

    let mut new_of_old = vec![usize::MAX; num_leaves];
    for (new, &old) in permutation.iter().enumerate() {
        if old >= num_leaves || new_of_old[old] != usize::MAX {
            return Err(Phylo2VecError::InvalidValue(format!(
                "Permutation {permutation:?} is not a bijection on 0..{num_leaves}"
            )));
        }
        new_of_old[old] = new;
    }

    Ok(topology_from_vector(v)
        .with_relabeled_leaves(&new_of_old)
        .to_vector())
}

/// Places the root on the edge above `node`, suppressing the old root.
///
/// The unrooted tree is unchanged. Rerooting above a child of the root
/// returns an equal vector.
///
/// # Errors
/// * [Phylo2VecError::InvalidVector] if `v` is invalid
/// * [Phylo2VecError::IndexOutOfBounds] if `node ≥ 2n-2`, i.e. `node` is the root or beyond
///
/// # Example
/// ```
/// use phylo2vec::vector::reroot;
///
/// assert_eq!(reroot(&[0, 0, 1], 0).unwrap(), vec![0, 1, 1]);
/// ```
pub fn reroot(v: &[usize], node: usize) -> Result<Vec<usize>> {
    check_v(v)?;

    let bound = 2 * v.len();
    if node >= bound {
        return Err(Phylo2VecError::IndexOutOfBounds { index: node, bound });
    }

    Ok(topology_from_vector(v).rerooted_at(node).to_vector())
}

/// Reroots the tree of `v` above a node drawn uniformly from the `2n-2`
/// non-root nodes, see [reroot].
///
/// # Errors
/// [Phylo2VecError::InvalidVector] if `v` is invalid.
pub fn reroot_at_random<R: Rng + ?Sized>(v: &[usize], rng: &mut R) -> Result<Vec<usize>> {
    check_v(v)?;

    let node = rng.gen_range(0..2 * v.len());
    debug!("Rerooting tree with {} leaves above node {node}", v.len() + 1);
    reroot(v, node)
}

fn check_leaf(leaf: usize, num_leaves: usize) -> Result<()> {
    if leaf >= num_leaves {
        return Err(Phylo2VecError::IndexOutOfBounds {
            index: leaf,
            bound: num_leaves,
        });
    }
    Ok(())
}
