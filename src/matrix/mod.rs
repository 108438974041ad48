//! Phylo2Mat matrices: Phylo2Vec vectors extended by branch lengths.
//!
//! A matrix for `n` leaves has shape `(n-1, 3)`. Row `k` describes the
//! internal vertex created when leaf `k+1` was attached:
//! * column 0 - the vector entry `v[k]`
//! * column 1 - branch length above the child holding the older leaves
//! * column 2 - branch length above the child holding leaf `k+1`
//!
//! # Example
//! ```
//! use phylo2vec::matrix::{to_matrix, to_newick_from_matrix};
//!
//! let newick = "((0:0.5,2:0.25)5:0.1,(1:1,3:2)4:0.3)6;";
//! let m = to_matrix(newick).unwrap();
//! assert_eq!(m.row(1).to_vec(), vec![0.0, 0.5, 0.25]);
//! assert_eq!(to_newick_from_matrix(&m).unwrap(), newick);
//! ```

use crate::error::{Phylo2VecError, Result};
use crate::model::topology::Topology;
use crate::model::vertex::BranchLength;
use crate::vector::codec::{get_ancestry, get_pairs, parse_topology};
use crate::vector::{check_m, sample_vector, vector_column};
use log::debug;
use ndarray::Array2;
use rand::Rng;

/// Number of columns of a matrix: vector entry and two branch lengths.
const NUM_COLUMNS: usize = 3;

/// Decodes a Newick string with branch lengths into its matrix.
///
/// Leaves must be labelled `0..n-1` (otherwise they are numbered in order of
/// appearance, as in [to_vector](crate::vector::to_vector)).
///
/// # Errors
/// [Phylo2VecError::Parse] if `newick` is not a binary Newick tree or a
/// non-root vertex has no branch length.
pub fn to_matrix(newick: &str) -> Result<Array2<f64>> {
    let topology = parse_topology(newick, true)?;
    let v = topology.to_vector();
    let min_leaves = topology.min_leaves();

    let mut m = Array2::zeros((v.len(), NUM_COLUMNS));
    for (k, &value) in v.iter().enumerate() {
        m[[k, 0]] = value as f64;
    }

    for index in topology.num_leaves()..topology.num_vertices() {
        let Some((left, right)) = topology.children(index) else {
            continue;
        };
        // The child with the larger minimum leaf holds the creating leaf
        let (older, newer) = if min_leaves[left] < min_leaves[right] {
            (left, right)
        } else {
            (right, left)
        };
        let row = min_leaves[newer] - 1;
        m[[row, 1]] = branch_length_of(&topology, older)?;
        m[[row, 2]] = branch_length_of(&topology, newer)?;
    }
    debug!("Decoded Newick string into {}x{} matrix", m.nrows(), m.ncols());

    Ok(m)
}

/// Encodes a matrix as Newick string with branch lengths.
///
/// # Errors
/// [Phylo2VecError::InvalidMatrix] if `m` fails [check_m] or does not have three columns.
pub fn to_newick_from_matrix(m: &Array2<f64>) -> Result<String> {
    check_m(m)?;
    if m.ncols() != NUM_COLUMNS {
        return Err(Phylo2VecError::InvalidMatrix(format!(
            "Matrix must have {NUM_COLUMNS} columns, got {}",
            m.ncols()
        )));
    }

    let v = vector_column(m)?;
    let ancestry = get_ancestry(&v);
    let mut topology = Topology::from_ancestry(&ancestry);

    for (&[older, newer, _], (_, leaf)) in ancestry.iter().zip(get_pairs(&v)) {
        let row = leaf - 1;
        topology
            .vertex_mut(older)
            .set_branch_length(Some(to_branch_length(m[[row, 1]])?));
        topology
            .vertex_mut(newer)
            .set_branch_length(Some(to_branch_length(m[[row, 2]])?));
    }

    Ok(topology.to_newick())
}

/// Samples a matrix for `num_leaves` leaves: a uniform vector (see
/// [sample_vector]) with branch lengths drawn uniformly from `(0, 1]`.
///
/// # Errors
/// [Phylo2VecError::InvalidValue] if `num_leaves < 2`.
///
/// # Example
/// ```
/// use phylo2vec::matrix::sample_matrix;
/// use phylo2vec::vector::{check_m, seed_everything};
///
/// let m = sample_matrix(8, &mut seed_everything(1)).unwrap();
/// assert_eq!(m.dim(), (7, 3));
/// assert!(check_m(&m).is_ok());
/// ```
pub fn sample_matrix<R: Rng + ?Sized>(num_leaves: usize, rng: &mut R) -> Result<Array2<f64>> {
    let v = sample_vector(num_leaves, rng)?;

    let mut m = Array2::zeros((v.len(), NUM_COLUMNS));
    for (mut row, &value) in m.rows_mut().into_iter().zip(&v) {
        row[0] = value as f64;
        row[1] = 1.0 - rng.gen_range(0.0..1.0);
        row[2] = 1.0 - rng.gen_range(0.0..1.0);
    }

    Ok(m)
}

fn branch_length_of(topology: &Topology, index: usize) -> Result<f64> {
    topology
        .vertex(index)
        .branch_length()
        .map(|length| *length)
        .ok_or_else(|| {
            Phylo2VecError::InvalidValue(format!("Vertex {index} has no branch length"))
        })
}

fn to_branch_length(length: f64) -> Result<BranchLength> {
    BranchLength::try_new(length).ok_or_else(|| {
        Phylo2VecError::InvalidMatrix(format!("Invalid branch length {length}"))
    })
}
