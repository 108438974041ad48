//! Validation of Phylo2Vec vectors and matrices.

use crate::error::{Phylo2VecError, Result};
use ndarray::{Array2, s};

/// Checks that `v` is a well-formed Phylo2Vec vector.
///
/// A vector for `n ≥ 2` leaves has `n-1` entries with `v[k] ≤ 2k`.
///
/// # Errors
/// [Phylo2VecError::InvalidVector] if `v` is empty or an entry is out of range.
///
/// # Example
/// ```
/// use phylo2vec::vector::check_v;
///
/// assert!(check_v(&[0, 1, 4, 6]).is_ok());
/// assert!(check_v(&[0, 3]).is_err());
/// assert!(check_v(&[]).is_err());
/// ```
pub fn check_v(v: &[usize]) -> Result<()> {
    if v.is_empty() {
        return Err(Phylo2VecError::InvalidVector(
            "Vector must have at least one entry".to_string(),
        ));
    }

    if let Some((k, &value)) = v.iter().enumerate().find(|&(k, &value)| value > 2 * k) {
        return Err(Phylo2VecError::InvalidVector(format!(
            "Entry {k} is {value}, but must be at most {}",
            2 * k
        )));
    }

    Ok(())
}

/// Checks that `m` is a well-formed Phylo2Mat matrix.
///
/// Column 0 must hold a valid vector as non-negative integral values, every
/// other entry must be a strictly positive, finite branch length.
///
/// # Errors
/// [Phylo2VecError::InvalidMatrix] if the matrix is empty or any check fails.
///
/// # Example
/// ```
/// use ndarray::array;
/// use phylo2vec::vector::check_m;
///
/// assert!(check_m(&array![[0.0, 0.5, 0.1], [2.0, 0.3, 0.7]]).is_ok());
/// assert!(check_m(&array![[0.0, 0.5, 0.0]]).is_err());
/// ```
pub fn check_m(m: &Array2<f64>) -> Result<()> {
    if m.nrows() == 0 || m.ncols() == 0 {
        return Err(Phylo2VecError::InvalidMatrix(
            "Matrix must have at least one row and one column".to_string(),
        ));
    }

    let v = vector_column(m)?;
    check_v(&v).map_err(|err| match err {
        Phylo2VecError::InvalidVector(msg) => Phylo2VecError::InvalidMatrix(msg),
        other => other,
    })?;

    let branch_lengths = m.slice(s![.., 1..]);
    let invalid = branch_lengths
        .indexed_iter()
        .find(|&(_, &x)| !x.is_finite() || x <= 0.0);
    if let Some(((row, col), &value)) = invalid {
        return Err(Phylo2VecError::InvalidMatrix(format!(
            "Branch length at row {row}, column {} is {value}, but must be positive and finite",
            col + 1
        )));
    }

    Ok(())
}

/// Extracts column 0 of a matrix as a vector of non-negative integers.
///
/// # Errors
/// [Phylo2VecError::InvalidMatrix] if a value is negative, not integral or not finite.
pub(crate) fn vector_column(m: &Array2<f64>) -> Result<Vec<usize>> {
    m.column(0)
        .iter()
        .enumerate()
        .map(|(k, &value)| {
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                Ok(value as usize)
            } else {
                Err(Phylo2VecError::InvalidMatrix(format!(
                    "Entry {k} of vector column is {value}, but must be a non-negative integer"
                )))
            }
        })
        .collect()
}
