//! Random sampling of Phylo2Vec vectors.
//!
//! All sampling draws from an explicit random source. Use [seed_everything]
//! for reproducible results.

use crate::error::{Phylo2VecError, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which attachments a sampled vector may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrdering {
    /// `v[k]` is drawn from `0..=k`, so every leaf attaches next to a leaf
    Ordered,
    /// `v[k]` is drawn from `0..=2k`, covering all trees (default)
    #[default]
    Unordered,
}

/// Returns a deterministically seeded random source.
///
/// # Example
/// ```
/// use phylo2vec::vector::{sample_vector, seed_everything};
///
/// let v1 = sample_vector(10, &mut seed_everything(42)).unwrap();
/// let v2 = sample_vector(10, &mut seed_everything(42)).unwrap();
/// assert_eq!(v1, v2);
/// ```
pub fn seed_everything(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Samples a vector for `num_leaves` leaves, drawing every entry
/// independently and uniformly from its valid range `0..=2k`.
///
/// # Errors
/// [Phylo2VecError::InvalidValue] if `num_leaves < 2`.
pub fn sample_vector<R: Rng + ?Sized>(num_leaves: usize, rng: &mut R) -> Result<Vec<usize>> {
    sample_vector_with(num_leaves, SampleOrdering::default(), rng)
}

/// Samples a vector for `num_leaves` leaves with the given [SampleOrdering].
///
/// # Errors
/// [Phylo2VecError::InvalidValue] if `num_leaves < 2`.
///
/// # Example
/// ```
/// use phylo2vec::vector::{SampleOrdering, sample_vector_with, seed_everything};
///
/// let mut rng = seed_everything(7);
/// let v = sample_vector_with(20, SampleOrdering::Ordered, &mut rng).unwrap();
/// assert!(v.iter().enumerate().all(|(k, &x)| x <= k));
/// ```
pub fn sample_vector_with<R: Rng + ?Sized>(
    num_leaves: usize,
    ordering: SampleOrdering,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if num_leaves < 2 {
        return Err(Phylo2VecError::InvalidValue(format!(
            "Number of leaves must be at least 2, got {num_leaves}"
        )));
    }

    let v = (0..num_leaves - 1)
        .map(|k| match ordering {
            SampleOrdering::Ordered => rng.gen_range(0..=k),
            SampleOrdering::Unordered => rng.gen_range(0..=2 * k),
        })
        .collect();
    debug!("Sampled {ordering:?} vector for {num_leaves} leaves");

    Ok(v)
}
