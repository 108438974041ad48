//! Label mapping between string leaf labels and dense leaf indices.
//!
//! - `LabelMapping`: bidirectional storage and lookup of leaf labels, where
//!   the label at position `i` belongs to leaf `i`.

use crate::error::{Phylo2VecError, Result};
use std::collections::HashMap;
use std::fmt;

/// Index of a label in a [LabelMapping] (and thus of a leaf).
pub type LabelIndex = usize;

// =#========================================================================#=
// LABEL MAPPING
// =#========================================================================#=
/// Maps leaf labels (strings) to dense indices `0..n-1` and back.
///
/// Labels are unique; the mapping is injective in both directions.
///
/// # Example
/// ```
/// use phylo2vec::model::label_mapping::LabelMapping;
///
/// let mut labels = LabelMapping::new(3);
///
/// let idx_a = labels.try_insert("A").unwrap(); // idx_a = 0
/// let idx_b = labels.try_insert("B").unwrap(); // idx_b = 1
/// assert_eq!(labels.try_insert("A"), None);    // duplicates are rejected
///
/// assert_eq!(labels.get_label(idx_b), Some("B"));
/// assert_eq!(labels.get_index("A"), Some(idx_a));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMapping {
    /// List of unique labels, position is the index
    labels: Vec<String>,
    /// Map from label to its index
    map: HashMap<String, LabelIndex>,
}

impl LabelMapping {
    /// Creates a new empty LabelMapping with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of unique leaf labels
    pub fn new(num_leaves: usize) -> Self {
        LabelMapping {
            labels: Vec::with_capacity(num_leaves),
            map: HashMap::with_capacity(num_leaves),
        }
    }

    /// Inserts a new label, assigning it the next free index.
    ///
    /// # Returns
    /// `Some(index)` of the inserted label, or `None` if the label already exists
    pub fn try_insert(&mut self, label: &str) -> Option<LabelIndex> {
        if self.map.contains_key(label) {
            return None;
        }

        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.map.insert(label.to_string(), index);
        Some(index)
    }

    /// Retrieves the index for a given label.
    ///
    /// # Returns
    /// `Some(index)` if the label exists, `None` otherwise
    pub fn get_index(&self, label: &str) -> Option<LabelIndex> {
        self.map.get(label).copied()
    }

    /// Retrieves the label for a given index.
    ///
    /// # Returns
    /// `Some(&str)` if the index is valid, `None` otherwise
    pub fn get_label(&self, index: LabelIndex) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Checks if a label exists in the mapping.
    pub fn contains_label(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of labels currently stored.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns reference to the labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns an iterator over `(index, label)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelIndex, &str)> {
        self.labels.iter().enumerate().map(|(i, s)| (i, s.as_str()))
    }

    /// Checks whether the labels already are the integers `0..n-1` in some order.
    ///
    /// # Returns
    /// `Some(ids)` with `ids[i]` the integer value of label `i`, if every label
    /// parses to an integer and together they form a permutation of `0..n-1`;
    /// `None` otherwise
    pub fn canonical_indices(&self) -> Option<Vec<usize>> {
        let n = self.labels.len();
        let mut seen = vec![false; n];
        let mut ids = Vec::with_capacity(n);

        for label in &self.labels {
            let id: usize = label.parse().ok()?;
            if id >= n || seen[id] {
                return None;
            }
            seen[id] = true;
            ids.push(id);
        }

        Some(ids)
    }

    /// Converts this mapping into the `label -> "index"` exchange format.
    ///
    /// # Example
    /// ```
    /// use phylo2vec::model::label_mapping::LabelMapping;
    ///
    /// let mut labels = LabelMapping::new(2);
    /// labels.try_insert("Kea");
    /// labels.try_insert("Kaka");
    ///
    /// let map = labels.to_string_map();
    /// assert_eq!(map["Kaka"], "1");
    /// ```
    pub fn to_string_map(&self) -> HashMap<String, String> {
        self.iter()
            .map(|(index, label)| (label.to_string(), index.to_string()))
            .collect()
    }

    /// Builds a mapping from the `label -> "index"` exchange format.
    ///
    /// # Errors
    /// Returns [Phylo2VecError::InvalidValue] if an index is not an integer,
    /// occurs twice, or the indices do not cover `0..n-1`.
    pub fn from_string_map(map: &HashMap<String, String>) -> Result<Self> {
        let n = map.len();
        let mut slots: Vec<Option<&str>> = vec![None; n];

        for (label, index) in map {
            let index: usize = index.trim().parse().map_err(|_| {
                Phylo2VecError::InvalidValue(format!(
                    "Index '{index}' of label '{label}' is not a non-negative integer"
                ))
            })?;
            if index >= n {
                return Err(Phylo2VecError::InvalidValue(format!(
                    "Index {index} of label '{label}' out of range for {n} labels"
                )));
            }
            if slots[index].replace(label).is_some() {
                return Err(Phylo2VecError::InvalidValue(format!(
                    "Index {index} assigned to more than one label"
                )));
            }
        }

        let mut mapping = LabelMapping::new(n);
        for label in slots.into_iter().flatten() {
            mapping.try_insert(label);
        }
        Ok(mapping)
    }
}

impl fmt::Display for LabelMapping {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "LabelMapping ({} labels):", self.labels.len())?;
        for (idx, label) in self.iter() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}

impl std::ops::Index<LabelIndex> for LabelMapping {
    type Output = str;

    fn index(&self, index: LabelIndex) -> &Self::Output {
        &self.labels[index]
    }
}
