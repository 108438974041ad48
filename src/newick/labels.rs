//! Conversion between Newick strings with arbitrary leaf labels and their
//! integer form, where leaf `i` is labelled `i`.
//!
//! Only leaf label tokens are substituted; internal labels, branch lengths,
//! comments and whitespace are kept as they are.

use crate::error::{Phylo2VecError, Result};
use crate::model::label_mapping::LabelMapping;
use crate::newick::parser::NewickParser;
use crate::newick::scan::{TokenKind, Tokens, find_num_leaves};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingErrorType;
use crate::parser::utils::escape_label;
use log::debug;

/// Replaces leaf labels by their index in first-appearance order.
///
/// # Arguments
/// * `newick` - Newick string with string leaf labels
///
/// # Returns
/// The integer Newick string and the [LabelMapping] (label of leaf `i` at index `i`)
///
/// # Errors
/// * [Phylo2VecError::Parse] if `newick` is not a valid binary Newick tree
/// * [Phylo2VecError::InvalidValue] if a leaf label occurs twice, or the
///   labels already are the integers `0..n-1`
///
/// # Example
/// ```
/// use phylo2vec::newick::create_label_mapping;
///
/// let (newick_int, mapping) = create_label_mapping("((A,B),(D,E));").unwrap();
/// assert_eq!(newick_int, "((0,1),(2,3));");
/// assert_eq!(mapping.get_label(2), Some("D"));
/// ```
pub fn create_label_mapping(newick: &str) -> Result<(String, LabelMapping)> {
    let mut byte_parser = ByteParser::for_str(newick);
    let mut newick_parser = NewickParser::new().with_num_leaves(find_num_leaves(newick));

    if let Err(err) = newick_parser.parse(&mut byte_parser) {
        if let ParsingErrorType::DuplicateLabel(label) = err.kind() {
            return Err(Phylo2VecError::InvalidValue(format!(
                "Leaf label '{label}' occurs more than once"
            )));
        }
        return Err(err.into());
    }

    let mapping = newick_parser.into_label_mapping();
    if mapping.canonical_indices().is_some() {
        return Err(Phylo2VecError::InvalidValue(
            "Leaf labels already are the integers 0..n-1".to_string(),
        ));
    }

    let newick_int = map_leaf_labels(newick, |label| {
        mapping
            .get_index(label)
            .map(|index| index.to_string())
            .ok_or_else(|| Phylo2VecError::MissingLabel(label.to_string()))
    })?;
    debug!("Created label mapping for {} leaves", mapping.num_labels());

    Ok((newick_int, mapping))
}

/// Replaces integer leaf labels by their string label in `mapping`.
///
/// Labels are escaped (single-quoted) where needed.
///
/// # Errors
/// [Phylo2VecError::MissingLabel] if a leaf label is not an index of `mapping`.
///
/// # Example
/// ```
/// use phylo2vec::newick::{apply_label_mapping, create_label_mapping};
///
/// let original = "(('Homo sapiens',Pan),Gorilla);";
/// let (newick_int, mapping) = create_label_mapping(original).unwrap();
/// assert_eq!(apply_label_mapping(&newick_int, &mapping).unwrap(), original);
/// ```
pub fn apply_label_mapping(newick: &str, mapping: &LabelMapping) -> Result<String> {
    map_leaf_labels(newick, |token| {
        token
            .parse::<usize>()
            .ok()
            .and_then(|index| mapping.get_label(index))
            .map(escape_label)
            .ok_or_else(|| Phylo2VecError::MissingLabel(token.to_string()))
    })
}

/// Rewrites every leaf label token with `replace`, copying everything else.
fn map_leaf_labels<F>(newick: &str, mut replace: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut out = String::with_capacity(newick.len());
    for token in Tokens::new(newick) {
        match (token.kind, token.label.as_deref()) {
            (TokenKind::LeafLabel, Some(label)) => out.push_str(&replace(label)?),
            _ => out.push_str(&newick[token.start..token.end]),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_labels_and_lengths_kept() {
        let (newick_int, mapping) = create_label_mapping("((A:0.1,B:0.2)x:0.3,C:0.4)root;").unwrap();
        assert_eq!(newick_int, "((0:0.1,1:0.2)x:0.3,2:0.4)root;");
        assert_eq!(mapping.num_labels(), 3);
    }

    #[test]
    fn test_apply_missing_label() {
        let (_, mapping) = create_label_mapping("(A,B);").unwrap();
        let err = apply_label_mapping("((0,1),2);", &mapping).unwrap_err();
        assert!(matches!(err, Phylo2VecError::MissingLabel(label) if label == "2"));
    }
}
