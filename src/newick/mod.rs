//! Newick format parser, writer and string utilities.
//!
//! This module provides [`NewickParser`] to parse Newick strings into a
//! [`Tree`], the writer [`write_newick`] for a [`Topology`], lenient scans that
//! inspect or clean up Newick strings without building a tree, and the
//! conversion between string and integer leaf labels.
//!
//! # Quick API
//! * [`parse_newick`] - parses a single string, returns [`Tree`] + [`LabelMapping`]
//! * [`find_num_leaves`], [`remove_annotations`], [`remove_parent_labels`], [`has_parents`]
//! * [`create_label_mapping`], [`apply_label_mapping`]
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex ',' vertex ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Labels can be single-quoted, with `''` standing for a quote inside
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//!
//! [`Topology`]: crate::model::topology::Topology

mod defs;
mod labels;
mod parser;
mod scan;
pub mod writer;

pub use self::labels::{apply_label_mapping, create_label_mapping};
pub use self::parser::NewickParser;
pub use self::scan::{find_num_leaves, has_parents, remove_annotations, remove_parent_labels};
pub use self::writer::write_newick;

use crate::model::label_mapping::LabelMapping;
use crate::model::tree::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string with default settings.
///
/// # Returns
/// * `(Tree, LabelMapping)` - The parsed tree and its leaf labels in first-appearance order
/// * [`ParsingError`] - If the string is not a valid binary Newick tree
///
/// # Example
/// ```
/// use phylo2vec::newick::parse_newick;
///
/// let (tree, labels) = parse_newick("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(labels.get_label(0), Some("Fratercula_cirrhata"));
/// ```
pub fn parse_newick(newick: &str) -> Result<(Tree, LabelMapping), ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick);
    let mut newick_parser = NewickParser::new();
    let tree = newick_parser.parse(&mut byte_parser)?;
    Ok((tree, newick_parser.into_label_mapping()))
}
