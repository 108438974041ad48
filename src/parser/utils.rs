//! Utility functions for label escaping in Newick strings.
//!
//! Labels are written unquoted whenever possible. Labels containing Newick
//! punctuation, whitespace or single quotes are wrapped in single quotes,
//! with each internal single quote doubled, so that the [ByteParser] reads
//! back exactly the original label.
//!
//! [ByteParser]: crate::parser::byte_parser::ByteParser

/// Characters that cannot appear in an unquoted Newick label.
const SPECIAL_CHARS: &[char] = &[
    ' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'',
];

/// Checks if a label can be written to a Newick string without quoting.
///
/// # Arguments
/// * `label` - The label string to check
///
/// # Returns
/// `true` if the label is non-empty and contains no special characters
///
/// # Examples
/// ```
/// # use phylo2vec::parser::utils::is_plain_label;
/// assert!(is_plain_label("Pukeko"));
/// assert!(is_plain_label("Australasian_Swamphen"));
/// assert!(!is_plain_label("Australasian Swamphen"));
/// assert!(!is_plain_label("Pu[ke]ko"));
/// assert!(!is_plain_label(""));
/// ```
pub fn is_plain_label(label: &str) -> bool {
    !label.is_empty() && !label.contains(SPECIAL_CHARS)
}

/// Escapes a label for safe use in a Newick string.
///
/// Plain labels are returned as-is. Any other label is wrapped in single
/// quotes and internal single quotes are doubled.
///
/// # Arguments
/// * `label` - The label string to escape
///
/// # Returns
/// An escaped label string that parses back to `label`
///
/// # Examples
/// ```
/// # use phylo2vec::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_plain_label(label) {
        return label.to_string();
    }

    format!("'{}'", label.replace('\'', "''"))
}
