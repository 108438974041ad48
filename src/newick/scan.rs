//! Linear scans over Newick strings that do not build a tree.
//!
//! The scans are lenient: they work token by token and never fail, so they
//! can be used to inspect or clean up strings before parsing them.
//! Quoted labels and `[...]` comments are respected throughout.

use crate::newick::defs::NEWICK_LABEL_DELIMITERS;
use crate::parser::byte_parser::{ByteParser, ConsumeMode};
use crate::parser::byte_source::InMemoryByteSource;

// =#========================================================================#=
// TOKENIZER
// =#========================================================================#=
/// Kind of a token of a Newick string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TokenKind {
    /// One of `(`, `)`, `,`, `:`, `;` or a stray `]`
    Punct(u8),
    Whitespace,
    /// `[...]`, up to the end of input if unclosed
    Comment,
    /// Leaf label (after `(`, `,` or at the start)
    LeafLabel,
    /// Internal label (after `)`)
    InternalLabel,
    /// Number after `:`
    BranchLength,
}

/// Token with its byte span in the input and, for labels, the unescaped label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub label: Option<String>,
}

/// Iterator over the tokens of a Newick string.
pub(crate) struct Tokens<'a> {
    parser: ByteParser<InMemoryByteSource<'a>>,
    /// Kind the next label-like token gets
    next_label: TokenKind,
}

impl<'a> Tokens<'a> {
    pub fn new(newick: &'a str) -> Self {
        Tokens {
            parser: ByteParser::for_str(newick),
            next_label: TokenKind::LeafLabel,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.parser.position();
        let byte = self.parser.peek()?;

        let (kind, label) = match byte {
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.parser.skip_whitespace();
                (TokenKind::Whitespace, None)
            }
            b'[' => {
                self.parser.consume_until(b']', ConsumeMode::Inclusive);
                (TokenKind::Comment, None)
            }
            b'(' | b')' | b',' | b':' | b';' => {
                self.parser.next();
                self.next_label = match byte {
                    b'(' | b',' => TokenKind::LeafLabel,
                    b')' => TokenKind::InternalLabel,
                    b':' => TokenKind::BranchLength,
                    _ => TokenKind::InternalLabel,
                };
                (TokenKind::Punct(byte), None)
            }
            b']' => {
                // Stray closing bracket
                self.parser.next();
                (TokenKind::Punct(byte), None)
            }
            _ => {
                let label = if byte == b'\'' {
                    // Unclosed quotes run to the end of input
                    self.parser.parse_quoted_label().unwrap_or_default()
                } else {
                    self.parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)
                };
                let kind = self.next_label;
                self.next_label = TokenKind::InternalLabel;
                (kind, Some(label))
            }
        };

        Some(Token {
            kind,
            start,
            end: self.parser.position(),
            label,
        })
    }
}

// =#========================================================================#=
// SCANS
// =#========================================================================#=
/// Counts the leaves of a Newick string without building the tree.
///
/// Comments and quoted label content are ignored. Scanning stops at an
/// unclosed comment.
///
/// # Example
/// ```
/// use phylo2vec::newick::find_num_leaves;
///
/// assert_eq!(find_num_leaves("((0,2)5,(1,3)4)6;"), 4);
/// assert_eq!(find_num_leaves("(('A,B':0.1,C)[x,y],D);"), 3);
/// ```
pub fn find_num_leaves(newick: &str) -> usize {
    Tokens::new(newick)
        .filter(|token| token.kind == TokenKind::LeafLabel)
        .count()
}

/// Removes all annotations: every `:`-prefixed branch length and every `[...]` comment.
///
/// # Example
/// ```
/// use phylo2vec::newick::remove_annotations;
///
/// assert_eq!(remove_annotations("((0:0.5,1:1.5)[&x]2:0.2,3:1.0)4;"), "((0,1)2,3)4;");
/// ```
pub fn remove_annotations(newick: &str) -> String {
    let mut out = String::with_capacity(newick.len());
    for token in Tokens::new(newick) {
        match token.kind {
            TokenKind::Comment | TokenKind::BranchLength | TokenKind::Punct(b':') => {}
            _ => out.push_str(&newick[token.start..token.end]),
        }
    }
    out
}

/// Removes integer labels of internal vertices, keeping leaf labels,
/// branch lengths and the topology.
///
/// # Example
/// ```
/// use phylo2vec::newick::remove_parent_labels;
///
/// assert_eq!(remove_parent_labels("((0,2)5,(1,3)4)6;"), "((0,2),(1,3));");
/// assert_eq!(remove_parent_labels("((0:0.1,2:0.2)5:0.3,1:0.4)6;"), "((0:0.1,2:0.2):0.3,1:0.4);");
/// ```
pub fn remove_parent_labels(newick: &str) -> String {
    let mut out = String::with_capacity(newick.len());
    for token in Tokens::new(newick) {
        if !is_integer_parent_label(&token) {
            out.push_str(&newick[token.start..token.end]);
        }
    }
    out
}

/// Returns whether any internal vertex carries an integer label.
///
/// # Example
/// ```
/// use phylo2vec::newick::has_parents;
///
/// assert!(has_parents("((0,2)5,(1,3)4)6;"));
/// assert!(!has_parents("((0,2),(1,3));"));
/// ```
pub fn has_parents(newick: &str) -> bool {
    Tokens::new(newick).any(|token| is_integer_parent_label(&token))
}

fn is_integer_parent_label(token: &Token) -> bool {
    token.kind == TokenKind::InternalLabel
        && token
            .label
            .as_deref()
            .is_some_and(|l| !l.is_empty() && l.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_token_kinds() {
        let kinds: Vec<TokenKind> = Tokens::new("(A,'B C'):1[c]5;")
            .map(|token| token.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Punct(b'('),
                TokenKind::LeafLabel,
                TokenKind::Punct(b','),
                TokenKind::LeafLabel,
                TokenKind::Punct(b')'),
                TokenKind::Punct(b':'),
                TokenKind::BranchLength,
                TokenKind::Comment,
                TokenKind::InternalLabel,
                TokenKind::Punct(b';'),
            ]
        );
    }

    #[test]
    fn test_quoted_label_value() {
        let labels: Vec<String> = Tokens::new("('Wilson''s',B);")
            .filter_map(|token| token.label)
            .collect();
        assert_eq!(labels, vec!["Wilson's", "B"]);
    }

    #[rstest]
    #[case("", 0)]
    #[case(";", 0)]
    #[case("(A,B);", 2)]
    #[case("(( A , B ) , C ) ;", 3)]
    #[case("((0,2)9,((1,3)7,(4,5)6)8)10;", 6)]
    #[case("(A[comment,with,commas],B);", 2)]
    #[case("(A,B)[unclosed,C", 2)]
    fn test_find_num_leaves(#[case] newick: &str, #[case] expected: usize) {
        assert_eq!(find_num_leaves(newick), expected);
    }

    #[rstest]
    #[case("((A:0.1,B:0.2):0.3,C:0.4);", "((A,B),C);")]
    #[case("((A[&x=1],B)[&y]:1e-3,C);", "((A,B),C);")]
    #[case("((A,B)5,C)6;", "((A,B)5,C)6;")]
    fn test_remove_annotations(#[case] newick: &str, #[case] expected: &str) {
        assert_eq!(remove_annotations(newick), expected);
    }

    #[rstest]
    #[case("((A,B)5,C)6;", "((A,B),C);")]
    #[case("((A,B)inner,C)6;", "((A,B)inner,C);")]
    #[case("(('7',B)5:1.0,C);", "(('7',B):1.0,C);")]
    fn test_remove_parent_labels(#[case] newick: &str, #[case] expected: &str) {
        assert_eq!(remove_parent_labels(newick), expected);
    }
}
