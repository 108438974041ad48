use crate::model::label_mapping::LabelMapping;
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use log::debug;

/// Parser (configuration) for Newick strings of rooted binary trees.
///
/// Parses a single tree into a [Tree] whose leaves reference their labels in
/// a [LabelMapping] by first-appearance order. Internal labels are read and
/// discarded; branch lengths are kept.
///
/// # Configuration
/// * `with_num_leaves(num_leaves)` - Can be configured with the number of leaves
///   to pre-allocate, otherwise it is inferred from the first parsed tree.
/// * `with_branch_lengths_required()` - Every non-root vertex must carry a
///   branch length, otherwise parsing fails.
///
/// # Errors
/// Besides malformed input (unbalanced parentheses, missing `;`, empty labels,
/// trailing content), parsing fails for vertices with other than two children,
/// trees with fewer than two leaves, and duplicate leaf labels.
///
/// # Example
/// ```
/// use phylo2vec::newick::NewickParser;
/// use phylo2vec::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1.0,B:1.0)4:0.5,C:1.5)5;");
///
/// let mut newick_parser = NewickParser::new().with_num_leaves(3); // create and configure
/// let tree = newick_parser.parse(&mut byte_parser).unwrap(); // let it parse to get tree
/// let labels = newick_parser.into_label_mapping(); // consume into LabelMapping
///
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(labels.get_index("C"), Some(2));
/// ```
#[derive(Debug)]
pub struct NewickParser {
    know_num_leaves: bool,
    num_leaves: usize,
    branch_lengths_required: bool,
    labels: LabelMapping,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NewickParser {
    /// Creates a new `NewickParser` with default settings.
    ///
    /// By default:
    /// - Number of leaves is unknown (will be counted during parsing), and
    /// - branch lengths are optional.
    pub fn new() -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
            branch_lengths_required: false,
            labels: LabelMapping::new(0),
        }
    }

    /// Sets the expected number of leaves in the tree.
    ///
    /// This allows pre-allocation of data structures for better performance.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }

    /// Requires every non-root vertex to have a branch length.
    pub fn with_branch_lengths_required(mut self) -> Self {
        self.branch_lengths_required = true;
        self
    }

    /// Returns the label mapping of the most recently parsed tree.
    pub fn label_mapping(&self) -> &LabelMapping {
        &self.labels
    }

    /// Consumes the parser and returns the label mapping of the most recently parsed tree.
    pub fn into_label_mapping(self) -> LabelMapping {
        self.labels
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The whole remaining input must be one tree terminated by `;`,
    /// optionally followed by whitespace and comments.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick string
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed tree, vertices in post-order, root last
    /// * `Err(ParsingError)` - If the Newick string is invalid
    pub fn parse<S: ByteSource>(&mut self, parser: &mut ByteParser<S>) -> Result<Tree, ParsingError> {
        self.labels = LabelMapping::new(self.num_leaves);
        let mut tree = Tree::new(self.num_leaves);

        // One entry per open parenthesis, holding the left child once parsed
        let mut open: Vec<Option<VertexIndex>> = Vec::new();

        'subtree: loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(None);
                continue;
            }

            let mut completed = self.parse_leaf(parser, &mut tree)?;

            // Close as many vertices as the completed subtree finishes
            loop {
                parser.skip_comment_and_whitespace()?;
                match open.last().copied() {
                    None => break 'subtree,
                    Some(None) => {
                        self.expect_separator(parser)?;
                        let depth = open.len();
                        open[depth - 1] = Some(completed);
                        continue 'subtree;
                    }
                    Some(Some(left)) => {
                        self.expect_closing(parser)?;
                        open.pop();

                        // Internal labels are not needed
                        parser.parse_label(NEWICK_LABEL_DELIMITERS)?;

                        completed = if open.is_empty() {
                            // Root may have a branch length, which is ignored
                            self.parse_branch_length(parser, false)?;
                            tree.add_root((left, completed))
                        } else {
                            let branch_length =
                                self.parse_branch_length(parser, self.branch_lengths_required)?;
                            tree.add_internal_vertex((left, completed), branch_length)
                        };
                    }
                }
            }
        }

        if !tree.is_root_set() {
            return Err(ParsingError::invalid_tree_structure(
                parser,
                "Tree must have at least two leaves".to_string(),
            ));
        }

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", parser.peek().map(|b| b as char)),
            ));
        }

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Unexpected content after ';'".to_string(),
            ));
        }

        // Having parsed a full tree, we now know the number of leaves in a tree
        if !self.know_num_leaves {
            self.num_leaves = self.labels.num_labels();
            self.know_num_leaves = true;
        }
        debug!("Parsed Newick tree with {} leaves", self.labels.num_labels());

        Ok(tree)
    }

    /// Parses leaf, adds it to tree, and returns its index:
    /// - `label[:branch_length]`
    /// - Label must be non-empty and not seen before in this tree
    fn parse_leaf<S: ByteSource>(
        &mut self,
        parser: &mut ByteParser<S>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected leaf label but found {:?}", parser.peek().map(|b| b as char)),
            ));
        }

        let Some(label_index) = self.labels.try_insert(&label) else {
            return Err(ParsingError::duplicate_label(parser, label));
        };

        let branch_length = self.parse_branch_length(parser, self.branch_lengths_required)?;
        Ok(tree.add_leaf(branch_length, label_index))
    }

    /// Parses an optional branch length `:number`.
    ///
    /// # Returns
    /// - `None` if there is no branch length (and none is required)
    /// - [ParsingError] if the number is invalid or negative, or `required` is
    ///   set and no branch length is present
    fn parse_branch_length<S: ByteSource>(
        &self,
        parser: &mut ByteParser<S>,
        required: bool,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            if required {
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    "Missing branch length".to_string(),
                ));
            }
            return Ok(None);
        }

        parser.skip_comment_and_whitespace()?;
        let start = parser.position();
        let token = parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS);
        let value: f64 = token.parse().map_err(|_| ParsingError::invalid_newick_string(
            parser,
            format!("Invalid branch length '{token}' starting at position {start}"),
        ))?;

        match BranchLength::try_new(value) {
            Some(branch_length) => Ok(Some(branch_length)),
            None => Err(ParsingError::invalid_newick_string(
                parser,
                format!("Branch length must be non-negative and finite, got {value}"),
            )),
        }
    }

    /// Consumes the `,` between the two children of a vertex.
    fn expect_separator<S: ByteSource>(&self, parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
        match parser.peek() {
            Some(b',') => {
                parser.next();
                Ok(())
            }
            Some(b')') => Err(ParsingError::invalid_tree_structure(
                parser,
                "Vertex with a single child".to_string(),
            )),
            None => Err(ParsingError::unexpected_eof(parser)),
            Some(other) => Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ',' between children but found {:?}", other as char),
            )),
        }
    }

    /// Consumes the `)` after the second child of a vertex.
    fn expect_closing<S: ByteSource>(&self, parser: &mut ByteParser<S>) -> Result<(), ParsingError> {
        match parser.peek() {
            Some(b')') => {
                parser.next();
                Ok(())
            }
            Some(b',') => Err(ParsingError::invalid_tree_structure(
                parser,
                "Vertex with more than two children".to_string(),
            )),
            None => Err(ParsingError::unexpected_eof(parser)),
            Some(other) => Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ')' after children but found {:?}", other as char),
            )),
        }
    }
}
