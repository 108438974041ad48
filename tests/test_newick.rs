use phylo2vec::newick::{
    NewickParser, find_num_leaves, has_parents, parse_newick, remove_annotations,
    remove_parent_labels,
};
use phylo2vec::parser::ParsingErrorType;
use phylo2vec::parser::byte_parser::ByteParser;
use rstest::rstest;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let mut parser = ByteParser::for_str(newick);
    let mut newick_parser = NewickParser::new().with_num_leaves(3);
    let tree = newick_parser.parse(&mut parser).unwrap();
    let labels = newick_parser.into_label_mapping();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(labels.num_labels(), 3);
    assert!(tree.is_valid());

    // Test basic label parsing
    assert!(labels.contains_label("A"));
    assert!(labels.contains_label("B"));
    assert!(labels.contains_label("C"));

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    let root_index = root.index();
    let (root_left, root_right) = root.children().unwrap();

    // - Internal node has children (A, B)
    let internal = tree.vertex(root_left);
    assert!(internal.is_internal());
    assert_eq!(*internal.branch_length().unwrap(), 3.0);
    let (internal_left, internal_right) = internal.children().unwrap();

    // - Three leaves
    let leaf_a = tree.vertex(internal_left);
    let leaf_b = tree.vertex(internal_right);
    let leaf_c = tree.vertex(root_right);
    assert_eq!(leaf_a.label_index(), labels.get_index("A"));
    assert_eq!(leaf_b.label_index(), labels.get_index("B"));
    assert_eq!(leaf_c.label_index(), labels.get_index("C"));

    // - Parent relationships
    assert_eq!(internal.parent_index(), Some(root_index));
    assert_eq!(leaf_a.parent_index(), Some(root_left));
    assert_eq!(leaf_b.parent_index(), Some(root_left));
    assert_eq!(leaf_c.parent_index(), Some(root_index));
}

#[test]
fn test_tree_with_quoted_labels() {
    let newick = "(('Taxon one':1.5,'Second''s taxon':2.5):3.0,'3rd Taxon':4.0):0.0;";
    let (tree, labels) = parse_newick(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert!(labels.contains_label("Taxon one"));
    assert!(labels.contains_label("Second's taxon"));
    assert!(labels.contains_label("3rd Taxon"));
}

#[test]
fn test_tree_with_scientific_notation() {
    let newick = "((A:1e-5,B:2.5E+3):1.0e2,C:3.14E-10):0.0;";
    let (tree, labels) = parse_newick(newick).unwrap();

    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(labels.num_labels(), 3);
    assert!(tree.vertices_have_branch_lengths());
}

#[test]
fn test_optional_branch_length() {
    let newick = "((A:1.0,B),C:4.0);";
    let (tree, _) = parse_newick(newick).unwrap();
    assert!(!tree.vertices_have_branch_lengths());
}

#[test]
fn test_required_branch_length() {
    let mut newick_parser = NewickParser::new().with_branch_lengths_required();

    let mut parser = ByteParser::for_str("((A:1.0,B:1.0):0.5,C:4.0);");
    assert!(newick_parser.parse(&mut parser).is_ok());

    let mut parser = ByteParser::for_str("((A:1.0,B):0.5,C:4.0);");
    let err = newick_parser.parse(&mut parser).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));
}

#[test]
fn test_internal_labels_are_dropped() {
    let (tree, labels) = parse_newick("((A,B)AB,C)root;").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(labels.num_labels(), 3);
    assert!(!labels.contains_label("AB"));
}

#[test]
fn test_parser_reuse_resets_labels() {
    let mut newick_parser = NewickParser::new();

    let mut parser = ByteParser::for_str("((A,B),C);");
    newick_parser.parse(&mut parser).unwrap();

    let mut parser = ByteParser::for_str("(D,(E,F));");
    newick_parser.parse(&mut parser).unwrap();
    assert_eq!(newick_parser.label_mapping().get_label(0), Some("D"));
    assert!(!newick_parser.label_mapping().contains_label("A"));
}

#[test]
fn test_newick_with_comment_1() {
    let newick_with_comment = "[A tree of] (([Shags!]A[Great Commentoran]:0.33,B[Pied Commentoran]:0.33):1.87,C:[King Commentoran]2.2):0.0;";
    let result = parse_newick(newick_with_comment);

    if result.is_err() {
        eprintln!(
            "Error parsing tree with comments: {:?}",
            result.as_ref().err()
        );
    }

    assert!(result.is_ok());
}

#[test]
fn test_newick_with_comment_2() {
    let newick_with_comment = "[A tree of] ([Shags!] C:[King Commentoran] 2.2, (A[Great Commentoran]:0.33, B[Pied Commentoran]:0.33):1.87):0.0[The end.];";
    let result = parse_newick(newick_with_comment);

    if result.is_err() {
        eprintln!(
            "Error parsing tree with comments: {:?}",
            result.as_ref().err()
        );
    }

    assert!(result.is_ok());
}

#[test]
fn test_deep_tree_is_parsed_iteratively() {
    let depth = 100_000;
    let mut newick = String::new();
    for i in 0..depth {
        newick.push_str(&format!("(L{i},"));
    }
    newick.push_str("Last");
    newick.push_str(&")".repeat(depth));
    newick.push(';');

    let (tree, labels) = parse_newick(&newick).unwrap();
    assert_eq!(labels.num_labels(), depth + 1);
    assert!(tree.is_valid());
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
#[rstest]
#[case::missing_semicolon("((A:1.0,B:2.0):3.0,C:4.0):0.5")]
#[case::missing_comma("((A:1.0 B:2.0):3.0,C:4.0):0.5;")]
#[case::unmatched_parentheses("((A:1.0,B:2.0:3.0,C:4.0):0.5;")]
#[case::invalid_branch_length("((A:1.0,B:abc):3.0,C:4.0):0.5;")]
#[case::negative_branch_length("((A:1.0,B:-2.0):3.0,C:4.0);")]
#[case::trailing_content("((A,B),C); D")]
#[case::empty_label("((A,),C);")]
#[case::empty("")]
fn test_corrupt_newick(#[case] newick: &str) {
    assert!(parse_newick(newick).is_err());
}

#[rstest]
#[case("A;")]
#[case("(A);")]
#[case("((A,B,C),D);")]
fn test_non_binary_tree(#[case] newick: &str) {
    let err = parse_newick(newick).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidTreeStructure(_)));
}

#[test]
fn test_duplicate_label() {
    let err = parse_newick("((A,B),A);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::DuplicateLabel("A".to_string()));
}

#[test]
fn test_unclosed_comment() {
    let err = parse_newick("((A,B)[never closed,C);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
}

// --- TESTS STRING UTILITIES ---
#[rstest]
#[case("((0,2)5,(1,3)4)6;", 4)]
#[case("(0,(1,(2,(3,(4,5)6)7)8)9)10;", 6)]
#[case("((A:0.1,B:0.2):0.3,C:0.4);", 3)]
#[case("(('x,y',B),C);", 3)]
fn test_find_num_leaves(#[case] newick: &str, #[case] expected: usize) {
    assert_eq!(find_num_leaves(newick), expected);
}

#[rstest]
#[case("((0:0.1,2:0.2)5:0.3,(1:0.4,3:0.5)4:0.6)6;", "((0,2)5,(1,3)4)6;")]
#[case("((0:1e-3,1:2E+2):0.5,2:1);", "((0,1),2);")]
#[case("((0,1)[&comment]2,3)4;", "((0,1)2,3)4;")]
fn test_remove_annotations(#[case] newick: &str, #[case] expected: &str) {
    assert_eq!(remove_annotations(newick), expected);
}

#[rstest]
#[case("((0,2)5,(1,3)4)6;", "((0,2),(1,3));")]
#[case("((0:0.1,2:0.2)5:0.3,1:0.4)6;", "((0:0.1,2:0.2):0.3,1:0.4);")]
#[case("((0,2),(1,3));", "((0,2),(1,3));")]
fn test_remove_parent_labels(#[case] newick: &str, #[case] expected: &str) {
    assert_eq!(remove_parent_labels(newick), expected);
}

#[rstest]
#[case("((0,2)5,(1,3)4)6;", true)]
#[case("((0,2),(1,3))6;", true)]
#[case("((0,2),(1,3));", false)]
#[case("((0:0.5,2:0.5):1.5,1:2);", false)]
#[case("((A,B)inner,C);", false)]
fn test_has_parents(#[case] newick: &str, #[case] expected: bool) {
    assert_eq!(has_parents(newick), expected);
}
