use phylo2vec::model::label_mapping::LabelMapping;
use phylo2vec::newick::{apply_label_mapping, create_label_mapping};
use phylo2vec::vector::{to_newick, to_vector};
use phylo2vec::Phylo2VecError;
use rstest::rstest;
use std::collections::HashMap;

// --- TESTS CREATE LABEL MAPPING ---
#[test]
fn test_create_label_mapping() {
    let (newick_int, mapping) = create_label_mapping("((A,B),(D,E));").unwrap();
    assert_eq!(newick_int, "((0,1),(2,3));");

    let expected: Vec<(usize, &str)> = vec![(0, "A"), (1, "B"), (2, "D"), (3, "E")];
    assert_eq!(mapping.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_create_label_mapping_keeps_annotations() {
    let newick = "((Apteryx_haastii:0.2,'Apteryx owenii':0.3)inner:0.1[&support=1],Apteryx_mantelli:0.4);";
    let (newick_int, mapping) = create_label_mapping(newick).unwrap();
    assert_eq!(newick_int, "((0:0.2,1:0.3)inner:0.1[&support=1],2:0.4);");
    assert_eq!(mapping.get_label(1), Some("Apteryx owenii"));
    assert_eq!(mapping.get_index("Apteryx_mantelli"), Some(2));
}

#[rstest]
#[case("(0,1);")]
#[case("((2,0),(1,3));")]
fn test_create_label_mapping_already_integer(#[case] newick: &str) {
    assert!(matches!(
        create_label_mapping(newick),
        Err(Phylo2VecError::InvalidValue(_))
    ));
}

#[test]
fn test_create_label_mapping_non_canonical_integers() {
    let (newick_int, mapping) = create_label_mapping("((7,3),1);").unwrap();
    assert_eq!(newick_int, "((0,1),2);");
    assert_eq!(mapping.get_label(0), Some("7"));
}

#[test]
fn test_create_label_mapping_duplicate() {
    assert!(matches!(
        create_label_mapping("((A,B),A);"),
        Err(Phylo2VecError::InvalidValue(_))
    ));
}

#[test]
fn test_create_label_mapping_parse_error() {
    assert!(matches!(
        create_label_mapping("((A,B),C"),
        Err(Phylo2VecError::Parse(_))
    ));
}

// --- TESTS APPLY LABEL MAPPING ---
#[rstest]
#[case("((A,B),(D,E));")]
#[case("(Homo_sapiens:0.1,(Pan_troglodytes:0.2,Gorilla_gorilla:0.3):0.05);")]
#[case("(('Baillon''s Crake',Pukeko)5,Takahe)6;")]
#[case("( (x , y) , [note] z ) ;")]
fn test_label_round_trip(#[case] newick: &str) {
    let (newick_int, mapping) = create_label_mapping(newick).unwrap();
    assert_eq!(apply_label_mapping(&newick_int, &mapping).unwrap(), newick);
}

#[test]
fn test_apply_label_mapping_after_encoding() {
    let (newick_int, mapping) = create_label_mapping("((Kea,Kaka),(Kakapo,Kereru));").unwrap();
    let v = to_vector(&newick_int).unwrap();
    let relabelled = apply_label_mapping(&to_newick(&v), &mapping).unwrap();
    assert_eq!(relabelled, "((Kea,Kaka)5,(Kakapo,Kereru)4)6;");
}

#[rstest]
#[case("((0,1),5);")]
#[case("((0,1),x);")]
fn test_apply_label_mapping_missing(#[case] newick_int: &str) {
    let (_, mapping) = create_label_mapping("((A,B),C);").unwrap();
    assert!(matches!(
        apply_label_mapping(newick_int, &mapping),
        Err(Phylo2VecError::MissingLabel(_))
    ));
}

// --- TESTS LABEL MAPPING EXCHANGE FORMAT ---
#[test]
fn test_string_map_round_trip() {
    let (_, mapping) = create_label_mapping("((Tui,Bellbird),Saddleback);").unwrap();
    let map = mapping.to_string_map();
    assert_eq!(map["Saddleback"], "2");

    let restored = LabelMapping::from_string_map(&map).unwrap();
    assert_eq!(restored.labels(), mapping.labels());
}

#[rstest]
#[case(&[("A", "0"), ("B", "two")])]
#[case(&[("A", "0"), ("B", "0")])]
#[case(&[("A", "0"), ("B", "2")])]
fn test_from_string_map_invalid(#[case] entries: &[(&str, &str)]) {
    let map: HashMap<String, String> = entries
        .iter()
        .map(|(label, index)| (label.to_string(), index.to_string()))
        .collect();
    assert!(matches!(
        LabelMapping::from_string_map(&map),
        Err(Phylo2VecError::InvalidValue(_))
    ));
}
