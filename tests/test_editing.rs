use phylo2vec::Phylo2VecError;
use phylo2vec::vector::{
    add_leaf, check_v, get_common_ancestor, remove_leaf, reorder_v, reroot, reroot_at_random,
    sample_vector, seed_everything, to_newick,
};
use rstest::rstest;

// --- TESTS ADD / REMOVE LEAF ---
#[rstest]
#[case(vec![0, 1, 2, 5, 4, 2], 3, "(0,((1,((2,6)9,(3,7)8)11)12,(4,5)10)13)14;")]
#[case(vec![0, 0, 1], 6, "(((0,2)6,(1,3)5)7,4)8;")]
#[case(vec![0, 0, 1], 0, "(((0,4)5,2)7,(1,3)6)8;")]
fn test_add_leaf(#[case] v: Vec<usize>, #[case] attach_index: usize, #[case] expected: &str) {
    let new_v = add_leaf(&v, attach_index).unwrap();
    assert_eq!(new_v.len(), v.len() + 1);
    assert_eq!(new_v[v.len()], attach_index);
    assert_eq!(to_newick(&new_v), expected);
}

#[test]
fn test_add_leaf_out_of_bounds() {
    assert!(add_leaf(&[0, 0, 1], 6).is_ok());
    assert!(matches!(
        add_leaf(&[0, 0, 1], 7),
        Err(Phylo2VecError::IndexOutOfBounds { index: 7, bound: 7 })
    ));
}

#[rstest]
#[case(vec![0, 0, 0, 1, 3], 5, vec![0, 0, 0, 1])]
#[case(vec![0, 1, 2, 3], 4, vec![0, 1, 2])]
#[case(vec![0, 0, 1], 3, vec![0, 0])]
#[case(vec![0, 0, 0, 1, 3], 2, vec![0, 0, 1, 2])]
#[case(vec![0, 1, 2, 5, 4, 2], 3, vec![0, 1, 3, 3, 2])]
#[case(vec![0, 0, 1], 0, vec![0, 0])]
fn test_remove_leaf(#[case] v: Vec<usize>, #[case] leaf: usize, #[case] expected: Vec<usize>) {
    assert_eq!(remove_leaf(&v, leaf).unwrap(), expected);
}

#[test]
fn test_remove_leaf_errors() {
    assert!(matches!(remove_leaf(&[0], 1), Err(Phylo2VecError::InvalidVector(_))));
    assert!(matches!(
        remove_leaf(&[0, 1], 3),
        Err(Phylo2VecError::IndexOutOfBounds { index: 3, bound: 3 })
    ));
    assert!(matches!(remove_leaf(&[0, 3], 0), Err(Phylo2VecError::InvalidVector(_))));
}

#[test]
fn test_add_then_remove_is_identity() {
    let mut rng = seed_everything(11);
    for num_leaves in 2..40 {
        let v = sample_vector(num_leaves, &mut rng).unwrap();
        for attach_index in 0..=2 * v.len() {
            let extended = add_leaf(&v, attach_index).unwrap();
            assert_eq!(remove_leaf(&extended, num_leaves).unwrap(), v);
        }
    }
}

// --- TESTS COMMON ANCESTOR ---
#[rstest]
#[case(vec![0, 0, 1], 0, 2, 5)]
#[case(vec![0, 0, 1], 1, 2, 6)]
#[case(vec![0, 0, 0, 1, 3], 3, 5, 6)]
#[case(vec![0, 0, 0, 1, 3], 0, 5, 8)]
#[case(vec![0, 0, 0, 1, 3], 2, 4, 10)]
#[case(vec![0, 1, 2, 3, 4], 2, 4, 8)]
#[case(vec![0, 0, 0, 1, 3], 4, 4, 4)]
fn test_get_common_ancestor(
    #[case] v: Vec<usize>,
    #[case] i: usize,
    #[case] j: usize,
    #[case] expected: usize,
) {
    assert_eq!(get_common_ancestor(&v, i, j).unwrap(), expected);
}

#[test]
fn test_get_common_ancestor_symmetric() {
    let mut rng = seed_everything(5);
    let v = sample_vector(25, &mut rng).unwrap();
    for i in 0..25 {
        for j in 0..25 {
            assert_eq!(
                get_common_ancestor(&v, i, j).unwrap(),
                get_common_ancestor(&v, j, i).unwrap()
            );
        }
    }
}

#[test]
fn test_get_common_ancestor_out_of_bounds() {
    assert!(matches!(
        get_common_ancestor(&[0, 0, 1], 0, 4),
        Err(Phylo2VecError::IndexOutOfBounds { index: 4, bound: 4 })
    ));
}

// --- TESTS REORDER ---
#[rstest]
#[case(vec![0, 0, 1], vec![3, 2, 1, 0], vec![0, 0, 1])]
#[case(vec![0, 1, 2, 3, 4], vec![5, 4, 3, 2, 1, 0], vec![0, 2, 4, 6, 8])]
#[case(vec![0, 0, 0, 1, 3], vec![1, 0, 2, 3, 4, 5], vec![0, 1, 1, 0, 3])]
#[case(vec![0, 1, 2, 5, 4, 2], vec![0, 1, 2, 3, 4, 5, 6], vec![0, 1, 2, 5, 4, 2])]
fn test_reorder_v(#[case] v: Vec<usize>, #[case] permutation: Vec<usize>, #[case] expected: Vec<usize>) {
    assert_eq!(reorder_v(&v, &permutation).unwrap(), expected);
}

#[rstest]
#[case(vec![0, 1, 2])]
#[case(vec![0, 1, 1, 2])]
#[case(vec![0, 1, 2, 4])]
fn test_reorder_v_not_a_permutation(#[case] permutation: Vec<usize>) {
    assert!(matches!(
        reorder_v(&[0, 0, 1], &permutation),
        Err(Phylo2VecError::InvalidValue(_))
    ));
}

// --- TESTS REROOT ---
#[rstest]
#[case(vec![0, 0, 1], 0, vec![0, 1, 1])]
#[case(vec![0, 0, 1], 5, vec![0, 0, 1])]
#[case(vec![0, 1, 2, 3, 4], 0, vec![0, 1, 2, 3, 4])]
#[case(vec![0, 1, 2, 3, 4], 5, vec![0, 2, 4, 6, 8])]
#[case(vec![0, 0, 0, 1, 3], 3, vec![0, 1, 4, 1, 7])]
#[case(vec![0, 0, 0, 1, 3], 8, vec![0, 1, 0, 1, 3])]
#[case(vec![0, 1, 2, 5, 4, 2], 10, vec![0, 1, 2, 0, 4, 2])]
fn test_reroot(#[case] v: Vec<usize>, #[case] node: usize, #[case] expected: Vec<usize>) {
    assert_eq!(reroot(&v, node).unwrap(), expected);
}

#[test]
fn test_reroot_root_out_of_bounds() {
    assert!(matches!(
        reroot(&[0, 0, 1], 6),
        Err(Phylo2VecError::IndexOutOfBounds { index: 6, bound: 6 })
    ));
}

#[test]
fn test_reroot_at_random_deterministic() {
    let v = sample_vector(30, &mut seed_everything(0)).unwrap();
    let rerooted_1 = reroot_at_random(&v, &mut seed_everything(9)).unwrap();
    let rerooted_2 = reroot_at_random(&v, &mut seed_everything(9)).unwrap();
    assert_eq!(rerooted_1, rerooted_2);
    assert!(check_v(&rerooted_1).is_ok());
}

// --- TESTS INVALID INPUT ---
#[test]
fn test_invalid_vector_rejected() {
    let invalid = [0, 1, 5];
    assert!(matches!(add_leaf(&invalid, 0), Err(Phylo2VecError::InvalidVector(_))));
    assert!(matches!(get_common_ancestor(&invalid, 0, 1), Err(Phylo2VecError::InvalidVector(_))));
    assert!(matches!(reorder_v(&invalid, &[0, 1, 2, 3]), Err(Phylo2VecError::InvalidVector(_))));
    assert!(matches!(reroot(&invalid, 0), Err(Phylo2VecError::InvalidVector(_))));
    assert!(matches!(add_leaf(&[], 0), Err(Phylo2VecError::InvalidVector(_))));
}
