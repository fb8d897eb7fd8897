use crossmin::{CrossMinimizer, EdgelessPolicy, Error, SPLIT_ROUNDS};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn assert_permutation(order: &[usize], n: usize) {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..n).collect::<Vec<_>>(), "not a permutation: {order:?}");
}

#[test]
fn barycenter_sorts_by_mean_neighbor_column() {
    // means: 2.5, 0.0, 1.0
    let cm = CrossMinimizer::new(&[[0, 0, 1, 1], [1, 0, 0, 0], [1, 1, 1, 0]]).unwrap();
    assert_eq!(
        cm.solve_barycenter(EdgelessPolicy::Last).unwrap(),
        vec![1, 2, 0]
    );
}

#[test]
fn median_differs_from_barycenter_on_skewed_rows() {
    // row 0: columns {0, 1, 9} -> mean 3.33, median 1
    // row 1: columns {2, 3}    -> mean 2.5,  median 2.5
    let mut rows = vec![vec![0u8; 10]; 2];
    for j in [0, 1, 9] {
        rows[0][j] = 1;
    }
    for j in [2, 3] {
        rows[1][j] = 1;
    }
    let cm = CrossMinimizer::new(&rows).unwrap();
    assert_eq!(cm.solve_barycenter(EdgelessPolicy::Last).unwrap(), vec![1, 0]);
    assert_eq!(cm.solve_median(EdgelessPolicy::Last).unwrap(), vec![0, 1]);
}

#[test]
fn ties_keep_index_order() {
    let cm = CrossMinimizer::new(&[[0, 1, 0], [1, 0, 1], [0, 1, 0]]).unwrap();
    assert_eq!(
        cm.solve_barycenter(EdgelessPolicy::Last).unwrap(),
        vec![0, 1, 2]
    );
    assert_eq!(cm.solve_median(EdgelessPolicy::Last).unwrap(), vec![0, 1, 2]);
}

#[test]
fn edgeless_nodes_follow_the_policy() {
    let cm = CrossMinimizer::new(&[[0, 0, 0], [0, 1, 1], [0, 0, 0], [1, 0, 0]]).unwrap();
    assert_eq!(
        cm.solve_barycenter(EdgelessPolicy::Last).unwrap(),
        vec![3, 1, 0, 2]
    );
    assert_eq!(
        cm.solve_median(EdgelessPolicy::First).unwrap(),
        vec![0, 2, 3, 1]
    );
    assert_eq!(
        cm.solve_barycenter(EdgelessPolicy::Reject),
        Err(Error::DegenerateInput { node: 0 })
    );
}

#[test]
fn split_is_reproducible_for_a_fixed_seed() {
    let cm = CrossMinimizer::new(&[
        [1, 0, 1, 0, 0],
        [0, 1, 0, 0, 1],
        [1, 1, 0, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 0, 1, 1],
        [1, 0, 0, 0, 1],
    ])
    .unwrap();
    let a = cm.solve_split(&mut StdRng::seed_from_u64(42));
    let b = cm.solve_split(&mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
    assert_permutation(&a, 6);
}

#[test]
fn split_best_of_10_never_loses_to_its_first_round() {
    let cm = CrossMinimizer::new(&[
        [1, 0, 1, 0, 0, 1],
        [0, 1, 0, 0, 1, 0],
        [1, 1, 0, 0, 0, 1],
        [0, 0, 1, 1, 0, 0],
        [0, 1, 0, 1, 1, 0],
        [1, 0, 0, 0, 1, 1],
        [0, 1, 1, 0, 0, 0],
    ])
    .unwrap();
    for seed in 0..20 {
        let single = cm.solve_split(&mut StdRng::seed_from_u64(seed));
        let best = cm
            .solve_split_best_of(SPLIT_ROUNDS, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_permutation(&best, 7);
        assert!(cm.cross_count(&best).unwrap() <= cm.cross_count(&single).unwrap());
    }
}

#[test]
fn split_best_of_zero_rounds_is_rejected() {
    let cm = CrossMinimizer::new(&[[1, 0], [0, 1]]).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        cm.solve_split_best_of(0, &mut rng),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn split_follows_a_transitive_cost_relation_exactly() {
    let cm = CrossMinimizer::new(&[[0, 1, 1], [1, 0, 0], [0, 0, 1], [1, 1, 0]]).unwrap();
    let (optimal, best) = cm.brute_force().unwrap();
    for seed in 0..10 {
        let order = cm.solve_split(&mut StdRng::seed_from_u64(seed));
        assert_permutation(&order, 4);
        assert_eq!(cm.cross_count(&order).unwrap(), best, "optimal is {optimal:?}");
    }
}
