use seqmine::{
    mine_closed, mine_frequent, mine_generators, mine_maximal, mine_top_k, MinerConfig, MiningResult, SequenceDatabase,
    Traversal,
};

/// S1={1,2},{3}  S2={1},{2,3}  S3={1,2,3}  S4={2},{3}
fn scenario() -> SequenceDatabase {
    SequenceDatabase::parse(
        "# canonical scenario\n\
         1 2 -1 3 -1 -2\n\
         1 -1 2 3 -1 -2\n\
         1 2 3 -1 -2\n\
         2 -1 3 -1 -2\n",
    )
    .unwrap()
}

fn lines(result: &MiningResult) -> Vec<String> {
    result.iter().map(|pattern| pattern.to_string()).collect()
}

const FREQUENT: [&str; 7] = [
    "1 -1 #SUP: 3",
    "2 -1 #SUP: 4",
    "3 -1 #SUP: 4",
    "1 -1 3 -1 #SUP: 2",
    "1 2 -1 #SUP: 2",
    "2 -1 3 -1 #SUP: 2",
    "2 3 -1 #SUP: 2",
];

#[test]
fn test_frequent_patterns() {
    let result = mine_frequent(&scenario(), 2usize, &MinerConfig::default()).unwrap();

    assert_eq!(lines(&result), FREQUENT);
    assert_eq!(result.min_support, 2);
    assert_eq!(result.sequence_count, 4);
}

#[test]
fn test_relative_support_matches_count() {
    let relative = mine_frequent(&scenario(), 0.5, &MinerConfig::default()).unwrap();
    assert_eq!(lines(&relative), FREQUENT);
}

#[test]
fn test_closed_patterns() {
    // no 3-item pattern reaches support 2, so every frequent pattern is closed
    let result = mine_closed(&scenario(), 2usize, &MinerConfig::default()).unwrap();
    assert_eq!(lines(&result), FREQUENT);
}

#[test]
fn test_closed_patterns_drop_equal_support_sub_patterns() {
    let db = SequenceDatabase::new(vec![
        vec![vec![1], vec![2]],
        vec![vec![1], vec![2]],
        vec![vec![3]],
    ]);
    let result = mine_closed(&db, 1usize, &MinerConfig::default()).unwrap();
    assert_eq!(lines(&result), ["3 -1 #SUP: 1", "1 -1 2 -1 #SUP: 2"]);
}

#[test]
fn test_maximal_patterns() {
    let result = mine_maximal(&scenario(), 2usize, &MinerConfig::default()).unwrap();
    assert_eq!(
        lines(&result),
        ["1 -1 3 -1 #SUP: 2", "1 2 -1 #SUP: 2", "2 -1 3 -1 #SUP: 2", "2 3 -1 #SUP: 2"]
    );
}

#[test]
fn test_generators() {
    let result = mine_generators(&scenario(), 2usize, &MinerConfig::default()).unwrap();
    assert_eq!(
        lines(&result),
        [
            "#SUP: 4",
            "1 -1 #SUP: 3",
            "1 -1 3 -1 #SUP: 2",
            "1 2 -1 #SUP: 2",
            "2 -1 3 -1 #SUP: 2",
            "2 3 -1 #SUP: 2",
        ]
    );
}

#[test]
fn test_generators_without_empty_pattern() {
    let config = MinerConfig::new().with_min_pattern_length(1);
    let result = mine_generators(&scenario(), 2usize, &config).unwrap();
    assert_eq!(result.len(), 5);
    assert!(result.iter().all(|pattern| !pattern.prefix.is_empty()));
}

#[test]
fn test_generators_with_backward_pruning() {
    let plain = mine_generators(&scenario(), 2usize, &MinerConfig::default()).unwrap();
    let pruned = mine_generators(&scenario(), 2usize, &MinerConfig::new().with_backward_pruning(true)).unwrap();
    assert_eq!(lines(&plain), lines(&pruned));
}

#[test]
fn test_top_k_stops_at_kth_support() {
    for traversal in [Traversal::BestFirst, Traversal::DepthFirst] {
        let config = MinerConfig::new().with_traversal(traversal);
        let result = mine_top_k(&scenario(), 3, &config).unwrap();

        assert_eq!(lines(&result), ["2 -1 #SUP: 4", "3 -1 #SUP: 4", "1 -1 #SUP: 3"], "{:?}", traversal);
        assert_eq!(result.min_support, 3);
    }
}

#[test]
fn test_top_k_keeps_ties() {
    for traversal in [Traversal::BestFirst, Traversal::DepthFirst] {
        let config = MinerConfig::new().with_traversal(traversal);
        let result = mine_top_k(&scenario(), 4, &config).unwrap();

        assert_eq!(result.len(), 7, "{:?}", traversal);
        assert_eq!(result.min_support, 2);
        assert_eq!(lines(&result)[..3], ["2 -1 #SUP: 4", "3 -1 #SUP: 4", "1 -1 #SUP: 3"]);
    }
}

#[test]
fn test_top_k_larger_than_pattern_count() {
    let result = mine_top_k(&scenario(), 100, &MinerConfig::default()).unwrap();
    // every pattern with support 1 is returned
    assert!(result.len() > 7);
    assert_eq!(result.min_support, 1);
}

#[test]
fn test_length_constraints() {
    let long_only = MinerConfig::new().with_min_pattern_length(2);
    let result = mine_frequent(&scenario(), 2usize, &long_only).unwrap();
    assert_eq!(lines(&result), FREQUENT[3..]);

    let short_only = MinerConfig::new().with_max_pattern_length(1);
    let result = mine_frequent(&scenario(), 2usize, &short_only).unwrap();
    assert_eq!(lines(&result), FREQUENT[..3]);
    assert_eq!(result.stats.max_depth, 1);
}

#[test]
fn test_maximal_within_length_bound() {
    let config = MinerConfig::new().with_max_pattern_length(1);
    let result = mine_maximal(&scenario(), 2usize, &config).unwrap();
    assert_eq!(lines(&result), FREQUENT[..3]);
}

#[test]
fn test_sequence_ids() {
    let config = MinerConfig::new().with_sequence_ids(true).with_min_pattern_length(2);
    let result = mine_frequent(&scenario(), 2usize, &config).unwrap();
    assert_eq!(
        lines(&result),
        [
            "1 -1 3 -1 #SUP: 2 #SID: 0 1",
            "1 2 -1 #SUP: 2 #SID: 0 2",
            "2 -1 3 -1 #SUP: 2 #SID: 0 3",
            "2 3 -1 #SUP: 2 #SID: 1 2",
        ]
    );
}

#[test]
fn test_empty_generator_sequence_ids() {
    let config = MinerConfig::new().with_sequence_ids(true);
    let result = mine_generators(&scenario(), 2usize, &config).unwrap();
    assert_eq!(lines(&result)[0], "#SUP: 4 #SID: 0 1 2 3");
}

#[test]
fn test_written_output_round_trips_through_display() {
    let result = mine_maximal(&scenario(), 2usize, &MinerConfig::default()).unwrap();
    let mut out = Vec::new();
    seqmine::spam::io::write_patterns(&mut out, &result.patterns).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().collect::<Vec<_>>(), lines(&result));
}
