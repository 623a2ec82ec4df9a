use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqmine::spam::{strictly_contains, CoocMap, Prefix, VerticalDatabase};
use seqmine::{
    mine_closed, mine_frequent, mine_generators, mine_maximal, mine_top_k, MinerConfig, MiningResult, SequenceDatabase,
    Traversal,
};
use std::collections::BTreeMap;

type Key = Vec<Vec<u32>>;

const SEEDS: u64 = 40;

/// Small random database: 2..=7 sequences of 1..=4 itemsets over items 1..=4.
fn random_database(rng: &mut StdRng) -> SequenceDatabase {
    let num_sequences = rng.gen_range(2..=7);
    let sequences = (0..num_sequences)
        .map(|_| {
            let num_itemsets = rng.gen_range(1..=4);
            (0..num_itemsets)
                .map(|_| {
                    let size = rng.gen_range(1..=3);
                    (0..size).map(|_| rng.gen_range(1..=4u32)).collect()
                })
                .collect()
        })
        .collect();
    SequenceDatabase::new(sequences)
}

/// Greedy embedding of `pattern` into `sequence`, itemset by itemset.
fn occurs(sequence: &[Vec<u32>], pattern: &[Vec<u32>]) -> bool {
    let mut position = 0;
    for needle in pattern {
        loop {
            let Some(itemset) = sequence.get(position) else {
                return false;
            };
            position += 1;
            if needle.iter().all(|item| itemset.contains(item)) {
                break;
            }
        }
    }
    true
}

/// Whether `pattern` embeds into `sequence` with consecutive itemsets at
/// most `gap` positions apart. Tries every start, so no greedy shortcut.
fn occurs_within_gap(sequence: &[Vec<u32>], pattern: &[Vec<u32>], gap: usize) -> bool {
    fn matches(itemset: &[u32], needle: &[u32]) -> bool {
        needle.iter().all(|item| itemset.contains(item))
    }
    fn extend(sequence: &[Vec<u32>], rest: &[Vec<u32>], position: usize, gap: usize) -> bool {
        let Some((needle, tail)) = rest.split_first() else {
            return true;
        };
        let end = (position + gap).min(sequence.len() - 1);
        (position + 1..=end).any(|next| matches(&sequence[next], needle) && extend(sequence, tail, next, gap))
    }
    let Some((first, tail)) = pattern.split_first() else {
        return true;
    };
    (0..sequence.len()).any(|start| matches(&sequence[start], first) && extend(sequence, tail, start, gap))
}

fn naive_sequence_ids(db: &SequenceDatabase, pattern: &[Vec<u32>]) -> Vec<usize> {
    db.sequences()
        .iter()
        .enumerate()
        .filter(|(_, sequence)| occurs(sequence, pattern))
        .map(|(sid, _)| sid)
        .collect()
}

/// Every pattern with support of at least `min_support`, by exhaustive
/// enumeration of S- and I-extensions.
fn brute_force(db: &SequenceDatabase, min_support: usize) -> BTreeMap<Key, usize> {
    enumerate(db, min_support, |pattern| naive_sequence_ids(db, pattern).len())
}

/// Like [`brute_force`] with consecutive itemsets at most `gap` apart.
/// Dropping the last item keeps an embedding valid, so pruning extensions
/// of infrequent patterns stays exact.
fn brute_force_within_gap(db: &SequenceDatabase, min_support: usize, gap: usize) -> BTreeMap<Key, usize> {
    enumerate(db, min_support, |pattern| {
        db.sequences()
            .iter()
            .filter(|sequence| occurs_within_gap(sequence, pattern, gap))
            .count()
    })
}

fn enumerate(db: &SequenceDatabase, min_support: usize, support_of: impl Fn(&Key) -> usize) -> BTreeMap<Key, usize> {
    let mut items: Vec<u32> = db.sequences().iter().flatten().flatten().copied().collect();
    items.sort_unstable();
    items.dedup();

    let mut found = BTreeMap::new();
    let mut stack: Vec<Key> = items.iter().map(|&item| vec![vec![item]]).collect();
    while let Some(pattern) = stack.pop() {
        let support = support_of(&pattern);
        if support < min_support {
            continue;
        }
        for &item in &items {
            let mut s_child = pattern.clone();
            s_child.push(vec![item]);
            stack.push(s_child);

            let last = pattern.last().and_then(|itemset| itemset.last()).copied().unwrap_or(0);
            if item > last {
                let mut i_child = pattern.clone();
                if let Some(itemset) = i_child.last_mut() {
                    itemset.push(item);
                }
                stack.push(i_child);
            }
        }
        found.insert(pattern, support);
    }
    found
}

fn item_count(pattern: &Key) -> usize {
    pattern.iter().map(Vec::len).sum()
}

fn strictly_inside(inner: &Key, outer: &Key) -> bool {
    item_count(inner) < item_count(outer) && occurs(outer, inner)
}

fn as_map(result: &MiningResult) -> BTreeMap<Key, usize> {
    result
        .iter()
        .map(|pattern| (pattern.itemsets().to_vec(), pattern.support))
        .collect()
}

fn databases() -> impl Iterator<Item = (u64, SequenceDatabase)> {
    (0..SEEDS).map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (seed, random_database(&mut rng))
    })
}

#[test]
fn test_frequent_matches_brute_force() {
    for (seed, db) in databases() {
        for min_support in 1..=3 {
            let expected = brute_force(&db, min_support);
            let result = mine_frequent(&db, min_support, &MinerConfig::default()).unwrap();
            assert_eq!(result.len(), expected.len(), "seed {} minsup {}", seed, min_support);
            assert_eq!(as_map(&result), expected, "seed {} minsup {}", seed, min_support);
        }
    }
}

#[test]
fn test_max_gap_matches_brute_force() {
    for (seed, db) in databases() {
        for gap in [1, 2] {
            let config = MinerConfig::new().with_max_gap(gap);
            for min_support in 1..=3 {
                let expected = brute_force_within_gap(&db, min_support, gap);
                let result = mine_frequent(&db, min_support, &config).unwrap();
                assert_eq!(as_map(&result), expected, "seed {} gap {} minsup {}", seed, gap, min_support);
            }
        }
    }
}

#[test]
fn test_support_is_monotone_along_extensions() {
    for (seed, db) in databases() {
        let found = as_map(&mine_frequent(&db, 1usize, &MinerConfig::default()).unwrap());
        for (pattern, &support) in &found {
            let mut parent = pattern.clone();
            if let Some(itemset) = parent.last_mut() {
                itemset.pop();
            }
            if parent.last().map_or(false, Vec::is_empty) {
                parent.pop();
            }
            if parent.is_empty() {
                assert!(support <= db.len());
                continue;
            }
            let parent_support = found[&parent];
            assert!(parent_support >= support, "seed {}: {:?} above {:?}", seed, pattern, parent);
        }
    }
}

#[test]
fn test_cmap_never_underestimates_pair_support() {
    for (seed, db) in databases() {
        let vertical = VerticalDatabase::build(&db);
        let cmap = CoocMap::build(&db, &vertical, 1);
        let items: Vec<u32> = vertical.items().map(|(item, _)| item).collect();

        for &first in &items {
            for &second in &items {
                let after = naive_sequence_ids(&db, &[vec![first], vec![second]]).len();
                assert!(cmap.after_count(first, second) >= after, "seed {} after {} {}", seed, first, second);
                if first < second {
                    let equals = naive_sequence_ids(&db, &[vec![first, second]]).len();
                    assert!(cmap.equals_count(first, second) >= equals, "seed {} equals {} {}", seed, first, second);
                }
            }
        }
    }
}

#[test]
fn test_strict_containment_is_a_partial_order() {
    for (seed, db) in databases().take(10) {
        let patterns: Vec<Prefix> = mine_frequent(&db, 2usize, &MinerConfig::default())
            .unwrap()
            .patterns
            .into_iter()
            .map(|pattern| pattern.prefix)
            .collect();

        for a in &patterns {
            assert!(!strictly_contains(a, a), "seed {}", seed);
            for b in &patterns {
                if strictly_contains(a, b) {
                    assert!(!strictly_contains(b, a), "seed {}", seed);
                    for c in &patterns {
                        if strictly_contains(b, c) {
                            assert!(strictly_contains(a, c), "seed {}", seed);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_closed_matches_brute_force() {
    for (seed, db) in databases() {
        for min_support in 1..=3 {
            let frequent = brute_force(&db, min_support);
            let expected: BTreeMap<Key, usize> = frequent
                .iter()
                .filter(|(pattern, &support)| {
                    !frequent
                        .iter()
                        .any(|(other, &other_support)| other_support == support && strictly_inside(pattern, other))
                })
                .map(|(pattern, &support)| (pattern.clone(), support))
                .collect();

            let result = mine_closed(&db, min_support, &MinerConfig::default()).unwrap();
            assert_eq!(as_map(&result), expected, "seed {} minsup {}", seed, min_support);
        }
    }
}

#[test]
fn test_maximal_matches_brute_force() {
    for (seed, db) in databases() {
        for min_support in 1..=3 {
            let frequent = brute_force(&db, min_support);
            let expected: BTreeMap<Key, usize> = frequent
                .iter()
                .filter(|(pattern, _)| !frequent.keys().any(|other| strictly_inside(pattern, other)))
                .map(|(pattern, &support)| (pattern.clone(), support))
                .collect();

            let result = mine_maximal(&db, min_support, &MinerConfig::default()).unwrap();
            assert_eq!(as_map(&result), expected, "seed {} minsup {}", seed, min_support);
        }
    }
}

fn expected_generators(db: &SequenceDatabase, min_support: usize) -> BTreeMap<Key, usize> {
    let frequent = brute_force(db, min_support);
    let mut expected: BTreeMap<Key, usize> = frequent
        .iter()
        .filter(|(pattern, &support)| {
            support < db.len()
                && !frequent
                    .iter()
                    .any(|(other, &other_support)| other_support == support && strictly_inside(other, pattern))
        })
        .map(|(pattern, &support)| (pattern.clone(), support))
        .collect();
    if db.len() >= min_support {
        expected.insert(Vec::new(), db.len());
    }
    expected
}

#[test]
fn test_generators_match_brute_force() {
    for (seed, db) in databases() {
        for min_support in 1..=3 {
            let expected = expected_generators(&db, min_support);
            let result = mine_generators(&db, min_support, &MinerConfig::default()).unwrap();
            assert_eq!(as_map(&result), expected, "seed {} minsup {}", seed, min_support);
        }
    }
}

#[test]
fn test_backward_pruning_keeps_generators() {
    let config = MinerConfig::new().with_backward_pruning(true);
    for (seed, db) in databases() {
        for min_support in 1..=3 {
            let expected = expected_generators(&db, min_support);
            let result = mine_generators(&db, min_support, &config).unwrap();
            assert_eq!(as_map(&result), expected, "seed {} minsup {}", seed, min_support);
        }
    }
}

#[test]
fn test_top_k_matches_kth_support() {
    for (seed, db) in databases() {
        let all = brute_force(&db, 1);
        let mut supports: Vec<usize> = all.values().copied().collect();
        supports.sort_unstable_by(|a, b| b.cmp(a));

        for k in [1, 3, 5, 10] {
            let threshold = supports.get(k - 1).or(supports.last()).copied().unwrap_or(1);
            let expected: BTreeMap<Key, usize> = all
                .iter()
                .filter(|(_, &support)| support >= threshold)
                .map(|(pattern, &support)| (pattern.clone(), support))
                .collect();

            for traversal in [Traversal::BestFirst, Traversal::DepthFirst] {
                let config = MinerConfig::new().with_traversal(traversal);
                let result = mine_top_k(&db, k, &config).unwrap();
                assert_eq!(as_map(&result), expected, "seed {} k {} {:?}", seed, k, traversal);
                assert!(result
                    .patterns
                    .windows(2)
                    .all(|pair| pair[0].support >= pair[1].support));
            }
        }
    }
}

#[test]
fn test_max_length_truncates_frequent_patterns() {
    for (seed, db) in databases() {
        let expected: BTreeMap<Key, usize> = brute_force(&db, 1)
            .into_iter()
            .filter(|(pattern, _)| item_count(pattern) <= 2)
            .collect();
        let config = MinerConfig::new().with_max_pattern_length(2);
        let result = mine_frequent(&db, 1usize, &config).unwrap();
        assert_eq!(as_map(&result), expected, "seed {}", seed);
    }
}

#[test]
fn test_sequence_ids_match_occurrences() {
    let config = MinerConfig::new().with_sequence_ids(true);
    for (seed, db) in databases() {
        let result = mine_frequent(&db, 2usize, &config).unwrap();
        for pattern in result.iter() {
            let expected = naive_sequence_ids(&db, pattern.itemsets());
            assert_eq!(pattern.sequence_ids.as_deref(), Some(expected.as_slice()), "seed {}", seed);
            assert_eq!(pattern.support, expected.len());
        }
    }
}
