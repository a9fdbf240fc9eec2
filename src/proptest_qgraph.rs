use super::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn text_keys(min_keys: usize, max_keys: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z0-9 ]{0,12}".prop_map(String::from), min_keys..max_keys)
}

fn binary_keys(min_keys: usize, max_keys: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), min_keys..max_keys)
}

fn prefixed_keys(
    prefixes: Vec<&'static str>,
    min_keys: usize,
    max_keys: usize,
) -> impl Strategy<Value = Vec<String>> {
    let prefixes_strategy = proptest::sample::select(prefixes);
    proptest::collection::vec(
        prefixes_strategy
            .prop_flat_map(|prefix| "[a-z]{0,6}".prop_map(move |s| format!("{}{}", prefix, s))),
        min_keys..max_keys,
    )
}

/// Every non-empty bit prefix of every key: exactly the non-root nodes a
/// binary trie must hold.
fn bit_prefixes<K: AsBytes>(keys: &[K]) -> BTreeSet<String> {
    let mut prefixes = BTreeSet::new();
    for key in keys {
        let bits = BitKey::from_key(key);
        for end in 1..=bits.len() {
            prefixes.insert(bits.as_str()[..end].to_string());
        }
    }
    prefixes
}

fn byte_prefixes(keys: &[Vec<u8>]) -> BTreeSet<Vec<u8>> {
    let mut prefixes = BTreeSet::new();
    for key in keys {
        for end in 1..=key.len() {
            prefixes.insert(key[..end].to_vec());
        }
    }
    prefixes
}

#[test]
fn test_empty_graph_behavior() {
    let mut graph = QGraph::new();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.query_count(), 0);
    assert!(!graph.contains(""));
    assert!(!graph.contains("anything"));
    assert_eq!(graph.hits(), 0);
    assert_eq!(graph.misses(), 2);
    assert_eq!(graph.seeks(), 2);
    assert_eq!(graph.levels(), vec![vec![graph.root()]]);
}

#[test]
fn test_all_single_bytes() {
    let mut graph = QGraph::new();
    for byte in 0..=255u8 {
        graph.insert([byte]);
    }

    // b'0' and b'1' are bit-strings, so they become one-bit paths and the
    // complete depth-eight tree of 511 nodes loses their two leaves and
    // the parent those leaves would share.
    assert_eq!(graph.node_count(), 508);
    for byte in 0..=255u8 {
        assert!(graph.contains([byte]));
    }
    assert_eq!(graph.hits(), 256);

    let root = graph.node(graph.root()).unwrap();
    let (left, right) = (root.left(), root.right());
    assert_eq!(graph.lookup([b'0']), left);
    assert_eq!(graph.lookup([b'1']), right);
    assert_eq!(graph.lookup("0011000"), None);
}

proptest! {
    #[test]
    fn encoding_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let first = BitKey::encode(&bytes);
        let second = BitKey::encode(&bytes);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.raw_len(), bytes.len());
        if !is_bit_string(&bytes) {
            prop_assert_eq!(first.len(), bytes.len() * 8);
        }
    }

    #[test]
    fn inserted_keys_are_found(keys in text_keys(1, 50)) {
        let mut graph = QGraph::new();
        for key in &keys {
            graph.insert(key);
        }

        for key in keys.iter().filter(|k| !k.is_empty()) {
            prop_assert!(graph.contains(key));
        }
        prop_assert_eq!(graph.query_count(), keys.len() as u64);
    }

    #[test]
    fn node_count_matches_shared_prefixes(keys in binary_keys(1, 40)) {
        let mut graph = QGraph::new();
        for key in &keys {
            graph.insert(key);
        }

        let prefixes = bit_prefixes(&keys);
        prop_assert_eq!(graph.node_count(), 1 + prefixes.len() as u64);
        prop_assert_eq!(graph.queries_size_actual_bytes(), prefixes.len() as u64);
        prop_assert_eq!(
            graph.queries_size_raw_bytes(),
            keys.iter().map(|k| k.len() as u64).sum::<u64>()
        );
    }

    #[test]
    fn membership_matches_prefix_model(
        inserted in text_keys(0, 30),
        probes in text_keys(1, 30),
    ) {
        let mut graph = QGraph::new();
        graph.extend(&inserted);
        let model = bit_prefixes(&inserted);

        for probe in &probes {
            let bits = BitKey::from_key(probe);
            let expected = !bits.is_empty() && model.contains(bits.as_str());
            prop_assert_eq!(graph.contains(probe), expected);
            prop_assert_eq!(graph.lookup(probe).is_some(), expected);
        }
        prop_assert_eq!(graph.hits() + graph.misses(), graph.seeks());
        prop_assert_eq!(graph.seeks(), probes.len() as u64);
    }

    #[test]
    fn repeated_inserts_add_no_nodes(keys in prefixed_keys(vec!["user:", "item:", "q"], 1, 30)) {
        let mut graph = QGraph::new();
        graph.extend(&keys);
        let nodes = graph.node_count();

        graph.extend(&keys);

        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert_eq!(graph.query_count(), 2 * keys.len() as u64);
    }

    #[test]
    fn shared_prefixes_never_exceed_separate_paths(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let mut graph = QGraph::new();
        graph.insert(&a);
        graph.insert(&b);

        let separate = 1 + 8 * (a.len() + b.len()) as u64;
        prop_assert!(graph.node_count() <= separate);
    }

    #[test]
    fn counters_never_decrease(keys in text_keys(1, 20), probes in text_keys(1, 20)) {
        let mut graph = QGraph::new();
        let mut previous = *graph.stats();

        for (key, probe) in keys.iter().zip(probes.iter()) {
            graph.insert(key);
            graph.contains(probe);
            let current = *graph.stats();

            prop_assert!(current.node_count >= previous.node_count);
            prop_assert!(current.query_count > previous.query_count);
            prop_assert!(current.seeks > previous.seeks);
            prop_assert!(current.hits >= previous.hits);
            prop_assert!(current.misses >= previous.misses);
            prop_assert!(current.queries_size_raw_bytes >= previous.queries_size_raw_bytes);
            prop_assert!(current.queries_size_actual_bytes >= previous.queries_size_actual_bytes);
            previous = current;
        }
    }

    #[test]
    fn operations_leave_no_cursor_state(keys in text_keys(1, 20), probes in text_keys(1, 20)) {
        let mut used = QGraph::new();
        used.extend(&keys);
        for probe in &probes {
            used.contains(probe);
            used.lookup(probe);
        }
        let mut fresh = QGraph::new();

        prop_assert_eq!(used.contains(""), fresh.contains(""));
        for key in &keys {
            prop_assert_eq!(used.contains(key), !key.is_empty());
        }
    }

    #[test]
    fn byte_trie_matches_prefix_model(keys in binary_keys(1, 40), probes in binary_keys(1, 20)) {
        let mut trie = ByteTrie::with_max_children(MAX_FANOUT).unwrap();
        trie.extend(&keys);
        let model = byte_prefixes(&keys);

        prop_assert_eq!(trie.node_count(), 1 + model.len() as u64);
        prop_assert_eq!(trie.stats().truncated_inserts, 0);
        for probe in &probes {
            let expected = !probe.is_empty() && model.contains(probe);
            prop_assert_eq!(trie.contains(probe), expected);
        }
    }

    #[test]
    fn byte_trie_fanout_stays_under_cap(keys in binary_keys(1, 60), cap in 1usize..8) {
        let mut trie = ByteTrie::with_max_children(cap).unwrap();
        trie.extend(&keys);

        for level in trie.levels() {
            for id in level {
                prop_assert!(trie.node(id).unwrap().degree() <= cap);
            }
        }
        prop_assert_eq!(trie.query_count(), keys.len() as u64);
    }
}
