use log::trace;

/// Virtual replicas contributed by each node.
const VIRTUAL_REPLICAS: usize = 64;

/// Consistent-hash ring of node identifiers.
///
/// Each node contributes [`VIRTUAL_REPLICAS`] entries keyed by
/// `crc32("<node-id>:<i>")`, kept sorted by hash. Lookup returns the node of
/// the smallest entry whose hash is >= the key's hash, wrapping around to
/// the first entry. Two rings built from the same ordered node set route
/// every key identically.
#[derive(Debug, Clone, Default)]
pub struct HashRing {
    entries: Vec<(u32, String)>,
}

impl HashRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes<N: AsRef<str>>(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut ring = Self::new();
        for node in nodes {
            ring.add_node(node.as_ref());
        }
        ring
    }

    /// Inserts the virtual replicas of `node`. Existing entries keep their
    /// hashes; the new ones are merged into sort order.
    pub fn add_node(&mut self, node: &str) {
        for i in 0..VIRTUAL_REPLICAS {
            let hash = crc32fast::hash(format!("{node}:{i}").as_bytes());
            self.entries.push((hash, node.to_owned()));
        }
        self.entries
            .sort_unstable_by(|(h1, n1), (h2, n2)| h1.cmp(h2).then_with(|| n1.cmp(n2)));
    }

    /// Erases the entries contributed by `node`.
    pub fn remove_node(&mut self, node: &str) {
        self.entries.retain(|(_, n)| n != node);
    }

    /// The node responsible for `key`.
    pub fn get(&self, key: &[u8]) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let hash = crc32fast::hash(key);
        let index = self.entries.partition_point(|(h, _)| *h < hash);
        let index = if index == self.entries.len() { 0 } else { index };
        let node = &self.entries[index].1;
        trace!("key {:?} (crc32 {hash}) -> {node}", String::from_utf8_lossy(key));
        Some(node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, distr::Alphanumeric};
    use std::collections::HashMap;

    #[test]
    fn routing_is_deterministic() {
        let ring1 = HashRing::with_nodes(["a:6379", "b:6379", "c:6379"]);
        let ring2 = HashRing::with_nodes(["a:6379", "b:6379", "c:6379"]);

        for key in [&b"foo"[..], b"bar", b"baz", b"", b"\x00\xff"] {
            assert_eq!(ring1.get(key), ring2.get(key));
        }
    }

    #[test]
    fn every_key_maps_to_some_node() {
        let ring = HashRing::with_nodes(["a", "b"]);
        assert_eq!(2 * 64, ring.len());
        assert!(ring.get(b"anything").is_some());
        assert!(HashRing::new().get(b"anything").is_none());
    }

    #[test]
    fn removing_a_node_only_reassigns_its_keys() {
        let full = HashRing::with_nodes(["a:6379", "b:6379", "c:6379"]);
        let mut reduced = full.clone();
        reduced.remove_node("b:6379");
        assert_eq!(2 * 64, reduced.len());

        for i in 0..1000 {
            let key = format!("key{i}");
            let before = full.get(key.as_bytes()).unwrap();
            let after = reduced.get(key.as_bytes()).unwrap();
            if before == "b:6379" {
                assert_ne!("b:6379", after);
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn balance_over_random_keys() {
        let nodes: Vec<String> = (0..10).map(|i| format!("node{i}:6379")).collect();
        let ring = HashRing::with_nodes(&nodes);

        let mut rng = rand::rng();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..10_000 {
            let key: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(12)
                .map(char::from)
                .collect();
            let node = ring.get(key.as_bytes()).unwrap();
            *counts.entry(node.to_owned()).or_default() += 1;
        }

        let mean = 10_000 / 10;
        for (node, count) in counts {
            assert!(count <= 3 * mean, "{node} received {count} of 10000 keys");
        }
    }
}
