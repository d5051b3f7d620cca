use std::collections::HashMap;
use std::hash::Hash;

/// Count occurrences per key, most frequent first.
///
/// Ties keep the order in which keys were first seen, so the result is
/// deterministic for a given input order.
pub fn value_counts<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        match slots.get(&item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    // `sort_by` is stable: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `k` most frequent keys with their counts. `k == 0` yields nothing.
pub fn top_k<K, I>(items: I, k: usize) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut counts = value_counts(items);
    counts.truncate(k);
    counts
}

/// Just the keys of [`top_k`], in rank order.
pub fn top_k_keys<K, I>(items: I, k: usize) -> Vec<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    top_k(items, k).into_iter().map(|(key, _)| key).collect()
}
