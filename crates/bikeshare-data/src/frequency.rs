//! Value counting with a deterministic ranking.
//!
//! Values are counted in first-encounter order and ranked with a stable
//! descending sort on count, so equal counts keep the order in which the
//! values first appeared.

use std::collections::HashMap;
use std::hash::Hash;

/// A value together with how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

impl<T> ValueCount<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    /// Convert the value while keeping the count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValueCount<U> {
        ValueCount {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Occurrence counts keyed by value, remembering first-encounter order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Every value, most frequent first; ties keep first-encounter order.
    pub fn ranked(&self) -> Vec<ValueCount<K>> {
        let mut ranked: Vec<ValueCount<K>> = self
            .counts
            .iter()
            .map(|(k, n)| ValueCount::new(k.clone(), *n))
            .collect();
        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// The `n` most frequent values (fewer if fewer distinct values exist).
    pub fn top(&self, n: usize) -> Vec<ValueCount<K>> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// The single most frequent value, or `None` when nothing was counted.
    pub fn most_common(&self) -> Option<ValueCount<K>> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.counts {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(k, n)| ValueCount::new(k.clone(), *n))
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
