//! Frequency counting with a deterministic tie-break.
//!
//! "Most frequent" means the highest count; among equal counts the value that was observed
//! first wins. [`FrequencyTable::ranked`] orders by descending count with the same rule.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// A value together with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counted<T> {
    pub value: T,
    pub count: usize,
}

/// Occurrence counts per key, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`.
    pub fn observe(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most frequent key, first-seen on ties. `None` when nothing was observed.
    pub fn mode(&self) -> Option<Counted<&K>> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.entries {
            // Strictly greater: an equal count never displaces an earlier key.
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, count)| Counted {
            value,
            count: *count,
        })
    }

    /// All keys by descending count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<Counted<&K>> {
        let mut out: Vec<Counted<&K>> = self
            .entries
            .iter()
            .map(|(value, count)| Counted {
                value,
                count: *count,
            })
            .collect();
        // `sort_by` is stable.
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.observe(key);
        }
        table
    }
}

/// Mode of `values`, first-seen on ties, cloned out of the table.
pub fn mode_of<K, I>(values: I) -> Option<Counted<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let table: FrequencyTable<K> = values.into_iter().collect();
    table.mode().map(|m| Counted {
        value: m.value.clone(),
        count: m.count,
    })
}
