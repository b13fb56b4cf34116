use std::hash::Hash;

use bevy::platform::collections::HashMap;

/// Two identifiers, stored in canonical order so that `UnorderedPair::new(a, b)` and
/// `UnorderedPair::new(b, a)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnorderedPair<K> {
    low: K,
    high: K,
}

impl<K: Ord> UnorderedPair<K> {
    pub fn new(a: K, b: K) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl<K: Copy> UnorderedPair<K> {
    /// The two identifiers, smaller first.
    pub fn keys(&self) -> (K, K) {
        (self.low, self.high)
    }

    pub fn is_self_pair(&self) -> bool
    where
        K: PartialEq,
    {
        self.low == self.high
    }
}

/// A symmetric pairwise store: maps unordered pairs of identifiers to rules.
///
/// Entries are never removed. Lookups take `&self` and never allocate, so once configuration is
/// done the registry can be shared between any number of reader threads. Writes require
/// `&mut self`, which means the borrow checker (or, inside Bevy, the scheduler's `ResMut`
/// access) already rules out a reader observing a half-written rule.
#[derive(Debug, Clone)]
pub struct RelationRegistry<K, R> {
    rules: HashMap<UnorderedPair<K>, R>,
}

impl<K, R> Default for RelationRegistry<K, R> {
    fn default() -> Self {
        Self {
            rules: Default::default(),
        }
    }
}

impl<K, R> RelationRegistry<K, R>
where
    K: Copy + Ord + Hash,
{
    /// Store `rule` for the pair, returning the rule it replaced (if any).
    pub fn set(&mut self, a: K, b: K, rule: R) -> Option<R> {
        self.rules.insert(UnorderedPair::new(a, b), rule)
    }

    pub fn get(&self, a: K, b: K) -> Option<&R> {
        self.rules.get(&UnorderedPair::new(a, b))
    }

    /// Like [`get`](Self::get), but falls back to `default` when the pair has no rule.
    pub fn get_or(&self, a: K, b: K, default: R) -> R
    where
        R: Copy,
    {
        self.get(a, b).copied().unwrap_or(default)
    }

    pub fn contains(&self, a: K, b: K) -> bool {
        self.rules.contains_key(&UnorderedPair::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl '_ + Iterator<Item = (UnorderedPair<K>, &R)> {
        self.rules.iter().map(|(pair, rule)| (*pair, rule))
    }
}
