use std::{hash::Hash, rc::Rc};

use ahash::AHashMap;
use tracing::trace;

use crate::comparer::EqualityComparer;

use super::Query;

/// A key together with the elements that produced it, in source order.
#[derive(Debug)]
pub struct Grouping<K, T> {
    key: K,
    elements: Rc<[T]>,
}

impl<K: Clone, T> Clone for Grouping<K, T> {
    fn clone(&self) -> Self {
        Grouping { key: self.key.clone(), elements: self.elements.clone() }
    }
}

impl<K, T> Grouping<K, T> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub(super) fn shared_elements(&self) -> Rc<[T]> {
        self.elements.clone()
    }
}

impl<'a, K, T> IntoIterator for &'a Grouping<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Materialized grouping. Groups keep the order in which their keys first
/// appeared; asking for an absent key gives an empty slice.
#[derive(Debug)]
pub struct Lookup<K, T> {
    groups: Vec<Grouping<K, T>>,
    index: AHashMap<K, usize>,
}

impl<K: Hash + Eq + Clone, T> Lookup<K, T> {
    pub(super) fn build<I, F>(items: I, key: F) -> Self
    where
        I: Iterator<Item = T>,
        F: Fn(&T) -> K,
    {
        let mut index: AHashMap<K, usize> = AHashMap::new();
        let mut buckets: Vec<(K, Vec<T>)> = Vec::new();
        for item in items {
            let k = key(&item);
            match index.get(&k) {
                Some(&position) => buckets[position].1.push(item),
                None => {
                    index.insert(k.clone(), buckets.len());
                    buckets.push((k, vec![item]));
                }
            }
        }
        Lookup { groups: freeze(buckets), index }
    }

    pub fn get(&self, key: &K) -> &[T] {
        match self.index.get(key) {
            Some(&position) => self.groups[position].elements(),
            None => &[],
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub(super) fn shared(&self, key: &K) -> Option<Rc<[T]>> {
        self.index.get(key).map(|&position| self.groups[position].shared_elements())
    }
}

impl<K, T> Lookup<K, T> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grouping<K, T>> {
        self.groups.iter()
    }

    pub fn into_groups(self) -> Vec<Grouping<K, T>> {
        self.groups
    }
}

impl<'a, K, T> IntoIterator for &'a Lookup<K, T> {
    type Item = &'a Grouping<K, T>;
    type IntoIter = std::slice::Iter<'a, Grouping<K, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

fn freeze<K, T>(buckets: Vec<(K, Vec<T>)>) -> Vec<Grouping<K, T>> {
    buckets.into_iter()
        .map(|(key, elements)| Grouping { key, elements: Rc::from(elements) })
        .collect()
}

// Keys compared through a comparer cannot be hashed, so grouping falls back
// to a linear scan over the keys seen so far.
fn build_with<K, T, I, F, C>(items: I, key: F, comparer: &C) -> Vec<Grouping<K, T>>
where
    K: 'static,
    I: Iterator<Item = T>,
    F: Fn(&T) -> K,
    C: EqualityComparer<K>,
{
    let mut buckets: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match buckets.iter().position(|(existing, _)| comparer.equals(existing, &k)) {
            Some(position) => buckets[position].1.push(item),
            None => buckets.push((k, vec![item])),
        }
    }
    freeze(buckets)
}

impl<T: 'static> Query<T> {
    pub fn group_by<K, F>(&self, key: F) -> Query<Grouping<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        let key = Rc::new(key);
        Query::from_factory(move || Lookup::build(source.enumerate(), &*key).into_groups().into_iter())
    }

    pub fn group_by_with<K, F, C>(&self, key: F, comparer: C) -> Query<Grouping<K, T>>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: EqualityComparer<K> + 'static,
    {
        let source = self.clone();
        Query::from_factory(move || build_with(source.enumerate(), &key, &comparer).into_iter())
    }

    /// Groups the elements right away. The lookup can be read any number of
    /// times without running the query again.
    pub fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone,
        F: Fn(&T) -> K,
    {
        let lookup = Lookup::build(self.enumerate(), key);
        trace!(groups = lookup.len(), "materialized lookup");
        lookup
    }
}
