/*
    Deferred query engine. A Query is a recipe, not a result: it holds a factory
    that builds a fresh pull-based iterator pipeline every time the query is
    enumerated. Lazy operators wrap the factory of their input, terminal
    operators enumerate once and return a value.

    Sources are captured by reference (see Sequence), so a pipeline built before
    a source is mutated observes the mutation when it runs. Only to_list and
    to_lookup take a snapshot.
 */

use std::{cell::RefCell, hash::Hash, rc::Rc};

use ahash::AHashSet;
use tracing::trace;

use crate::{comparer::EqualityComparer, resettable_iterator::ResettableIterator};

mod aggregate;
mod element;
mod grouping;
mod join;
mod ordering;
mod quantifier;

pub use aggregate::Numeric;
pub use grouping::{Grouping, Lookup};
pub use ordering::{OrderedQuery, SortDirection};

type Factory<T> = Rc<dyn Fn() -> Box<dyn Iterator<Item = T>>>; // Only single threaded execution for now

pub struct Query<T> {
    factory: Factory<T>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Query { factory: self.factory.clone() }
    }
}

impl<T: 'static> Query<T> {
    /// Builds a query whose every enumeration calls `factory` for a new
    /// iterator. The iterator may be infinite.
    pub fn from_factory<I, F>(factory: F) -> Self
    where
        I: Iterator<Item = T> + 'static,
        F: Fn() -> I + 'static,
    {
        Query {
            factory: Rc::new(move || Box::new(factory()) as Box<dyn Iterator<Item = T>>),
        }
    }

    pub fn empty() -> Self {
        Query::from_factory(std::iter::empty)
    }

    /// A query over a single-use source. The first enumeration drains it,
    /// later ones see an empty sequence.
    pub fn once<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let source = Rc::new(RefCell::new(Some(source.into_iter())));
        Query::from_factory(move || source.borrow_mut().take().into_iter().flatten())
    }

    pub fn enumerate(&self) -> Enumerator<T> {
        Enumerator {
            factory: self.factory.clone(),
            current: (self.factory)(),
        }
    }

    pub fn filter<P>(&self, predicate: P) -> Query<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Query::from_factory(move || {
            let predicate = predicate.clone();
            source.enumerate().filter(move |item| predicate(item))
        })
    }

    pub fn map<U, F>(&self, projector: F) -> Query<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let source = self.clone();
        let projector = Rc::new(projector);
        Query::from_factory(move || {
            let projector = projector.clone();
            source.enumerate().map(move |item| projector(item))
        })
    }

    pub fn count(&self) -> usize {
        self.enumerate().count()
    }

    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.enumerate().filter(|item| predicate(item)).count()
    }

    /// Runs the query now and keeps the results. Later changes to the
    /// sources do not show up in the returned list.
    pub fn to_list(&self) -> Vec<T> {
        let items: Vec<T> = self.enumerate().collect();
        trace!(elements = items.len(), "materialized query");
        items
    }
}

impl<T: Clone + 'static> Query<T> {
    /// A query over an owned snapshot of `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        let items = Rc::new(items);
        Query::from_factory(move || {
            let items = items.clone();
            (0..items.len()).map(move |i| items[i].clone())
        })
    }

    pub fn distinct(&self) -> Query<T>
    where
        T: Hash + Eq,
    {
        let source = self.clone();
        Query::from_factory(move || {
            let mut seen = AHashSet::new();
            source.enumerate().filter(move |item| seen.insert(item.clone()))
        })
    }

    pub fn distinct_with<C>(&self, comparer: C) -> Query<T>
    where
        C: EqualityComparer<T> + 'static,
    {
        let source = self.clone();
        let comparer = Rc::new(comparer);
        Query::from_factory(move || {
            let comparer = comparer.clone();
            let mut seen: Vec<T> = Vec::new();
            source.enumerate().filter(move |item| {
                if seen.iter().any(|s| comparer.equals(s, item)) {
                    false
                } else {
                    seen.push(item.clone());
                    true
                }
            })
        })
    }
}

impl<T: 'static> From<Vec<T>> for Query<T>
where
    T: Clone,
{
    fn from(items: Vec<T>) -> Self {
        Query::from_vec(items)
    }
}

/// One enumeration of a query. Resetting rebuilds the pipeline, so the
/// closures of the query run again.
pub struct Enumerator<T> {
    factory: Factory<T>,
    current: Box<dyn Iterator<Item = T>>,
}

impl<T> Iterator for Enumerator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.next()
    }
}

impl<T> ResettableIterator for Enumerator<T> {
    fn reset(&mut self) {
        self.current = (self.factory)();
    }
}

impl<'a, T: 'static> IntoIterator for &'a Query<T> {
    type Item = T;
    type IntoIter = Enumerator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerate()
    }
}
