/*
    Equi-joins. The inner side is hashed into a Lookup when the join is
    enumerated, then the outer side is streamed through it, so output order is
    outer-major with the inner matches in their source order. Joins with a
    caller-supplied comparer cannot hash their keys and probe the inner rows
    with a nested loop instead.
 */

use std::{hash::Hash, rc::Rc};

use crate::comparer::EqualityComparer;

use super::{grouping::Lookup, Query};

impl<T: 'static> Query<T> {
    /// Pairs every outer element with every inner element whose key is
    /// equal. Elements without a partner are dropped.
    pub fn inner_join<U, K, R, OK, IK, C>(&self, inner: &Query<U>, outer_key: OK, inner_key: IK, combiner: C) -> Query<R>
    where
        U: 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        C: Fn(&T, &U) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let combiner = Rc::new(combiner);
        Query::from_factory(move || {
            let lookup = Lookup::build(inner.enumerate(), &*inner_key);
            let outer_key = outer_key.clone();
            let combiner = combiner.clone();
            outer.enumerate().flat_map(move |o| {
                let matches: Rc<[U]> = lookup.shared(&outer_key(&o)).unwrap_or_else(|| Rc::from(Vec::new()));
                let combiner = combiner.clone();
                (0..matches.len()).map(move |i| combiner(&o, &matches[i]))
            })
        })
    }

    pub fn inner_join_with<U, K, R, OK, IK, E, C>(
        &self,
        inner: &Query<U>,
        outer_key: OK,
        inner_key: IK,
        comparer: E,
        combiner: C,
    ) -> Query<R>
    where
        U: 'static,
        K: 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        E: EqualityComparer<K> + 'static,
        C: Fn(&T, &U) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let comparer = Rc::new(comparer);
        let combiner = Rc::new(combiner);
        Query::from_factory(move || {
            let rows: Rc<Vec<(K, U)>> = Rc::new(inner.enumerate().map(|u| (inner_key(&u), u)).collect());
            let outer_key = outer_key.clone();
            let comparer = comparer.clone();
            let combiner = combiner.clone();
            outer.enumerate().flat_map(move |o| {
                let key = outer_key(&o);
                let rows = rows.clone();
                let comparer = comparer.clone();
                let combiner = combiner.clone();
                (0..rows.len()).filter_map(move |i| {
                    let (k, u) = &rows[i];
                    if comparer.equals(&key, k) {
                        Some(combiner(&o, u))
                    } else {
                        None
                    }
                })
            })
        })
    }

    /// Yields exactly one result per outer element, together with all the
    /// inner elements whose key is equal (possibly none).
    pub fn group_join<U, K, R, OK, IK, C>(&self, inner: &Query<U>, outer_key: OK, inner_key: IK, combiner: C) -> Query<R>
    where
        U: 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        C: Fn(&T, &[U]) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let combiner = Rc::new(combiner);
        Query::from_factory(move || {
            let lookup = Lookup::build(inner.enumerate(), &*inner_key);
            let outer_key = outer_key.clone();
            let combiner = combiner.clone();
            outer.enumerate().map(move |o| combiner(&o, lookup.get(&outer_key(&o))))
        })
    }

    pub fn group_join_with<U, K, R, OK, IK, E, C>(
        &self,
        inner: &Query<U>,
        outer_key: OK,
        inner_key: IK,
        comparer: E,
        combiner: C,
    ) -> Query<R>
    where
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&U) -> K + 'static,
        E: EqualityComparer<K> + 'static,
        C: Fn(&T, &[U]) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let comparer = Rc::new(comparer);
        let combiner = Rc::new(combiner);
        Query::from_factory(move || {
            let rows: Vec<(K, U)> = inner.enumerate().map(|u| (inner_key(&u), u)).collect();
            let outer_key = outer_key.clone();
            let comparer = comparer.clone();
            let combiner = combiner.clone();
            outer.enumerate().map(move |o| {
                let key = outer_key(&o);
                let matches: Vec<U> = rows.iter()
                    .filter(|(k, _)| comparer.equals(&key, k))
                    .map(|(_, u)| u.clone())
                    .collect();
                combiner(&o, &matches)
            })
        })
    }
}
