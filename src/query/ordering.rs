use std::{cmp::Ordering, ops::Deref, rc::Rc};

use itertools::Itertools;

use super::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

type KeyComparison<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// A query sorted by one or more keys. Sorting is stable and happens when
/// the query is enumerated. Dereferences to the sorted `Query`.
pub struct OrderedQuery<T> {
    source: Query<T>,
    keys: Vec<(KeyComparison<T>, SortDirection)>,
    sorted: Query<T>,
}

impl<T> Clone for OrderedQuery<T> {
    fn clone(&self) -> Self {
        OrderedQuery {
            source: self.source.clone(),
            keys: self.keys.clone(),
            sorted: self.sorted.clone(),
        }
    }
}

fn key_comparison<T, K, F>(key: F) -> KeyComparison<T>
where
    T: 'static,
    K: Ord,
    F: Fn(&T) -> K + 'static,
{
    Rc::new(move |a: &T, b: &T| key(a).cmp(&key(b)))
}

// Later keys only break ties left by earlier ones.
fn compare<T>(keys: &[(KeyComparison<T>, SortDirection)], a: &T, b: &T) -> Ordering {
    for (comparison, direction) in keys {
        let ordering = match direction {
            SortDirection::Ascending => comparison(a, b),
            SortDirection::Descending => comparison(a, b).reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

impl<T: 'static> OrderedQuery<T> {
    fn new(source: Query<T>, keys: Vec<(KeyComparison<T>, SortDirection)>) -> Self {
        let input = source.clone();
        let sort_keys: Rc<[(KeyComparison<T>, SortDirection)]> = Rc::from(keys.clone());
        let sorted = Query::from_factory(move || {
            let sort_keys = sort_keys.clone();
            input.enumerate().sorted_by(move |a, b| compare(&sort_keys, a, b))
        });
        OrderedQuery { source, keys, sorted }
    }

    fn with_key(&self, comparison: KeyComparison<T>, direction: SortDirection) -> Self {
        let mut keys = self.keys.clone();
        keys.push((comparison, direction));
        OrderedQuery::new(self.source.clone(), keys)
    }

    pub fn then_by<K, F>(&self, key: F) -> OrderedQuery<T>
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.with_key(key_comparison(key), SortDirection::Ascending)
    }

    pub fn then_by_descending<K, F>(&self, key: F) -> OrderedQuery<T>
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.with_key(key_comparison(key), SortDirection::Descending)
    }

    pub fn query(&self) -> Query<T> {
        self.sorted.clone()
    }
}

impl<T> Deref for OrderedQuery<T> {
    type Target = Query<T>;

    fn deref(&self) -> &Self::Target {
        &self.sorted
    }
}

impl<T> From<OrderedQuery<T>> for Query<T> {
    fn from(ordered: OrderedQuery<T>) -> Self {
        ordered.sorted
    }
}

impl<T: 'static> Query<T> {
    pub fn order_by<K, F>(&self, key: F) -> OrderedQuery<T>
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        OrderedQuery::new(self.clone(), vec![(key_comparison(key), SortDirection::Ascending)])
    }

    pub fn order_by_descending<K, F>(&self, key: F) -> OrderedQuery<T>
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        OrderedQuery::new(self.clone(), vec![(key_comparison(key), SortDirection::Descending)])
    }
}

#[cfg(test)]
mod tests {
    use rand::{seq::SliceRandom, rngs::StdRng, SeedableRng};
    use rust_decimal::Decimal;

    use crate::{records::Employee, sample};

    use super::*;

    #[test]
    fn test_order_by_then_by() {
        let employees = sample::employees();
        let ordered = employees.query()
            .inner_join(&sample::departments().query(), |e| e.department_id, |d| d.id, |e, d| (e.clone(), d.long_name.clone()))
            .order_by(|(_, department)| department.clone())
            .then_by(|(e, _)| e.annual_salary);
        let ids: Vec<i32> = ordered.map(|(e, _)| e.id).to_list();
        // Finance, Human Resources, Technology; Finance ordered by salary
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_order_by_descending_then_by_descending() {
        let query = Query::from_vec(vec![(1, 'a'), (2, 'b'), (1, 'c'), (2, 'd')]);
        let ordered = query.order_by_descending(|p| p.0).then_by_descending(|p| p.1);
        assert_eq!(ordered.to_list(), vec![(2, 'd'), (2, 'b'), (1, 'c'), (1, 'a')]);
    }

    #[test]
    fn test_sort_is_stable_under_shuffles() {
        let mut rng = StdRng::seed_from_u64(4224123);
        let base: Vec<(u8, usize)> = (0..200).map(|i| ((i % 7) as u8, i)).collect();
        for _ in 0..20 {
            let mut shuffled = base.clone();
            shuffled.shuffle(&mut rng);
            let sorted = Query::from_vec(shuffled.clone()).order_by(|p| p.0).to_list();
            for key in 0..7u8 {
                let before: Vec<usize> = shuffled.iter().filter(|p| p.0 == key).map(|p| p.1).collect();
                let after: Vec<usize> = sorted.iter().filter(|p| p.0 == key).map(|p| p.1).collect();
                assert_eq!(before, after);
            }
            assert!(sorted.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }

    #[test]
    fn test_then_by_does_not_change_parent() {
        let query = Query::from_vec(vec![(1, 2), (1, 1), (0, 3)]);
        let by_first = query.order_by(|p| p.0);
        let by_both = by_first.then_by(|p| p.1);
        assert_eq!(by_first.to_list(), vec![(0, 3), (1, 2), (1, 1)]);
        assert_eq!(by_both.to_list(), vec![(0, 3), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_ordering_is_deferred() {
        let employees = sample::employees();
        let ordered: Query<Employee> = employees.query().order_by_descending(|e| e.annual_salary).into();
        employees.push(sample::late_hire());
        let top = ordered.first().unwrap();
        assert_eq!(top.annual_salary, Decimal::new(1000002, 1));
    }
}
