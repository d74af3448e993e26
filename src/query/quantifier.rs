use crate::comparer::EqualityComparer;

use super::Query;

impl<T: 'static> Query<T> {
    /// True for an empty sequence. Stops at the first element that fails.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.enumerate().all(|item| predicate(&item))
    }

    pub fn any(&self) -> bool {
        self.enumerate().next().is_some()
    }

    /// Stops at the first element that matches.
    pub fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.enumerate().any(|item| predicate(&item))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.enumerate().any(|item| item == *value)
    }

    pub fn contains_with<C>(&self, value: &T, comparer: C) -> bool
    where
        C: EqualityComparer<T>,
    {
        self.enumerate().any(|item| comparer.equals(&item, value))
    }
}
