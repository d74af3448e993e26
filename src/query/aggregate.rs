//! Numeric aggregation over a projected field.
//!
//! Sums accumulate in the field's own type, so `Decimal` salaries never pass
//! through binary floating point.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::error::{QueryError, QueryResult};

use super::Query;

pub trait Numeric: Copy + PartialOrd {
    /// What `average` produces for this type.
    type Mean;

    fn zero() -> Self;

    fn add_checked(self, other: Self) -> Option<Self>;

    fn mean(sum: Self, count: usize) -> Option<Self::Mean>;
}

impl Numeric for Decimal {
    type Mean = Decimal;

    fn zero() -> Self {
        Decimal::ZERO
    }

    fn add_checked(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }

    fn mean(sum: Self, count: usize) -> Option<Self::Mean> {
        sum.checked_div(Decimal::from(count))
    }
}

impl Numeric for i64 {
    type Mean = f64;

    fn zero() -> Self {
        0
    }

    fn add_checked(self, other: Self) -> Option<Self> {
        self.checked_add(other)
    }

    fn mean(sum: Self, count: usize) -> Option<Self::Mean> {
        Some(sum as f64 / count as f64)
    }
}

impl Numeric for f64 {
    type Mean = f64;

    fn zero() -> Self {
        0.0
    }

    fn add_checked(self, other: Self) -> Option<Self> {
        Some(self + other)
    }

    fn mean(sum: Self, count: usize) -> Option<Self::Mean> {
        Some(sum / count as f64)
    }
}

/// Keeps the first element whose key is not beaten by a later one in the
/// `target_order` direction. A key that does not compare with the current
/// best (NaN) never replaces it.
fn extreme<T, K, F>(items: impl Iterator<Item = T>, key: F, target_order: Ordering, operator: &'static str) -> QueryResult<(T, K)>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut best: Option<(T, K)> = None;
    for item in items {
        let k = key(&item);
        best = match best {
            Some((current, current_key)) if k.partial_cmp(&current_key) != Some(target_order) => Some((current, current_key)),
            _ => Some((item, k)),
        };
    }
    best.ok_or(QueryError::empty(operator))
}

impl<T: 'static> Query<T> {
    /// Zero for an empty sequence.
    pub fn sum<N, F>(&self, selector: F) -> QueryResult<N>
    where
        N: Numeric,
        F: Fn(&T) -> N,
    {
        self.enumerate().try_fold(N::zero(), |total, item| {
            total.add_checked(selector(&item)).ok_or(QueryError::overflow("sum"))
        })
    }

    pub fn average<N, F>(&self, selector: F) -> QueryResult<N::Mean>
    where
        N: Numeric,
        F: Fn(&T) -> N,
    {
        let (total, count) = self.enumerate().try_fold((N::zero(), 0usize), |(total, count), item| {
            total.add_checked(selector(&item))
                .map(|total| (total, count + 1))
                .ok_or(QueryError::overflow("average"))
        })?;
        if count == 0 {
            return Err(QueryError::empty("average"));
        }
        N::mean(total, count).ok_or(QueryError::overflow("average"))
    }

    pub fn max<K, F>(&self, selector: F) -> QueryResult<K>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme(self.enumerate(), selector, Ordering::Greater, "max").map(|(_, k)| k)
    }

    pub fn min<K, F>(&self, selector: F) -> QueryResult<K>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme(self.enumerate(), selector, Ordering::Less, "min").map(|(_, k)| k)
    }

    /// The element with the greatest key; the first one on ties.
    pub fn max_by<K, F>(&self, key: F) -> QueryResult<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme(self.enumerate(), key, Ordering::Greater, "max_by").map(|(item, _)| item)
    }

    pub fn min_by<K, F>(&self, key: F) -> QueryResult<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extreme(self.enumerate(), key, Ordering::Less, "min_by").map(|(item, _)| item)
    }
}
