use crate::error::{QueryError, QueryResult};

use super::Query;

// Stops after the second match.
fn single_of<T>(mut items: impl Iterator<Item = T>, operator: &'static str) -> QueryResult<Option<T>> {
    let first = match items.next() {
        Some(item) => item,
        None => return Ok(None),
    };
    if items.next().is_some() {
        return Err(QueryError::multiple(operator));
    }
    Ok(Some(first))
}

impl<T: 'static> Query<T> {
    pub fn element_at(&self, index: usize) -> QueryResult<T> {
        let mut length = 0;
        for item in self.enumerate() {
            if length == index {
                return Ok(item);
            }
            length += 1;
        }
        Err(QueryError::IndexOutOfRange { index, length })
    }

    pub fn element_at_or_none(&self, index: usize) -> Option<T> {
        self.enumerate().nth(index)
    }

    pub fn first(&self) -> QueryResult<T> {
        self.first_or_none().ok_or(QueryError::empty("first"))
    }

    pub fn first_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.first_or_none_where(predicate).ok_or(QueryError::empty("first"))
    }

    pub fn first_or_none(&self) -> Option<T> {
        self.enumerate().next()
    }

    pub fn first_or_none_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.enumerate().find(|item| predicate(item))
    }

    pub fn last(&self) -> QueryResult<T> {
        self.last_or_none().ok_or(QueryError::empty("last"))
    }

    pub fn last_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.last_or_none_where(predicate).ok_or(QueryError::empty("last"))
    }

    pub fn last_or_none(&self) -> Option<T> {
        self.enumerate().last()
    }

    pub fn last_or_none_where<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.enumerate().filter(|item| predicate(item)).last()
    }

    pub fn single(&self) -> QueryResult<T> {
        single_of(self.enumerate(), "single")?.ok_or(QueryError::empty("single"))
    }

    pub fn single_where<P>(&self, predicate: P) -> QueryResult<T>
    where
        P: Fn(&T) -> bool,
    {
        single_of(self.enumerate().filter(|item| predicate(item)), "single")?.ok_or(QueryError::empty("single"))
    }

    /// `Ok(None)` when nothing matches. More than one match is still an
    /// error, the same as for `single`.
    pub fn single_or_none(&self) -> QueryResult<Option<T>> {
        single_of(self.enumerate(), "single_or_none")
    }

    pub fn single_or_none_where<P>(&self, predicate: P) -> QueryResult<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        single_of(self.enumerate().filter(|item| predicate(item)), "single_or_none")
    }
}
