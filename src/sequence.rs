use std::{cell::RefCell, rc::Rc};

use crate::{query::Query, resettable_iterator::ResettableIterator};

/// A shared, growable source collection. Clones share the same storage, so
/// a query built from one handle observes pushes made through another.
#[derive(Debug)]
pub struct Sequence<T> {
    items: Rc<RefCell<Vec<T>>>, // Only single threaded access for now
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Sequence { items: self.items.clone() }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence { items: Rc::new(RefCell::new(items)) }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Sequence::from(Vec::new())
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl<T: Clone + 'static> Sequence<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn cursor(&self) -> SequenceCursor<T> {
        SequenceCursor { items: self.items.clone(), position: 0 }
    }

    /// A deferred query over the live contents of this sequence.
    pub fn query(&self) -> Query<T> {
        let source = self.clone();
        Query::from_factory(move || source.cursor())
    }
}

/// Reads one element per pull. The storage is only borrowed for the
/// duration of a single `next`, so the sequence may grow mid-enumeration.
pub struct SequenceCursor<T> {
    items: Rc<RefCell<Vec<T>>>,
    position: usize,
}

impl<T: Clone> Iterator for SequenceCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.borrow().get(self.position).cloned()?;
        self.position += 1;
        Some(item)
    }
}

impl<T: Clone> ResettableIterator for SequenceCursor<T> {
    fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_sees_pushes_made_during_iteration() {
        let sequence = Sequence::from(vec![1, 2]);
        let mut cursor = sequence.cursor();
        assert_eq!(cursor.next(), Some(1));
        sequence.push(3);
        assert_eq!(cursor.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_cursor_reset() {
        let sequence: Sequence<i32> = (1..=3).collect();
        let mut cursor = sequence.cursor();
        assert_eq!(cursor.by_ref().count(), 3);
        assert_eq!(cursor.next(), None);
        cursor.reset();
        assert_eq!(cursor.next(), Some(1));
    }

    #[test]
    fn test_clones_share_storage() {
        let sequence = Sequence::new();
        let handle = sequence.clone();
        handle.push("a".to_string());
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.get(0).as_deref(), Some("a"));
        assert!(!sequence.is_empty());
    }
}
