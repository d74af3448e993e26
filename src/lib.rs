//! OxidQuery: deferred, composable queries over in-memory sequences.
//!
//! A [`Query`] describes a computation without running it. Lazy operators
//! (`filter`, `map`, joins, ordering, grouping) return new queries; terminal
//! operators (`to_list`, `count`, `first`, `sum`, ...) enumerate and return a
//! value. Queries built over a [`Sequence`] see the sequence as it is when they
//! run, not as it was when they were built.

pub mod comparer;
pub mod config;
pub mod demo;
pub mod error;
pub mod query;
pub mod records;
pub mod resettable_iterator;
pub mod sample;
pub mod sequence;
pub mod types;

pub use comparer::EqualityComparer;
pub use error::{QueryError, QueryResult};
pub use query::{Enumerator, Grouping, Lookup, Numeric, OrderedQuery, Query, SortDirection};
pub use resettable_iterator::ResettableIterator;
pub use sequence::Sequence;
pub use types::{FromValue, Value, ValueKind};
