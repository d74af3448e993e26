/// A pull-based iterator that can be rewound to its start. Rewinding
/// re-runs whatever computation produces the elements, it does not replay
/// a cached copy.
pub trait ResettableIterator: Iterator {
    fn reset(&mut self);
}
