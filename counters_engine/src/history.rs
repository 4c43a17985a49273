//! Bounded history — append-and-truncate over an ordered log.
//!
//! Pure functions, no side effects. Oldest entries are dropped first;
//! relative order is always preserved.

/// Keep only the last `max` elements of `list`.
///
/// `max` is clamped to at least 1: a resource must always retain its
/// current value in history.
pub fn truncate<T>(mut list: Vec<T>, max: usize) -> Vec<T> {
    let max = max.max(1);
    let len = list.len();
    if len > max {
        list.drain(..len - max);
    }
    list
}

/// Append `item` to `list`, then truncate to the last `max` elements.
pub fn append_and_truncate<T: Clone>(list: &[T], item: T, max: usize) -> Vec<T> {
    let mut next = list.to_vec();
    next.push(item);
    truncate(next, max)
}
