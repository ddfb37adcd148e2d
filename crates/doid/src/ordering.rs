//! Sort options and composite key comparison.

use std::cmp::Ordering;

use crate::error::Result;
use crate::value::Value;

/// Options for [`ListContainer::order_by_with`](crate::ListContainer::order_by_with).
///
/// This is the complete set of options; there is no pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortOptions {
    /// Sort largest first. Elements with equal keys keep their input order.
    pub reverse: bool,
}

impl SortOptions {
    /// Ascending order.
    pub fn new() -> Self {
        SortOptions::default()
    }

    /// Descending order.
    pub fn descending() -> Self {
        SortOptions { reverse: true }
    }

    /// Sets the direction.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        if self.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Compares two composite keys lexicographically, first key first.
///
/// Unordered values (NaN) compare equal. Incomparable kinds are an error.
pub(crate) fn compare_keys(a: &[Value<'_>], b: &[Value<'_>]) -> Result<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.ordering(y, "order_by")? {
            Some(Ordering::Equal) | None => continue,
            Some(ordering) => return Ok(ordering),
        }
    }
    Ok(a.len().cmp(&b.len()))
}

/// Stable merge sort of indices with a fallible comparator.
///
/// The first comparator error aborts the sort and is returned; `order` is
/// left in an unspecified permutation.
pub(crate) fn try_stable_sort<F>(order: &mut Vec<usize>, mut cmp: F) -> Result<()>
where
    F: FnMut(usize, usize) -> Result<Ordering>,
{
    let len = order.len();
    let mut merged = Vec::with_capacity(len);
    let mut width = 1;

    while width < len {
        merged.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right) = (start, mid);
            while left < mid && right < end {
                // Take from the right run only when strictly smaller
                if cmp(order[right], order[left])? == Ordering::Less {
                    merged.push(order[right]);
                    right += 1;
                } else {
                    merged.push(order[left]);
                    left += 1;
                }
            }
            merged.extend_from_slice(&order[left..mid]);
            merged.extend_from_slice(&order[right..end]);
            start = end;
        }
        std::mem::swap(order, &mut merged);
        width *= 2;
    }
    Ok(())
}
