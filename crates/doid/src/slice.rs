//! Extended slices with start, stop and step.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{QueryError, Result};

/// Slice bounds with optional start, stop and step.
///
/// Negative bounds count from the end. Out-of-range bounds are clamped, so
/// a slice never fails for being too long. A negative step walks backwards.
///
/// # Example
///
/// ```
/// use doid::{ListContainer, Slice};
///
/// let list: ListContainer<i32> = (0..10).collect();
/// assert_eq!(list.slice(Slice::from(2..5)).unwrap(), vec![2, 3, 4]);
/// assert_eq!(list.slice(Slice::new().start(-3)).unwrap(), vec![7, 8, 9]);
/// assert_eq!(list.slice(Slice::new().step(-3)).unwrap(), vec![9, 6, 3, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    /// The full slice, `[..]`.
    pub fn new() -> Self {
        Slice::default()
    }

    /// Sets the start bound.
    pub fn start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the stop bound (exclusive).
    pub fn stop(mut self, stop: isize) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Sets the step.
    pub fn step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolves the bounds against a sequence length.
    ///
    /// Returns the clamped `(start, stop, step)`. A step of zero is an error.
    pub fn indices(&self, len: usize) -> Result<(isize, isize, isize)> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(QueryError::InvalidSlice);
        }
        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };

        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });
        Ok((start, stop, step))
    }

    /// Positions selected by this slice, in order.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>> {
        let (start, stop, step) = self.indices(len)?;
        let mut positions = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            // Clamping keeps `i` inside `0..len` here
            positions.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(positions)
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Slice::new().start(range.start).stop(range.end)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Slice::new().start(range.start)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Slice::new().stop(range.end)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::new()
    }
}
