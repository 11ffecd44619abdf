//! Row/column selections used to read and write widget cells.
//!
//! A [`Span`] behaves like an index or a slice on one axis: negative values
//! count from the end, slices clip to the axis, and a single index outside the
//! axis is an error.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Span {
    Index(i32),
    Slice { start: Option<i32>, end: Option<i32> },
}

impl Span {
    pub const FULL: Span = Span::Slice {
        start: None,
        end: None,
    };

    /// Concrete index range on an axis of length `len`.
    pub fn resolve(self, len: usize) -> Result<Range<usize>> {
        let n = len as i64;
        match self {
            Span::Index(index) => {
                let i = i64::from(index);
                let abs = if i < 0 { n + i } else { i };
                if abs < 0 || abs >= n {
                    return Err(Error::IndexOutOfBounds { index, len });
                }
                Ok(abs as usize..abs as usize + 1)
            }
            Span::Slice { start, end } => {
                let clip = |v: i32| {
                    let v = i64::from(v);
                    (if v < 0 { n + v } else { v }).clamp(0, n) as usize
                };
                let start = start.map_or(0, clip);
                let end = end.map_or(len, clip).max(start);
                Ok(start..end)
            }
        }
    }
}

impl From<i32> for Span {
    fn from(index: i32) -> Self {
        Span::Index(index)
    }
}

impl From<Range<i32>> for Span {
    fn from(r: Range<i32>) -> Self {
        Span::Slice {
            start: Some(r.start),
            end: Some(r.end),
        }
    }
}

impl From<RangeFrom<i32>> for Span {
    fn from(r: RangeFrom<i32>) -> Self {
        Span::Slice {
            start: Some(r.start),
            end: None,
        }
    }
}

impl From<RangeTo<i32>> for Span {
    fn from(r: RangeTo<i32>) -> Self {
        Span::Slice {
            start: None,
            end: Some(r.end),
        }
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::FULL
    }
}

/// A `(rows, cols)` selection. Build one from a tuple:
/// `(0, ..)` is the first row, `(.., -1)` the last column, `(1..3, 2..)` a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub rows: Span,
    pub cols: Span,
}

impl Region {
    pub fn new(rows: impl Into<Span>, cols: impl Into<Span>) -> Self {
        Self {
            rows: rows.into(),
            cols: cols.into(),
        }
    }

    pub fn all() -> Self {
        Self::new(.., ..)
    }

    pub fn cell(row: i32, col: i32) -> Self {
        Self::new(row, col)
    }

    /// Resolved `(rows, cols)` ranges inside a `height` x `width` grid.
    pub fn resolve(&self, height: usize, width: usize) -> Result<(Range<usize>, Range<usize>)> {
        Ok((self.rows.resolve(height)?, self.cols.resolve(width)?))
    }
}

impl<R: Into<Span>, C: Into<Span>> From<(R, C)> for Region {
    fn from((rows, cols): (R, C)) -> Self {
        Self::new(rows, cols)
    }
}

impl From<RangeFull> for Region {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/region.rs"]
mod tests;
