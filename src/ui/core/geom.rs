//! Signed geometry and the hint resolver.
//!
//! Widget positions are relative to the parent and may be negative (a child
//! hanging off the top-left edge), so everything here is `i32`.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub height: i32,
    pub width: i32,
}

impl Rect {
    pub const fn new(top: i32, left: i32, height: i32, width: i32) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, p: Pos) -> bool {
        if self.is_empty() {
            return false;
        }
        p.row >= self.top && p.row < self.bottom() && p.col >= self.left && p.col < self.right()
    }

    pub fn intersect(self, other: Rect) -> Rect {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom().min(other.bottom());
        let right = self.right().min(other.right());
        Rect::new(top, left, (bottom - top).max(0), (right - left).max(0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One component of a position or size hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hint {
    /// Share of the parent's extent, rounded half-to-even.
    Fraction(f64),
    /// Absolute cell count.
    Cells(i32),
}

impl From<f64> for Hint {
    fn from(v: f64) -> Self {
        Hint::Fraction(v)
    }
}

impl From<i32> for Hint {
    fn from(v: i32) -> Self {
        Hint::Cells(v)
    }
}

/// Resolve `hint` against an axis of length `bound`. Negative hints count
/// back from the end of the axis; the result is not clamped.
pub fn convert(hint: Hint, bound: i32) -> i32 {
    match hint {
        Hint::Fraction(f) => {
            let v = (f * f64::from(bound)).round_ties_even() as i32;
            if v < 0 {
                bound.saturating_add(v)
            } else {
                v
            }
        }
        Hint::Cells(n) if n < 0 => bound.saturating_add(n),
        Hint::Cells(n) => n,
    }
}

/// `(top, left)` hints.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PosHint {
    pub top: Option<Hint>,
    pub left: Option<Hint>,
}

impl PosHint {
    pub fn new(top: impl Into<Option<Hint>>, left: impl Into<Option<Hint>>) -> Self {
        Self {
            top: top.into(),
            left: left.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none()
    }
}

/// `(height, width)` hints.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeHint {
    pub height: Option<Hint>,
    pub width: Option<Hint>,
}

impl SizeHint {
    pub fn new(height: impl Into<Option<Hint>>, width: impl Into<Option<Hint>>) -> Self {
        Self {
            height: height.into(),
            width: width.into(),
        }
    }

    /// Fill the parent on both axes.
    pub fn full() -> Self {
        Self::new(Hint::Fraction(1.0), Hint::Fraction(1.0))
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.width.is_none()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/geom.rs"]
mod tests;
