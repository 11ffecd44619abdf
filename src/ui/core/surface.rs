//! In-memory cell grids.
//!
//! Every widget owns one [`Surface`]. Children are composited into their
//! parent's surface with [`Surface::blit`]; the root surface is what the
//! backend draws.
//!
//! A surface is allocated `reserved` columns wider than its logical width.
//! Those trailing columns are never read, written or composited.

use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

use super::border::BorderStyle;
use super::geom::{Axis, Rect};
use super::region::Region;
use super::style::Style;
use crate::error::{Error, Result};

const BLANK: CompactString = CompactString::const_new(" ");

/// One grapheme cluster plus its style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub symbol: CompactString,
    pub style: Style,
}

impl Cell {
    pub fn new(symbol: impl Into<CompactString>, style: Style) -> Self {
        Self {
            symbol: symbol.into(),
            style,
        }
    }

    pub fn blank(style: Style) -> Self {
        Self {
            symbol: BLANK,
            style,
        }
    }

    /// Blank cells are see-through when composited with [`Blit::Overlay`].
    pub fn is_blank(&self) -> bool {
        self.symbol.is_empty() || self.symbol == " "
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Style::default())
    }
}

/// How a child surface is copied onto its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blit {
    /// Copy every cell in the overlap.
    Overwrite,
    /// Copy only non-blank cells.
    Overlay,
}

/// Content for [`Surface::write`].
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    /// Symbols only; existing styles are kept. A one-line string is spread
    /// across the region one grapheme per cell; a multi-line string is split
    /// into rows (short lines padded with spaces) and transposed when that is
    /// the only way it fits.
    Text(String),
    /// Whole cells. Shape must match the region or broadcast along length-1
    /// axes.
    Cells(Vec<Vec<Cell>>),
    /// Restyle the region without touching symbols.
    Style(Style),
}

impl From<&str> for Fill {
    fn from(s: &str) -> Self {
        Fill::Text(s.to_string())
    }
}

impl From<String> for Fill {
    fn from(s: String) -> Self {
        Fill::Text(s)
    }
}

impl From<char> for Fill {
    fn from(ch: char) -> Self {
        Fill::Text(ch.to_string())
    }
}

impl From<Cell> for Fill {
    fn from(cell: Cell) -> Self {
        Fill::Cells(vec![vec![cell]])
    }
}

impl From<Vec<Vec<Cell>>> for Fill {
    fn from(grid: Vec<Vec<Cell>>) -> Self {
        Fill::Cells(grid)
    }
}

impl From<Style> for Fill {
    fn from(style: Style) -> Self {
        Fill::Style(style)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    height: usize,
    width: usize,
    reserved: usize,
    style: Style,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(height: usize, width: usize, reserved: usize, style: Style) -> Self {
        let len = height * (width + reserved);
        Self {
            height,
            width,
            reserved,
            style,
            cells: vec![Cell::blank(style); len],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Allocated row length, including reserved columns.
    pub fn stride(&self) -> usize {
        self.width + self.reserved
    }

    /// Default style of blank cells.
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.height as i32, self.width as i32)
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.stride() + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(self.idx(row, col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let idx = self.idx(row, col);
        self.cells.get_mut(idx)
    }

    /// Logical row as a string, one symbol per cell.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.width)
            .filter_map(|col| self.cell(row, col))
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    /// Resize in place. Content in the overlapping top-left block survives;
    /// new cells are blank.
    pub fn resize(&mut self, height: usize, width: usize) {
        if height == self.height && width == self.width {
            return;
        }
        let mut next = Surface::new(height, width, self.reserved, self.style);
        for row in 0..height.min(self.height) {
            for col in 0..width.min(self.width) {
                let idx = next.idx(row, col);
                next.cells[idx] = self.cells[self.idx(row, col)].clone();
            }
        }
        *self = next;
    }

    pub fn erase(&mut self) {
        let blank = Cell::blank(self.style);
        self.cells.fill(blank);
    }

    /// Change the default style. Cells still carrying the old default follow
    /// along; explicitly styled cells keep their style.
    pub fn set_style(&mut self, style: Style) {
        let old = self.style;
        for cell in self.cells.iter_mut().filter(|cell| cell.style == old) {
            cell.style = style;
        }
        self.style = style;
    }

    /// Copy of the cells inside `region`, row by row.
    pub fn read(&self, region: impl Into<Region>) -> Result<Vec<Vec<Cell>>> {
        let (rows, cols) = region.into().resolve(self.height, self.width)?;
        Ok(rows
            .map(|row| {
                cols.clone()
                    .map(|col| self.cells[self.idx(row, col)].clone())
                    .collect()
            })
            .collect())
    }

    pub fn write(&mut self, region: impl Into<Region>, fill: impl Into<Fill>) -> Result<()> {
        let (rows, cols) = region.into().resolve(self.height, self.width)?;
        let target = (rows.len(), cols.len());
        match fill.into() {
            Fill::Style(style) => {
                for row in rows {
                    for col in cols.clone() {
                        let idx = self.idx(row, col);
                        self.cells[idx].style = style;
                    }
                }
            }
            Fill::Cells(grid) => {
                let shape = grid_shape(&grid)?;
                check_broadcast(shape, target)?;
                for (i, row) in rows.enumerate() {
                    let src = &grid[if shape.0 == 1 { 0 } else { i }];
                    for (j, col) in cols.clone().enumerate() {
                        let idx = self.idx(row, col);
                        self.cells[idx] = src[if shape.1 == 1 { 0 } else { j }].clone();
                    }
                }
            }
            Fill::Text(text) => {
                let grid = text_grid(&text, target)?;
                let shape = (grid.len(), grid.first().map_or(0, Vec::len));
                for (i, row) in rows.enumerate() {
                    let src = &grid[if shape.0 == 1 { 0 } else { i }];
                    for (j, col) in cols.clone().enumerate() {
                        let idx = self.idx(row, col);
                        self.cells[idx].symbol = src[if shape.1 == 1 { 0 } else { j }].clone();
                    }
                }
            }
        }
        Ok(())
    }

    /// Draw `style` into the outermost ring. `color` restyles the ring only.
    pub fn border(&mut self, style: BorderStyle, color: Option<Style>) {
        if self.height == 0 || self.width == 0 {
            return;
        }
        let g = style.glyphs();
        let (bottom, right) = (self.height - 1, self.width - 1);
        let put = |s: &mut Self, row: usize, col: usize, ch: char| {
            let idx = s.idx(row, col);
            let cell = &mut s.cells[idx];
            cell.symbol = CompactString::from(ch.to_string());
            if let Some(color) = color {
                cell.style = color;
            }
        };
        for col in 0..self.width {
            put(self, 0, col, g.horizontal);
            put(self, bottom, col, g.horizontal);
        }
        for row in 0..self.height {
            put(self, row, 0, g.vertical);
            put(self, row, right, g.vertical);
        }
        put(self, 0, 0, g.top_left);
        put(self, 0, right, g.top_right);
        put(self, bottom, 0, g.bottom_left);
        put(self, bottom, right, g.bottom_right);
    }

    /// Rotate content by `shift` cells: rightwards along `Axis::Horizontal`,
    /// downwards along `Axis::Vertical`. Negative shifts go the other way.
    pub fn roll(&mut self, shift: i32, axis: Axis) {
        match axis {
            Axis::Horizontal => {
                let Some(k) = rotation(shift, self.width) else {
                    return;
                };
                let (stride, width) = (self.stride(), self.width);
                for row in self.cells.chunks_mut(stride) {
                    row[..width].rotate_right(k);
                }
            }
            Axis::Vertical => {
                let Some(k) = rotation(shift, self.height) else {
                    return;
                };
                let stride = self.stride();
                self.cells.rotate_right(k * stride);
            }
        }
    }

    /// Move content up by `lines` rows (down when negative). Rows scrolled in
    /// are blank.
    pub fn scroll(&mut self, lines: i32) {
        let n = lines.unsigned_abs() as usize;
        if n == 0 || self.height == 0 {
            return;
        }
        if n >= self.height {
            self.erase();
            return;
        }
        let stride = self.stride();
        let blank = Cell::blank(self.style);
        if lines > 0 {
            self.cells.rotate_left(n * stride);
            let len = self.cells.len();
            self.cells[len - n * stride..].fill(blank);
        } else {
            self.cells.rotate_right(n * stride);
            self.cells[..n * stride].fill(blank);
        }
    }

    /// Composite `src` onto `self` with its top-left corner at `(top, left)`.
    /// Only the overlap of the two logical rectangles is touched.
    pub fn blit(&mut self, src: &Surface, top: i32, left: i32, mode: Blit) {
        let placed = Rect::new(top, left, src.height as i32, src.width as i32);
        let overlap = placed.intersect(self.area());
        if overlap.is_empty() {
            return;
        }
        for row in overlap.top..overlap.bottom() {
            let src_row = (row - top) as usize;
            for col in overlap.left..overlap.right() {
                let cell = &src.cells[src.idx(src_row, (col - left) as usize)];
                if mode == Blit::Overlay && cell.is_blank() {
                    continue;
                }
                let idx = self.idx(row as usize, col as usize);
                self.cells[idx].clone_from(cell);
            }
        }
    }
}

fn rotation(shift: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let k = i64::from(shift).rem_euclid(len as i64) as usize;
    (k != 0).then_some(k)
}

fn broadcasts(src: (usize, usize), dst: (usize, usize)) -> bool {
    (src.0 == dst.0 || src.0 == 1) && (src.1 == dst.1 || src.1 == 1)
}

fn check_broadcast(src: (usize, usize), dst: (usize, usize)) -> Result<()> {
    if broadcasts(src, dst) {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: dst,
            found: src,
        })
    }
}

fn grid_shape<T>(grid: &[Vec<T>]) -> Result<(usize, usize)> {
    let width = grid.first().map_or(0, Vec::len);
    if let Some(row) = grid.iter().find(|row| row.len() != width) {
        return Err(Error::ShapeMismatch {
            expected: (grid.len(), width),
            found: (grid.len(), row.len()),
        });
    }
    Ok((grid.len(), width))
}

fn text_grid(text: &str, target: (usize, usize)) -> Result<Vec<Vec<CompactString>>> {
    let mut grid: Vec<Vec<CompactString>> = text
        .lines()
        .map(|line| line.graphemes(true).map(CompactString::from).collect())
        .collect();
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, BLANK);
    }

    let shape = (grid.len(), width);
    if broadcasts(shape, target) {
        return Ok(grid);
    }
    // A single line only turns on its side to fill a single column.
    let may_transpose = shape.0 > 1 || target.1 == 1;
    if may_transpose && broadcasts((shape.1, shape.0), target) {
        let transposed = (0..width)
            .map(|col| grid.iter().map(|row| row[col].clone()).collect())
            .collect();
        return Ok(transposed);
    }
    Err(Error::ShapeMismatch {
        expected: target,
        found: shape,
    })
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/surface.rs"]
mod tests;
