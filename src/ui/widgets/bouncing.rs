//! Move a widget around its parent, reflecting off the edges.

use std::ops::{Add, AddAssign};
use std::time::Duration;

use crate::scheduler::{Scheduler, TaskHandle};
use crate::ui::widget::Widget;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub row: f64,
    pub col: f64,
}

impl Vec2 {
    pub const fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bouncing {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Default for Bouncing {
    fn default() -> Self {
        Self {
            pos: Vec2::default(),
            vel: Vec2::new(1.0, 1.0),
        }
    }
}

impl Bouncing {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Advance one tick and move `widget`. Widgets without a parent stay put.
    pub fn step(&mut self, widget: &Widget) {
        let Some(parent) = widget.parent() else {
            return;
        };
        self.pos += self.vel;

        let offset = if parent.has_border() { 1.0 } else { 0.0 };
        let max_row = f64::from(parent.height()) - offset - f64::from(widget.height());
        let max_col = f64::from(parent.width()) - offset - f64::from(widget.width());

        if !(offset..=max_row).contains(&self.pos.row) {
            self.vel.row = -self.vel.row;
            self.pos.row += 2.0 * self.vel.row;
        }
        if !(offset..=max_col).contains(&self.pos.col) {
            self.vel.col = -self.vel.col;
            self.pos.col += 2.0 * self.vel.col;
        }

        widget.set_pos(
            self.pos.row.round_ties_even() as i32,
            self.pos.col.round_ties_even() as i32,
        );
    }
}

/// Run `bouncing` on `widget` every `delay` until the handle is canceled.
pub fn schedule_bounce(
    widget: &Widget,
    scheduler: &Scheduler,
    mut bouncing: Bouncing,
    delay: Duration,
) -> TaskHandle {
    let widget = widget.clone();
    scheduler.schedule(
        move || {
            bouncing.step(&widget);
            Ok(())
        },
        delay,
        0,
    )
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/bouncing.rs"]
mod tests;
