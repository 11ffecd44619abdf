//! Terminal plumbing (crossterm + signal handling).
//!
//! Kept apart from the widget layer, which only sees [`crate::core::event::Key`]
//! and the [`crate::ui::backend::Backend`] trait.

pub mod crossterm;
pub mod terminal_guard;
