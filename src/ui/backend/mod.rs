//! Display backends.
//!
//! A backend shows the root [`Surface`] and feeds key presses back. The
//! terminal backend lives behind the `tui` feature so the widget layer can be
//! driven headless.

use std::io;

use crate::core::event::Key;
use crate::ui::core::surface::Surface;

pub trait Backend {
    /// Current display size as `(rows, columns)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Present `surface`, top-left aligned. Cells outside the display are
    /// dropped.
    fn draw(&mut self, surface: &Surface) -> io::Result<()>;

    /// Next pending key press, without blocking.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    /// Size reported by the most recent resize since the last call, if any.
    fn take_resize(&mut self) -> Option<(u16, u16)> {
        None
    }
}

#[cfg(feature = "tui")]
pub mod ratatui;
