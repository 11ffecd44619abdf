//! nurses - cooperative terminal widgets
//!
//! Module layout:
//! - scheduler: single-threaded task loop with sleeps, yields and timers
//! - ui: surfaces, the widget tree, layouts and display backends
//! - screen: `ScreenManager`, tying a scheduler, a root widget and a backend
//! - config / error: `ScreenConfig` and the crate error type
//! - tui: crossterm glue and terminal restoration (feature `tui`)

pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod screen;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;

pub use config::ScreenConfig;
pub use error::{Error, Result};
pub use screen::{Screen, ScreenManager};
pub use ui::widget::{Widget, WidgetOptions};
