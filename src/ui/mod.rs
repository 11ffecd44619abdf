//! Widget layer.
//!
//! - core: cell surfaces, geometry, styles and borders
//! - widget: the widget tree and the widget type registry
//! - widgets: layout loading and the bouncing behavior
//! - backend: where the root surface is drawn

pub mod backend;
pub mod core;
pub mod widget;
pub mod widgets;
