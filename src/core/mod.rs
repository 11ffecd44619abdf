//! Terminal-independent input types.

pub mod event;

pub use event::{Key, KeyCode, KeyModifiers, ParseKeyError};
