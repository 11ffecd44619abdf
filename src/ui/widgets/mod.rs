pub mod bouncing;
pub mod layout;

pub use bouncing::{schedule_bounce, Bouncing, Vec2};
pub use layout::{load_layout, LoadedLayout};
