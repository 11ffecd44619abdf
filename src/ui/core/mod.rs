pub mod border;
pub mod geom;
pub mod region;
pub mod style;
pub mod surface;

pub use border::{BorderGlyphs, BorderStyle};
pub use geom::{convert, Axis, Hint, Pos, PosHint, Rect, SizeHint};
pub use region::{Region, Span};
pub use style::{Color, Mod, Style};
pub use surface::{Blit, Cell, Fill, Surface};
