use compact_str::CompactString;

use super::Widget;
use crate::ui::core::geom::{Hint, PosHint, SizeHint};
use crate::ui::core::style::Style;

/// Construction parameters for a widget.
///
/// Positional `top`/`left`/`height`/`width` values that are non-negative cell
/// counts become absolute geometry. Fractions and negative counts are treated
/// as hints and re-resolved whenever the parent changes size. An explicit
/// `pos_hint`/`size_hint` component wins over the positional value.
#[derive(Clone, Debug, Default)]
pub struct WidgetOptions {
    pub top: Option<Hint>,
    pub left: Option<Hint>,
    pub height: Option<Hint>,
    pub width: Option<Hint>,
    pub pos_hint: PosHint,
    pub size_hint: SizeHint,
    pub color: Style,
    pub transparent: bool,
    pub parent: Option<Widget>,
    pub group: Option<CompactString>,
    pub create_with: Option<CompactString>,
}

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, top: impl Into<Hint>, left: impl Into<Hint>) -> Self {
        self.top = Some(top.into());
        self.left = Some(left.into());
        self
    }

    pub fn size(mut self, height: impl Into<Hint>, width: impl Into<Hint>) -> Self {
        self.height = Some(height.into());
        self.width = Some(width.into());
        self
    }

    pub fn pos_hint(mut self, top: impl Into<Option<Hint>>, left: impl Into<Option<Hint>>) -> Self {
        self.pos_hint = PosHint::new(top, left);
        self
    }

    pub fn size_hint(
        mut self,
        height: impl Into<Option<Hint>>,
        width: impl Into<Option<Hint>>,
    ) -> Self {
        self.size_hint = SizeHint::new(height, width);
        self
    }

    pub fn color(mut self, color: Style) -> Self {
        self.color = color;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn parent(mut self, parent: &Widget) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn group(mut self, key: impl Into<CompactString>) -> Self {
        self.group = Some(key.into());
        self
    }

    pub fn create_with(mut self, tag: impl Into<CompactString>) -> Self {
        self.create_with = Some(tag.into());
        self
    }
}

/// Absolute value or hint for one positional component.
pub(super) fn split_positional(value: Option<Hint>) -> (Option<i32>, Option<Hint>) {
    match value {
        Some(Hint::Cells(n)) if n >= 0 => (Some(n), None),
        Some(hint) => (None, Some(hint)),
        None => (None, None),
    }
}
