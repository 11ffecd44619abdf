//! The widget tree.
//!
//! A [`Widget`] is a cheap handle (`Rc`) to one node. Parents own their
//! children; children point back with a `Weak`, so dropping the root frees the
//! whole tree. Child order is z-order: index 0 is drawn first (back), the last
//! child is drawn last (front) and sees key presses first.
//!
//! Geometry is either absolute (`top`, `left`, `height`, `width`) or given as
//! hints relative to the parent. Setting an absolute value clears the hint on
//! that axis and vice versa.

mod options;
mod registry;

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::core::event::Key;
use crate::error::Result;
use crate::ui::core::border::BorderStyle;
use crate::ui::core::geom::{convert, Axis, Hint, PosHint, SizeHint};
use crate::ui::core::region::Region;
use crate::ui::core::style::Style;
use crate::ui::core::surface::{Blit, Cell, Fill, Surface};

pub use options::WidgetOptions;
pub use registry::{WidgetFactory, WidgetRegistry};

/// Key handler attached to one widget. Returning `true` marks the key as
/// handled and stops dispatch.
pub type PressHandler = Box<dyn FnMut(&Widget, &Key) -> bool>;

/// Reference to a child, either by handle or by z-order index (negative
/// indices count from the front).
#[derive(Clone, Copy)]
pub enum ChildRef<'a> {
    Index(i32),
    Widget(&'a Widget),
}

impl From<i32> for ChildRef<'_> {
    fn from(index: i32) -> Self {
        ChildRef::Index(index)
    }
}

impl<'a> From<&'a Widget> for ChildRef<'a> {
    fn from(widget: &'a Widget) -> Self {
        ChildRef::Widget(widget)
    }
}

struct Node {
    kind: CompactString,
    top: i32,
    left: i32,
    height: Option<i32>,
    width: Option<i32>,
    pos_hint: PosHint,
    size_hint: SizeHint,
    transparent: bool,
    erase_on_refresh: bool,
    has_border: bool,
    is_root: bool,
    split: Option<(Axis, Hint)>,
    surface: Surface,
    children: Vec<Widget>,
    parent: Weak<RefCell<Node>>,
    groups: FxHashMap<CompactString, Vec<Weak<RefCell<Node>>>>,
    on_press: Option<PressHandler>,
}

impl Node {
    fn resize_surface(&mut self) {
        let height = self.height.unwrap_or(0).max(0) as usize;
        let width = self.width.unwrap_or(0).max(0) as usize;
        self.surface.resize(height, width);
    }
}

#[derive(Clone)]
pub struct Widget(Rc<RefCell<Node>>);

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Widget {}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Widget")
            .field("kind", &node.kind)
            .field("top", &node.top)
            .field("left", &node.left)
            .field("height", &node.height)
            .field("width", &node.width)
            .field("children", &node.children.len())
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// A detached plain widget. It gets a size once added to a rooted tree
    /// unless `options` gives an absolute one.
    pub fn new(options: WidgetOptions) -> Self {
        let (top, top_hint) = options::split_positional(options.top);
        let (left, left_hint) = options::split_positional(options.left);
        let (height, height_hint) = options::split_positional(options.height);
        let (width, width_hint) = options::split_positional(options.width);

        let pos_hint = PosHint {
            top: options.pos_hint.top.or(top_hint),
            left: options.pos_hint.left.or(left_hint),
        };
        let size_hint = SizeHint {
            height: options.size_hint.height.or(height_hint),
            width: options.size_hint.width.or(width_hint),
        };

        let mut node = Node {
            kind: CompactString::const_new("Widget"),
            top: top.unwrap_or(0),
            left: left.unwrap_or(0),
            height,
            width,
            pos_hint,
            size_hint,
            transparent: options.transparent,
            erase_on_refresh: false,
            has_border: false,
            is_root: false,
            split: None,
            surface: Surface::new(0, 0, 0, options.color),
            children: Vec::new(),
            parent: Weak::new(),
            groups: FxHashMap::default(),
            on_press: None,
        };
        node.resize_surface();
        Self(Rc::new(RefCell::new(node)))
    }

    /// A container that clears itself before compositing its children. Fills
    /// its parent unless `options` says otherwise.
    pub fn layout(mut options: WidgetOptions) -> Self {
        if options.size_hint.is_empty() {
            options.size_hint = SizeHint::full();
        }
        let widget = Self::new(options);
        {
            let mut node = widget.0.borrow_mut();
            node.kind = CompactString::const_new("Layout");
            node.erase_on_refresh = true;
        }
        widget
    }

    /// Root of a widget tree: a layout with fixed size whose surfaces reserve
    /// `reserved_columns` extra columns, inherited by every descendant.
    pub fn new_root(height: i32, width: i32, reserved_columns: usize, color: Style) -> Self {
        let widget = Self::layout(WidgetOptions::new().size(height, width).color(color));
        {
            let mut node = widget.0.borrow_mut();
            node.size_hint = SizeHint::default();
            node.is_root = true;
            node.surface = Surface::new(0, 0, reserved_columns, color);
            node.resize_surface();
        }
        widget
    }

    pub fn kind(&self) -> CompactString {
        self.0.borrow().kind.clone()
    }

    pub(crate) fn set_kind(&self, kind: impl Into<CompactString>) {
        self.0.borrow_mut().kind = kind.into();
    }

    /// Place the first two children side by side along `axis`: the first
    /// gets `at` of this widget's extent, clamped to it, and the second the
    /// rest. Their hints are cleared and the division is redone whenever
    /// this widget's geometry changes.
    pub fn set_split(&self, axis: Axis, at: Hint) {
        self.0.borrow_mut().split = Some((axis, at));
        self.update_children();
    }

    pub fn top(&self) -> i32 {
        self.0.borrow().top
    }

    pub fn left(&self) -> i32 {
        self.0.borrow().left
    }

    /// Resolved height; 0 until the widget is sized.
    pub fn height(&self) -> i32 {
        self.0.borrow().height.unwrap_or(0)
    }

    pub fn width(&self) -> i32 {
        self.0.borrow().width.unwrap_or(0)
    }

    pub fn bottom(&self) -> i32 {
        self.top() + self.height()
    }

    pub fn right(&self) -> i32 {
        self.left() + self.width()
    }

    pub fn pos_hint(&self) -> PosHint {
        self.0.borrow().pos_hint
    }

    pub fn size_hint(&self) -> SizeHint {
        self.0.borrow().size_hint
    }

    pub fn color(&self) -> Style {
        self.0.borrow().surface.style()
    }

    pub fn is_transparent(&self) -> bool {
        self.0.borrow().transparent
    }

    pub fn has_border(&self) -> bool {
        self.0.borrow().has_border
    }

    pub fn is_layout(&self) -> bool {
        self.0.borrow().erase_on_refresh
    }

    pub fn set_top(&self, top: i32) {
        let mut node = self.0.borrow_mut();
        node.top = top;
        node.pos_hint.top = None;
    }

    pub fn set_left(&self, left: i32) {
        let mut node = self.0.borrow_mut();
        node.left = left;
        node.pos_hint.left = None;
    }

    pub fn set_pos(&self, top: i32, left: i32) {
        self.set_top(top);
        self.set_left(left);
    }

    pub fn set_height(&self, height: i32) {
        {
            let mut node = self.0.borrow_mut();
            node.height = Some(height);
            node.size_hint.height = None;
            node.resize_surface();
        }
        self.update_children();
    }

    pub fn set_width(&self, width: i32) {
        {
            let mut node = self.0.borrow_mut();
            node.width = Some(width);
            node.size_hint.width = None;
            node.resize_surface();
        }
        self.update_children();
    }

    /// Set both dimensions, re-flowing children once.
    pub fn resize(&self, height: i32, width: i32) {
        {
            let mut node = self.0.borrow_mut();
            node.height = Some(height);
            node.width = Some(width);
            node.size_hint = SizeHint::default();
            node.resize_surface();
        }
        self.update_children();
    }

    pub fn set_pos_hint(&self, hint: PosHint) {
        self.0.borrow_mut().pos_hint = hint;
        self.update_geometry();
    }

    pub fn set_size_hint(&self, hint: SizeHint) {
        self.0.borrow_mut().size_hint = hint;
        self.update_geometry();
    }

    pub fn set_transparent(&self, transparent: bool) {
        self.0.borrow_mut().transparent = transparent;
    }

    /// Change the default style; cells painted with the old default follow.
    pub fn set_color(&self, color: Style) {
        self.0.borrow_mut().surface.set_style(color);
    }

    pub fn parent(&self) -> Option<Widget> {
        self.0.borrow().parent.upgrade().map(Widget)
    }

    pub fn children(&self) -> Vec<Widget> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// True when the widget hangs off a root, directly or through ancestors.
    pub fn has_root(&self) -> bool {
        self.root().is_some()
    }

    pub fn root(&self) -> Option<Widget> {
        let mut current = self.clone();
        loop {
            if current.0.borrow().is_root {
                return Some(current);
            }
            current = current.parent()?;
        }
    }

    fn is_ancestor_of(&self, other: &Widget) -> bool {
        let mut current = Some(other.clone());
        while let Some(widget) = current {
            if widget == *self {
                return true;
            }
            current = widget.parent();
        }
        false
    }

    /// This widget and every descendant, children before parents.
    pub fn walk(&self) -> Vec<Widget> {
        let mut out = Vec::new();
        self.walk_into(&mut out);
        out
    }

    fn walk_into(&self, out: &mut Vec<Widget>) {
        for child in self.children() {
            child.walk_into(out);
        }
        out.push(self.clone());
    }

    pub fn is_in_front(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        let node = parent.0.borrow();
        node.children.last() == Some(self)
    }

    pub fn is_in_back(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        let node = parent.0.borrow();
        node.children.first() == Some(self)
    }

    /// Append `child` in front of its siblings and resolve its geometry. A
    /// child that already has a parent is moved.
    pub fn add_widget(&self, child: &Widget) {
        if child.is_ancestor_of(self) {
            tracing::warn!(widget = ?child, "refusing to add a widget to its own subtree");
            return;
        }
        if let Some(old) = child.parent() {
            old.remove_widget(child);
        }
        {
            let mut node = child.0.borrow_mut();
            node.parent = Rc::downgrade(&self.0);
        }
        self.0.borrow_mut().children.push(child.clone());
        child.inherit_reserved(self.0.borrow().surface.reserved());
        self.divide();
        child.update_geometry();
    }

    fn inherit_reserved(&self, reserved: usize) {
        let mut node = self.0.borrow_mut();
        if node.surface.reserved() != reserved {
            let style = node.surface.style();
            node.surface = Surface::new(0, 0, reserved, style);
            node.resize_surface();
        }
        let children = node.children.clone();
        drop(node);
        for child in children {
            child.inherit_reserved(reserved);
        }
    }

    /// Create a widget under this one. `options.create_with` is looked up among
    /// the built-in widget types.
    pub fn new_widget(&self, options: WidgetOptions) -> Result<Widget> {
        self.new_widget_in(&WidgetRegistry::default(), options)
    }

    /// Like [`Widget::new_widget`] with widget types from `registry`.
    pub fn new_widget_in(&self, registry: &WidgetRegistry, options: WidgetOptions) -> Result<Widget> {
        let group = options.group.clone();
        let widget = registry.build(options)?;
        self.add_widget(&widget);
        if let Some(key) = group {
            self.add_to_group(key, &widget);
        }
        Ok(widget)
    }

    /// Detach `child`. Nothing is re-resolved or redrawn.
    pub fn remove_widget(&self, child: &Widget) -> bool {
        let removed = {
            let mut node = self.0.borrow_mut();
            let before = node.children.len();
            node.children.retain(|c| c != child);
            node.children.len() != before
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    fn child_position(&self, which: ChildRef<'_>) -> Option<usize> {
        let node = self.0.borrow();
        let len = node.children.len() as i64;
        match which {
            ChildRef::Index(i) => {
                let i = i64::from(i);
                let i = if i < 0 { len + i } else { i };
                (0..len).contains(&i).then_some(i as usize)
            }
            ChildRef::Widget(w) => node.children.iter().position(|c| c == w),
        }
    }

    /// Move a child to the front (drawn last). Returns `false` if not found.
    pub fn pull_to_front<'a>(&self, which: impl Into<ChildRef<'a>>) -> bool {
        let Some(pos) = self.child_position(which.into()) else {
            return false;
        };
        let mut node = self.0.borrow_mut();
        let child = node.children.remove(pos);
        node.children.push(child);
        true
    }

    /// Move a child to the back (drawn first). Returns `false` if not found.
    pub fn push_to_back<'a>(&self, which: impl Into<ChildRef<'a>>) -> bool {
        let Some(pos) = self.child_position(which.into()) else {
            return false;
        };
        let mut node = self.0.borrow_mut();
        let child = node.children.remove(pos);
        node.children.insert(0, child);
        true
    }

    pub fn add_to_group(&self, key: impl Into<CompactString>, widget: &Widget) {
        self.0
            .borrow_mut()
            .groups
            .entry(key.into())
            .or_default()
            .push(Rc::downgrade(&widget.0));
    }

    /// Live widgets recorded under `key` on this widget, in creation order.
    pub fn group(&self, key: &str) -> Vec<Widget> {
        self.0
            .borrow()
            .groups
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .filter_map(Weak::upgrade)
                    .map(Widget)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve hints against the parent and size the surface, then recurse
    /// into the children. Does nothing outside a rooted tree.
    pub fn update_geometry(&self) {
        if !self.has_root() {
            return;
        }
        if let Some(parent) = self.parent() {
            let (ph, pw, reserved) = {
                let p = parent.0.borrow();
                (
                    p.height.unwrap_or(0),
                    p.width.unwrap_or(0),
                    p.surface.reserved() as i32,
                )
            };
            let mut node = self.0.borrow_mut();
            if let Some(top) = node.pos_hint.top {
                node.top = convert(top, ph);
            }
            if let Some(left) = node.pos_hint.left {
                node.left = convert(left, pw);
            }
            if let Some(height) = node.size_hint.height {
                node.height = Some(convert(height, ph));
            }
            if let Some(width) = node.size_hint.width {
                node.width = Some(convert(width, pw));
            }
            if node.height.is_none() {
                node.height = Some(ph);
            }
            if node.width.is_none() {
                node.width = Some(pw - reserved);
            }
        }
        self.0.borrow_mut().resize_surface();
        self.update_children();
    }

    fn divide(&self) {
        let node = self.0.borrow();
        let Some((axis, at)) = node.split else {
            return;
        };
        let height = node.height.unwrap_or(0).max(0);
        let width = node.width.unwrap_or(0).max(0);
        let children: Vec<Widget> = node.children.iter().take(2).cloned().collect();
        drop(node);

        let bound = match axis {
            Axis::Vertical => height,
            Axis::Horizontal => width,
        };
        let first = convert(at, bound).clamp(0, bound);
        for (child, (offset, extent)) in children.iter().zip([(0, first), (first, bound - first)]) {
            let mut c = child.0.borrow_mut();
            c.pos_hint = PosHint::default();
            c.size_hint = SizeHint::default();
            match axis {
                Axis::Vertical => {
                    (c.top, c.left) = (offset, 0);
                    (c.height, c.width) = (Some(extent), Some(width));
                }
                Axis::Horizontal => {
                    (c.top, c.left) = (0, offset);
                    (c.height, c.width) = (Some(height), Some(extent));
                }
            }
        }
    }

    fn update_children(&self) {
        self.divide();
        for child in self.children() {
            child.update_geometry();
        }
    }

    /// Composite the subtree into this widget's surface, back to front.
    pub fn refresh(&self) {
        let children = {
            let mut node = self.0.borrow_mut();
            if node.erase_on_refresh {
                node.surface.erase();
            }
            node.children.clone()
        };
        for child in &children {
            child.refresh();
            let c = child.0.borrow();
            let mode = if c.transparent {
                Blit::Overlay
            } else {
                Blit::Overwrite
            };
            self.0
                .borrow_mut()
                .surface
                .blit(&c.surface, c.top, c.left, mode);
        }
    }

    pub fn set_on_press<F>(&self, handler: F)
    where
        F: FnMut(&Widget, &Key) -> bool + 'static,
    {
        self.0.borrow_mut().on_press = Some(Box::new(handler));
    }

    pub fn clear_on_press(&self) {
        self.0.borrow_mut().on_press = None;
    }

    /// Run this widget's own handler. Widgets without one never handle keys.
    pub fn on_press(&self, key: &Key) -> bool {
        let Some(mut handler) = self.0.borrow_mut().on_press.take() else {
            return false;
        };
        let handled = handler(self, key);
        let mut node = self.0.borrow_mut();
        if node.on_press.is_none() {
            node.on_press = Some(handler);
        }
        handled
    }

    /// Offer `key` to the children, front to back. Each child tries its own
    /// handler before its subtree; the first to handle the key wins.
    pub fn dispatch(&self, key: &Key) -> bool {
        self.children()
            .iter()
            .rev()
            .any(|child| child.on_press(key) || child.dispatch(key))
    }

    pub fn surface(&self) -> Ref<'_, Surface> {
        Ref::map(self.0.borrow(), |node| &node.surface)
    }

    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> R {
        f(&mut self.0.borrow_mut().surface)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.0.borrow().surface.cell(row, col).cloned()
    }

    pub fn row_text(&self, row: usize) -> String {
        self.0.borrow().surface.row_text(row)
    }

    pub fn read(&self, region: impl Into<Region>) -> Result<Vec<Vec<Cell>>> {
        self.0.borrow().surface.read(region)
    }

    pub fn write(&self, region: impl Into<Region>, fill: impl Into<Fill>) -> Result<()> {
        self.0.borrow_mut().surface.write(region, fill)
    }

    pub fn border(&self, style: BorderStyle, color: Option<Style>) {
        let mut node = self.0.borrow_mut();
        node.surface.border(style, color);
        node.has_border = true;
    }

    pub fn erase(&self) {
        self.0.borrow_mut().surface.erase();
    }

    pub fn roll(&self, shift: i32, axis: Axis) {
        self.0.borrow_mut().surface.roll(shift, axis);
    }

    pub fn scroll(&self, lines: i32) {
        self.0.borrow_mut().surface.scroll(lines);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widget/mod.rs"]
mod tests;
