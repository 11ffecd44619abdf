//! Indentation-structured layout descriptions.
//!
//! ```text
//! HSplit 3            # title bar 3 rows high, the rest below
//!     title
//!     VSplit .5       # halves, side by side
//!         left
//!         right: Layout
//! ```
//!
//! `HSplit n` stacks two children: the first gets rows `[0, n)`, the second
//! the remainder. `VSplit n` does the same with columns. An integer `n` is a
//! cell count (negative counts from the far edge), a decimal `n` is a share
//! of the parent. Any other line is a leaf, `name` or `name: Type`, created
//! through the widget registry. Splits divide their own extent whenever it
//! changes, so resizing the parent re-flows the whole layout.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::ui::core::geom::{Axis, Hint, PosHint, SizeHint};
use crate::ui::widget::{Widget, WidgetOptions, WidgetRegistry};

#[derive(Clone, Debug, PartialEq)]
enum Kind {
    Split { axis: Axis, at: Hint },
    Leaf { name: CompactString, tag: Option<CompactString> },
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    line: usize,
    kind: Kind,
    children: Vec<Entry>,
}

struct Frame {
    indent: usize,
    child_indent: Option<usize>,
    entry: Entry,
}

fn invalid(line: usize, reason: impl Into<String>) -> Error {
    Error::InvalidLayout {
        line,
        reason: reason.into(),
    }
}

/// Named leaves of a loaded layout, in document order.
#[derive(Clone, Debug, Default)]
pub struct LoadedLayout {
    leaves: Vec<(CompactString, Widget)>,
    index: FxHashMap<CompactString, usize>,
}

impl LoadedLayout {
    pub fn get(&self, name: &str) -> Option<&Widget> {
        self.index.get(name).map(|&i| &self.leaves[i].1)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.leaves.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.leaves.iter().map(|(name, w)| (name.as_str(), w))
    }

    fn insert(&mut self, line: usize, name: CompactString, widget: Widget) -> Result<()> {
        if self.index.contains_key(&name) {
            return Err(invalid(line, format!("duplicate widget name `{name}`")));
        }
        self.index.insert(name.clone(), self.leaves.len());
        self.leaves.push((name, widget));
        Ok(())
    }
}

/// Parse `text` and build it under `parent`. Each top-level entry fills the
/// parent. Nothing is attached when the text is invalid.
pub fn load_layout(text: &str, parent: &Widget, registry: &WidgetRegistry) -> Result<LoadedLayout> {
    let entries = parse(text)?;
    let staging = Widget::layout(WidgetOptions::new());
    let mut out = LoadedLayout::default();
    for entry in &entries {
        build(entry, &staging, full_slot(), registry, &mut out)?;
    }
    for child in staging.children() {
        parent.add_widget(&child);
    }
    tracing::debug!(widgets = out.len(), "layout loaded");
    Ok(out)
}

fn parse(text: &str) -> Result<Vec<Entry>> {
    let mut roots: Vec<Entry> = Vec::new();
    let mut root_indent: Option<usize> = None;
    let mut stack: Vec<Frame> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or_default().trim_end();
        if content.trim().is_empty() {
            continue;
        }
        let body = content.trim_start();
        let lead = &content[..content.len() - body.len()];
        if lead.contains('\t') {
            return Err(invalid(line, "indent with spaces, not tabs"));
        }
        let indent = lead.len();

        while stack.last().is_some_and(|f| f.indent >= indent) {
            close(&mut stack, &mut roots)?;
        }

        let expected = match stack.last_mut() {
            Some(parent) => {
                if let Kind::Leaf { name, .. } = &parent.entry.kind {
                    return Err(invalid(line, format!("leaf `{name}` cannot have children")));
                }
                parent.child_indent.get_or_insert(indent)
            }
            None => root_indent.get_or_insert(indent),
        };
        if *expected != indent {
            return Err(invalid(line, "indentation does not match any enclosing level"));
        }

        stack.push(Frame {
            indent,
            child_indent: None,
            entry: Entry {
                line,
                kind: parse_kind(body, line)?,
                children: Vec::new(),
            },
        });
    }

    while !stack.is_empty() {
        close(&mut stack, &mut roots)?;
    }
    Ok(roots)
}

fn close(stack: &mut Vec<Frame>, roots: &mut Vec<Entry>) -> Result<()> {
    let Some(frame) = stack.pop() else {
        return Ok(());
    };
    let entry = frame.entry;
    if let Kind::Split { axis, .. } = entry.kind {
        if entry.children.len() != 2 {
            let name = match axis {
                Axis::Vertical => "HSplit",
                Axis::Horizontal => "VSplit",
            };
            return Err(invalid(
                entry.line,
                format!("{name} needs exactly two children, found {}", entry.children.len()),
            ));
        }
    }
    match stack.last_mut() {
        Some(parent) => parent.entry.children.push(entry),
        None => roots.push(entry),
    }
    Ok(())
}

fn parse_kind(body: &str, line: usize) -> Result<Kind> {
    let mut words = body.split_whitespace();
    let axis = match words.next() {
        // HSplit stacks children top to bottom.
        Some("HSplit") => Axis::Vertical,
        Some("VSplit") => Axis::Horizontal,
        _ => return parse_leaf(body, line),
    };
    let size = words
        .next()
        .ok_or_else(|| invalid(line, "split is missing its size"))?;
    if words.next().is_some() {
        return Err(invalid(line, "unexpected text after split size"));
    }
    let at = parse_size(size).ok_or_else(|| invalid(line, format!("bad split size `{size}`")))?;
    Ok(Kind::Split { axis, at })
}

fn parse_leaf(body: &str, line: usize) -> Result<Kind> {
    let (name, tag) = match body.split_once(':') {
        Some((name, tag)) => (name.trim(), Some(tag.trim())),
        None => (body, None),
    };
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(invalid(line, format!("bad widget name `{name}`")));
    }
    if tag.is_some_and(str::is_empty) {
        return Err(invalid(line, format!("missing widget type after `{name}:`")));
    }
    Ok(Kind::Leaf {
        name: name.into(),
        tag: tag.map(CompactString::from),
    })
}

fn parse_size(s: &str) -> Option<Hint> {
    if s.contains('.') {
        let f: f64 = s.parse().ok()?;
        f.is_finite().then_some(Hint::Fraction(f))
    } else {
        s.parse().ok().map(Hint::Cells)
    }
}

type Slot = (PosHint, SizeHint);

fn full_slot() -> Slot {
    (
        PosHint::new(Hint::Cells(0), Hint::Cells(0)),
        SizeHint::full(),
    )
}

fn build(
    entry: &Entry,
    parent: &Widget,
    (pos_hint, size_hint): Slot,
    registry: &WidgetRegistry,
    out: &mut LoadedLayout,
) -> Result<()> {
    let mut options = WidgetOptions::new();
    options.pos_hint = pos_hint;
    options.size_hint = size_hint;

    match &entry.kind {
        Kind::Split { axis, at } => {
            let split = Widget::layout(options);
            split.set_kind(match axis {
                Axis::Vertical => "HSplit",
                Axis::Horizontal => "VSplit",
            });
            split.set_split(*axis, *at);
            parent.add_widget(&split);
            for child in &entry.children {
                build(child, &split, Slot::default(), registry, out)?;
            }
        }
        Kind::Leaf { name, tag } => {
            let widget = registry.create(tag.as_deref().unwrap_or("Widget"), options)?;
            parent.add_widget(&widget);
            out.insert(entry.line, name.clone(), widget)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/layout.rs"]
mod tests;
