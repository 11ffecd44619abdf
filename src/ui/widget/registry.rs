use compact_str::CompactString;
use rustc_hash::FxHashMap;

use super::{Widget, WidgetOptions};
use crate::error::{Error, Result};

pub type WidgetFactory = Box<dyn Fn(WidgetOptions) -> Widget>;

/// Tag → constructor map used by `create_with` and the layout loader.
pub struct WidgetRegistry {
    factories: FxHashMap<CompactString, WidgetFactory>,
}

impl WidgetRegistry {
    /// A registry with no types at all.
    pub fn empty() -> Self {
        Self {
            factories: FxHashMap::default(),
        }
    }

    /// `"Widget"` and `"Layout"`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("Widget", Widget::new);
        registry.register("Layout", Widget::layout);
        registry
    }

    /// Add or replace the factory for `tag`.
    pub fn register<F>(&mut self, tag: impl Into<CompactString>, factory: F)
    where
        F: Fn(WidgetOptions) -> Widget + 'static,
    {
        let tag = tag.into();
        tracing::debug!(%tag, "widget type registered");
        self.factories.insert(tag, Box::new(factory));
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(CompactString::as_str)
    }

    /// Construct a detached widget of type `tag`.
    pub fn create(&self, tag: &str, options: WidgetOptions) -> Result<Widget> {
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| Error::UnknownWidgetType(tag.to_string()))?;
        let widget = factory(options);
        widget.set_kind(tag);
        Ok(widget)
    }

    /// Construct a detached widget of type `options.create_with`, or a plain
    /// widget when unset.
    pub(crate) fn build(&self, options: WidgetOptions) -> Result<Widget> {
        match options.create_with.clone() {
            Some(tag) => self.create(&tag, options),
            None => Ok(Widget::new(options)),
        }
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widget/registry.rs"]
mod tests;
