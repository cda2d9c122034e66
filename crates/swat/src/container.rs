//! Ordered ownership of child widgets with id lookup.
//!
//! A [`Container`] owns its children exclusively. The id index over direct
//! children is built at `init` time; when two children share an id the first
//! one wins and the later one stays in the sequence unindexed.
//!
//! [`UiParent`] is the generic "add a child" entry point used when a tree is
//! assembled from heterogeneous [`UiObject`]s. Parents accept the kinds they
//! can hold and reject the rest with [`SwatError::TypeMismatch`].

use std::collections::HashMap;

use swat_html::Response;

use crate::error::{Result, SwatError};
use crate::table_view::{
    CellRenderer, TableViewColumn, TableViewGroup, TableViewRow, TableViewSpanningColumn,
};
use crate::widget::{find_descendant, find_descendant_mut, Widget, WidgetState};

/// Any object that can be placed in a widget tree.
#[derive(Debug)]
pub enum UiObject {
    Widget(Box<dyn Widget>),
    Column(TableViewColumn),
    SpanningColumn(TableViewSpanningColumn),
    Group(TableViewGroup),
    Row(Box<dyn TableViewRow>),
    Renderer(Box<dyn CellRenderer>),
}

impl UiObject {
    pub fn widget<W: Widget + 'static>(widget: W) -> Self {
        UiObject::Widget(Box::new(widget))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            UiObject::Widget(_) => "widget",
            UiObject::Column(_) => "column",
            UiObject::SpanningColumn(_) => "spanning column",
            UiObject::Group(_) => "group",
            UiObject::Row(_) => "row",
            UiObject::Renderer(_) => "cell renderer",
        }
    }
}

impl From<TableViewColumn> for UiObject {
    fn from(column: TableViewColumn) -> Self {
        UiObject::Column(column)
    }
}

impl From<TableViewSpanningColumn> for UiObject {
    fn from(column: TableViewSpanningColumn) -> Self {
        UiObject::SpanningColumn(column)
    }
}

impl From<TableViewGroup> for UiObject {
    fn from(group: TableViewGroup) -> Self {
        UiObject::Group(group)
    }
}

impl From<Box<dyn TableViewRow>> for UiObject {
    fn from(row: Box<dyn TableViewRow>) -> Self {
        UiObject::Row(row)
    }
}

impl From<Box<dyn CellRenderer>> for UiObject {
    fn from(renderer: Box<dyn CellRenderer>) -> Self {
        UiObject::Renderer(renderer)
    }
}

impl From<Box<dyn Widget>> for UiObject {
    fn from(widget: Box<dyn Widget>) -> Self {
        UiObject::Widget(widget)
    }
}

/// Something that accepts children by kind.
pub trait UiParent {
    fn add_child(&mut self, child: UiObject) -> Result<()>;
}

/// A widget that owns an ordered sequence of child widgets.
#[derive(Debug, Clone, Default)]
pub struct Container {
    state: WidgetState,
    children: Vec<Box<dyn Widget>>,
    index: Option<HashMap<String, usize>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Container {
            state: WidgetState::with_id(id),
            ..Default::default()
        }
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_child<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.add(widget);
        self
    }

    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.add_boxed(Box::new(widget));
    }

    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) {
        self.index = None;
        self.children.push(widget);
    }

    /// Removes and returns the first child with the given id.
    pub fn remove(&mut self, id: &str) -> Result<Box<dyn Widget>> {
        let position = self.position(id)?;
        self.index = None;
        Ok(self.children.remove(position))
    }

    /// Puts `widget` in place of the child with the given id, returning the old child.
    pub fn replace(&mut self, id: &str, widget: Box<dyn Widget>) -> Result<Box<dyn Widget>> {
        let position = self.position(id)?;
        self.index = None;
        Ok(std::mem::replace(&mut self.children[position], widget))
    }

    /// Removes every child.
    pub fn take_children(&mut self) -> Vec<Box<dyn Widget>> {
        self.index = None;
        std::mem::take(&mut self.children)
    }

    fn position(&self, id: &str) -> Result<usize> {
        let indexed = self.index.as_ref().and_then(|index| index.get(id).copied());
        indexed
            .or_else(|| self.children.iter().position(|c| c.id() == Some(id)))
            .ok_or_else(|| SwatError::not_found("widget", id))
    }

    /// The direct child with the given id.
    pub fn child(&self, id: &str) -> Result<&dyn Widget> {
        let position = self.position(id)?;
        Ok(self.children[position].as_ref())
    }

    pub fn child_mut(&mut self, id: &str) -> Result<&mut Box<dyn Widget>> {
        let position = self.position(id)?;
        Ok(&mut self.children[position])
    }

    /// Any descendant with the given id.
    pub fn descendant(&self, id: &str) -> Result<&dyn Widget> {
        find_descendant(self, id).ok_or_else(|| SwatError::not_found("widget", id))
    }

    pub fn descendant_mut(&mut self, id: &str) -> Result<&mut dyn Widget> {
        find_descendant_mut(self, id).ok_or_else(|| SwatError::not_found("widget", id))
    }

    /// The first descendant of type `T`.
    pub fn first_descendant<T: Widget + 'static>(&self) -> Option<&T> {
        crate::widget::descendants(self)
            .into_iter()
            .find_map(|w| w.downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Widget> {
        self.children.iter().map(|c| c.as_ref())
    }

    /// Displays every child in order.
    pub fn display_children(&self, out: &mut Response) -> Result<()> {
        for child in &self.children {
            child.display(out)?;
        }
        Ok(())
    }

    fn build_index(&mut self) {
        let mut index = HashMap::new();
        for (position, child) in self.children.iter().enumerate() {
            if let Some(id) = child.id() {
                if index.contains_key(id) {
                    tracing::debug!(id, "duplicate child id left unindexed");
                    continue;
                }
                index.insert(id.to_string(), position);
            }
        }
        self.index = Some(index);
    }
}

impl Widget for Container {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "container"
    }

    fn init(&mut self) -> Result<()> {
        self.build_index();
        for child in &mut self.children {
            child.init()?;
        }
        self.state.initialized = true;
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        self.display_children(out)
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.iter().collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        self.children
            .iter_mut()
            .map(|child| child.as_mut() as &mut dyn Widget)
            .collect()
    }
}

impl UiParent for Container {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        match child {
            UiObject::Widget(widget) => {
                self.add_boxed(widget);
                Ok(())
            }
            other => Err(SwatError::TypeMismatch {
                expected: "widget",
                found: other.kind_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_view::TableViewColumn;
    use crate::widget::tests::Leaf;

    fn container() -> Container {
        Container::with_id("root")
            .with_child(Leaf::new("a"))
            .with_child(Leaf::new("b"))
            .with_child(Container::with_id("inner").with_child(Leaf::new("deep")))
    }

    #[test]
    fn first_registered_id_wins_after_init() {
        let mut c = Container::new();
        let mut first = Leaf::new("dup");
        first.process_calls = 1;
        c.add(first);
        c.add(Leaf::new("dup"));
        c.init().unwrap();

        assert_eq!(c.len(), 2);
        let found = c.child("dup").unwrap().downcast_ref::<Leaf>().unwrap();
        assert_eq!(found.process_calls, 1);
    }

    #[test]
    fn unknown_child_is_not_found() {
        let c = container();
        assert!(matches!(
            c.child("missing"),
            Err(SwatError::NotFound { kind: "widget", .. })
        ));
    }

    #[test]
    fn descendant_lookup_walks_the_tree() {
        let mut c = container();
        assert_eq!(c.descendant("deep").unwrap().id(), Some("deep"));
        c.descendant_mut("deep").unwrap().set_visible(false);
        assert!(!c.descendant("deep").unwrap().is_visible());
    }

    #[test]
    fn remove_and_replace() {
        let mut c = container();
        let removed = c.remove("a").unwrap();
        assert_eq!(removed.id(), Some("a"));
        let old = c.replace("b", Box::new(Leaf::new("c"))).unwrap();
        assert_eq!(old.id(), Some("b"));
        assert_eq!(c.iter().filter_map(|w| w.id()).collect::<Vec<_>>(), vec!["c", "inner"]);
    }

    #[test]
    fn display_writes_children_in_order() {
        let c = container();
        let mut out = Response::new();
        c.display(&mut out).unwrap();
        assert_eq!(out.as_str(), "[a][b][deep]");
    }

    #[test]
    fn container_rejects_table_objects() {
        let mut c = Container::new();
        let err = c
            .add_child(TableViewColumn::new("price", "Price").into())
            .unwrap_err();
        assert!(matches!(
            err,
            SwatError::TypeMismatch {
                expected: "widget",
                found: "column"
            }
        ));
    }

    #[test]
    fn first_descendant_by_type() {
        let c = container();
        assert_eq!(c.first_descendant::<Leaf>().and_then(|p| p.id()), Some("a"));
    }

    #[test]
    fn process_skips_already_processed_children() {
        let request = crate::Request::new();
        let mut ctx = crate::ProcessContext::new(&request);
        let mut c = container();
        c.child_mut("a").unwrap().state_mut().processed = true;
        c.process(&mut ctx).unwrap();
        let a = c.child("a").unwrap().downcast_ref::<Leaf>().unwrap();
        let b = c.child("b").unwrap().downcast_ref::<Leaf>().unwrap();
        assert_eq!(a.process_calls, 0);
        assert_eq!(b.process_calls, 1);
    }
}
