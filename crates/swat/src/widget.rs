//! The widget lifecycle contract.
//!
//! Every component in a widget tree implements [`Widget`]. A tree goes
//! through three phases per request:
//!
//! 1. `init` is called exactly once, before anything else.
//! 2. `process` is called at most once, guarded by the `processed` flag.
//! 3. `display` may be called any number of times and writes markup into a
//!    [`Response`].
//!
//! Widgets are owned by their parent as `Box<dyn Widget>`. Trees are cloned
//! through [`WidgetClone`], which gives the replicator deep, independent
//! copies of a template subtree.

use std::any::Any;
use std::fmt;

use swat_html::{HtmlHeadEntrySet, Response};

use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;

/// State shared by all widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    pub id: Option<String>,
    pub visible: bool,
    pub processed: bool,
    pub initialized: bool,
    pub classes: Vec<String>,
    pub messages: Vec<Message>,
}

impl Default for WidgetState {
    fn default() -> Self {
        WidgetState {
            id: None,
            visible: true,
            processed: false,
            initialized: false,
            classes: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl WidgetState {
    pub fn new(id: Option<String>) -> Self {
        WidgetState {
            id,
            ..Default::default()
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new(Some(id.into()))
    }

    /// Base classes followed by the custom ones.
    pub fn css_classes(&self, base: &[&str]) -> Vec<String> {
        base.iter()
            .map(|c| c.to_string())
            .chain(self.classes.iter().cloned())
            .collect()
    }
}

/// Object-safe cloning and downcasting for widgets.
///
/// Implemented for every `Widget + Clone` type.
pub trait WidgetClone {
    fn clone_box(&self) -> Box<dyn Widget>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> WidgetClone for T
where
    T: Widget + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn Widget> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A component of a widget tree.
pub trait Widget: WidgetClone + fmt::Debug {
    fn state(&self) -> &WidgetState;

    fn state_mut(&mut self) -> &mut WidgetState;

    /// Writes this widget's markup.
    fn display(&self, out: &mut Response) -> Result<()>;

    /// Short name used in error messages.
    fn kind(&self) -> &'static str {
        "widget"
    }

    fn id(&self) -> Option<&str> {
        self.state().id.as_deref()
    }

    fn is_visible(&self) -> bool {
        self.state().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.state_mut().visible = visible;
    }

    fn is_processed(&self) -> bool {
        self.state().processed
    }

    fn is_initialized(&self) -> bool {
        self.state().initialized
    }

    fn add_class(&mut self, class: &str) {
        self.state_mut().classes.push(class.to_string());
    }

    /// Initializes this widget and its children.
    fn init(&mut self) -> Result<()> {
        for child in self.children_mut() {
            child.init()?;
        }
        self.state_mut().initialized = true;
        Ok(())
    }

    /// Reads submitted data, then processes children not yet processed.
    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state_mut().processed = true;
        for child in self.children_mut() {
            if !child.is_processed() {
                child.process(ctx)?;
            }
        }
        Ok(())
    }

    fn add_message(&mut self, message: Message) {
        self.state_mut().messages.push(message);
    }

    /// Messages of this widget and every descendant.
    fn messages(&self) -> Vec<Message> {
        let mut messages = self.state().messages.clone();
        for child in self.children() {
            messages.extend(child.messages());
        }
        messages
    }

    fn has_message(&self) -> bool {
        !self.state().messages.is_empty() || self.children().iter().any(|c| c.has_message())
    }

    fn children(&self) -> Vec<&dyn Widget> {
        Vec::new()
    }

    /// Mutable view of the same children [`children`](Self::children) lists.
    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        Vec::new()
    }

    /// Stylesheets and scripts this widget and its children need.
    fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        for child in self.children() {
            set.add_set(&child.head_entries());
        }
        set
    }

    /// Whether this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Id of the first visible focusable widget in this subtree.
    fn focusable_id(&self) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        if self.is_focusable() {
            if let Some(id) = self.id() {
                return Some(id.to_string());
            }
        }
        self.children().into_iter().find_map(|c| c.focusable_id())
    }

    /// Rewrites the id of this widget and of every descendant.
    fn rewrite_ids(&mut self, rewrite: &dyn Fn(&str) -> String) {
        if let Some(id) = self.state().id.as_deref() {
            let new_id = rewrite(id);
            self.state_mut().id = Some(new_id);
        }
        for child in self.children_mut() {
            child.rewrite_ids(rewrite);
        }
    }
}

impl<'w> dyn Widget + 'w {
    pub fn downcast_ref<T: Widget + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// All descendants of `widget` in depth-first pre-order.
pub fn descendants(widget: &dyn Widget) -> Vec<&dyn Widget> {
    let mut found = Vec::new();
    for child in widget.children() {
        found.push(child);
        found.extend(descendants(child));
    }
    found
}

/// The first descendant with the given id.
pub fn find_descendant<'a>(widget: &'a dyn Widget, id: &str) -> Option<&'a dyn Widget> {
    descendants(widget)
        .into_iter()
        .find(|w| w.id() == Some(id))
}

/// Mutable form of [`find_descendant`].
pub fn find_descendant_mut<'a>(widget: &'a mut dyn Widget, id: &str) -> Option<&'a mut dyn Widget> {
    for child in widget.children_mut() {
        if child.id() == Some(id) {
            return Some(child);
        }
        if let Some(found) = find_descendant_mut(child, id) {
            return Some(found);
        }
    }
    None
}
