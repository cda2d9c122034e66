use swat_html::{ContentType, HtmlHeadEntrySet, HtmlTag, Response};

use crate::container::{Container, UiObject, UiParent};
use crate::error::Result;
use crate::widget::{Widget, WidgetState};

/// A titled group of widgets drawn as `fieldset` and `legend`.
#[derive(Debug, Clone, Default)]
pub struct Fieldset {
    container: Container,
    title: Option<String>,
}

impl Fieldset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Fieldset {
            container: Container::with_id(id),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_child<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.container.add(widget);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.container.add(widget);
    }

    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) {
        self.container.add_boxed(widget);
    }
}

impl Widget for Fieldset {
    fn state(&self) -> &WidgetState {
        self.container.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.container.state_mut()
    }

    fn kind(&self) -> &'static str {
        "fieldset"
    }

    fn init(&mut self) -> Result<()> {
        self.container.init()
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        let mut fieldset = HtmlTag::new("fieldset");
        fieldset.set_opt_attr("id", self.id());
        fieldset.set_classes(self.state().css_classes(&["swat-fieldset"]));
        fieldset.open(out);
        if let Some(title) = &self.title {
            HtmlTag::new("legend")
                .content(title.as_str(), ContentType::Plain)
                .display(out);
        }
        self.container.display_children(out)?;
        fieldset.close(out);
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.container.children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        self.container.children_mut()
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        self.container.head_entries()
    }
}

impl UiParent for Fieldset {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        self.container.add_child(child)
    }
}

/// A container drawn as a `div`.
#[derive(Debug, Clone, Default)]
pub struct DisplayableContainer {
    container: Container,
}

impl DisplayableContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        DisplayableContainer {
            container: Container::with_id(id),
        }
    }

    pub fn with_child<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.container.add(widget);
        self
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.container.add(widget);
    }
}

impl Widget for DisplayableContainer {
    fn state(&self) -> &WidgetState {
        self.container.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.container.state_mut()
    }

    fn kind(&self) -> &'static str {
        "displayable container"
    }

    fn init(&mut self) -> Result<()> {
        self.container.init()
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        let mut div = HtmlTag::new("div");
        div.set_opt_attr("id", self.id());
        div.set_classes(self.state().css_classes(&["swat-displayable-container"]));
        div.open(out);
        self.container.display_children(out)?;
        div.close(out);
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.container.children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        self.container.children_mut()
    }
}

impl UiParent for DisplayableContainer {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        self.container.add_child(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Entry;

    #[test]
    fn fieldset_draws_legend_before_children() {
        let fieldset = Fieldset::with_id("contact")
            .with_title("Contact & Address")
            .with_child(Entry::new("email", "Email"));
        let mut out = Response::new();
        fieldset.display(&mut out).unwrap();
        assert_eq!(
            out.as_str(),
            concat!(
                r#"<fieldset id="contact" class="swat-fieldset">"#,
                "<legend>Contact &amp; Address</legend>",
                r#"<input type="text" name="email" id="email" class="swat-entry" value="" />"#,
                "</fieldset>"
            )
        );
    }

    #[test]
    fn displayable_container_is_a_div() {
        let div = DisplayableContainer::new();
        let mut out = Response::new();
        div.display(&mut out).unwrap();
        assert_eq!(out.as_str(), r#"<div class="swat-displayable-container"></div>"#);
    }

    #[test]
    fn messages_bubble_up_from_children() {
        let mut fieldset = Fieldset::new().with_child(Entry::new("email", "Email"));
        fieldset
            .container_mut()
            .child_mut("email")
            .unwrap()
            .add_message(crate::Message::error("bad"));
        assert!(fieldset.has_message());
        assert_eq!(fieldset.messages().len(), 1);
    }
}
