use swat_html::{HtmlHeadEntrySet, HtmlTag, Response};

use super::fieldset::Fieldset;
use crate::container::{Container, UiObject, UiParent};
use crate::error::{Result, SwatError};
use crate::widget::{descendants, find_descendant, find_descendant_mut, Widget, WidgetState};

/// Repeats its children once per replicator key.
///
/// The children added before `init` are a template. At `init` they are
/// detached and deep-cloned once per key; every id in a clone, descendants
/// included, gets the suffix `_<replicator id><key>`. Each copy of the
/// template is wrapped in a fieldset titled with the key's title.
#[derive(Debug, Clone)]
pub struct Replicator {
    container: Container,
    replicators: Option<Vec<(String, String)>>,
    replicated: Vec<(String, Vec<String>)>,
}

impl Replicator {
    pub fn new(id: impl Into<String>) -> Self {
        Replicator {
            container: Container::with_id(id),
            replicators: None,
            replicated: Vec::new(),
        }
    }

    /// Sets the ordered `(key, title)` pairs to replicate for.
    pub fn with_replicators<I, K, T>(mut self, replicators: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.set_replicators(replicators);
        self
    }

    pub fn set_replicators<I, K, T>(&mut self, replicators: I)
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        self.replicators = Some(
            replicators
                .into_iter()
                .map(|(k, t)| (k.into(), t.into()))
                .collect(),
        );
    }

    pub fn with_child<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.container.add(widget);
        self
    }

    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.container.add(widget);
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Keys replicated so far, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.replicated.iter().map(|(k, _)| k.as_str())
    }

    fn suffix(&self, key: &str) -> String {
        format!("_{}{}", self.id().unwrap_or(""), key)
    }

    fn locate(&self, widget_id: &str, key: &str) -> Result<(usize, String)> {
        let position = self
            .replicated
            .iter()
            .position(|(k, ids)| k == key && ids.iter().any(|id| id == widget_id))
            .ok_or_else(|| SwatError::not_found("replicated widget", &format!("{}/{}", widget_id, key)))?;
        Ok((position, format!("{}{}", widget_id, self.suffix(key))))
    }

    /// The clone of `widget_id` made for `key`.
    pub fn widget(&self, widget_id: &str, key: &str) -> Result<&dyn Widget> {
        let (position, cloned_id) = self.locate(widget_id, key)?;
        self.container
            .iter()
            .nth(position)
            .and_then(|fieldset| find_descendant(fieldset, &cloned_id))
            .ok_or_else(|| SwatError::not_found("widget", &cloned_id))
    }

    pub fn widget_mut(&mut self, widget_id: &str, key: &str) -> Result<&mut dyn Widget> {
        let (position, cloned_id) = self.locate(widget_id, key)?;
        self.container
            .children_mut()
            .into_iter()
            .nth(position)
            .and_then(|fieldset| find_descendant_mut(fieldset, &cloned_id))
            .ok_or_else(|| SwatError::not_found("widget", &cloned_id))
    }

    fn replicate(&mut self, replicators: Vec<(String, String)>) {
        let template = self.container.take_children();
        let template_ids: Vec<String> = template
            .iter()
            .flat_map(|child| {
                std::iter::once(child.as_ref())
                    .chain(descendants(child.as_ref()))
                    .filter_map(|w| w.id().map(str::to_string))
                    .collect::<Vec<_>>()
            })
            .collect();

        for (key, title) in replicators {
            let suffix = self.suffix(&key);
            let mut fieldset = Fieldset::new().with_title(title);
            for child in &template {
                let mut copy = child.clone();
                copy.rewrite_ids(&|id| format!("{}{}", id, suffix));
                fieldset.add_boxed(copy);
            }
            self.container.add(fieldset);
            self.replicated.push((key, template_ids.clone()));
        }
        tracing::debug!(
            replicator = ?self.id(),
            copies = self.replicated.len(),
            "replicated template"
        );
    }
}

impl Widget for Replicator {
    fn state(&self) -> &WidgetState {
        self.container.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.container.state_mut()
    }

    fn kind(&self) -> &'static str {
        "replicator"
    }

    fn init(&mut self) -> Result<()> {
        if let Some(replicators) = self.replicators.take() {
            self.replicate(replicators);
        }
        self.container.init()
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        let mut div = HtmlTag::new("div");
        div.set_opt_attr("id", self.id());
        div.set_classes(self.state().css_classes(&["swat-replicator"]));
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

    fn head_entries(&self) -> HtmlHeadEntrySet {
        self.container.head_entries()
    }
}

impl UiParent for Replicator {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        self.container.add_child(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Entry, Fieldset};

    fn replicator() -> Replicator {
        let mut replicator = Replicator::new("people")
            .with_replicators([("a", "First"), ("b", "Second")])
            .with_child(Entry::new("name", "Name"))
            .with_child(Fieldset::with_id("extra").with_child(Entry::new("email", "Email")));
        replicator.init().unwrap();
        replicator
    }

    #[test]
    fn clones_are_suffixed_per_key() {
        let replicator = replicator();
        assert_eq!(replicator.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(replicator.widget("name", "a").unwrap().id(), Some("name_peoplea"));
        assert_eq!(replicator.widget("name", "b").unwrap().id(), Some("name_peopleb"));
        assert_eq!(
            replicator.widget("email", "b").unwrap().id(),
            Some("email_peopleb")
        );
    }

    #[test]
    fn unknown_lookups_fail() {
        let replicator = replicator();
        assert!(matches!(
            replicator.widget("name", "c"),
            Err(SwatError::NotFound { .. })
        ));
        assert!(replicator.widget("missing", "a").is_err());
    }

    #[test]
    fn displays_titled_fieldsets() {
        let replicator = replicator();
        let mut out = Response::new();
        replicator.display(&mut out).unwrap();
        let html = out.into_string();
        assert!(html.starts_with(r#"<div id="people" class="swat-replicator">"#));
        assert!(html.contains("<legend>First</legend>"));
        assert!(html.contains("<legend>Second</legend>"));
        assert!(html.contains(r#"id="name_peoplea""#));
        assert!(!html.contains(r#"id="name""#));
    }

    #[test]
    fn without_replicators_children_stay() {
        let mut replicator = Replicator::new("people").with_child(Entry::new("name", "Name"));
        replicator.init().unwrap();
        assert_eq!(replicator.container().len(), 1);
        assert!(replicator.container().child("name").is_ok());
    }
}
