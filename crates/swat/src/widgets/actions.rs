use swat_html::{escape_js_string, HtmlHeadEntry, HtmlHeadEntrySet, HtmlTag, Response};

use super::button::Button;
use super::flydown::Flydown;
use crate::error::Result;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// One entry of an [`Actions`] menu, optionally with a widget shown when selected.
#[derive(Debug, Clone)]
pub struct ActionItem {
    id: String,
    title: String,
    widget: Option<Box<dyn Widget>>,
}

impl ActionItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        ActionItem {
            id: id.into(),
            title: title.into(),
            widget: None,
        }
    }

    pub fn with_widget<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.widget = Some(Box::new(widget));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn widget(&self) -> Option<&dyn Widget> {
        self.widget.as_deref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut Box<dyn Widget>> {
        self.widget.as_mut()
    }
}

/// An action menu: a flydown of items, an apply button, and a panel per
/// item holding its widget.
///
/// Processing reads the chosen item and processes only that item's widget.
#[derive(Debug, Clone)]
pub struct Actions {
    state: WidgetState,
    items: Vec<ActionItem>,
    flydown: Flydown,
    apply_button: Button,
    selected: Option<String>,
    auto_reset: bool,
}

impl Actions {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Actions {
            flydown: Flydown::new(format!("{}_action_flydown", id), "Action"),
            apply_button: Button::new(format!("{}_apply_button", id), "Apply"),
            state: WidgetState::with_id(id),
            items: Vec::new(),
            selected: None,
            auto_reset: true,
        }
    }

    pub fn with_item(mut self, item: ActionItem) -> Self {
        self.add_item(item);
        self
    }

    pub fn add_item(&mut self, item: ActionItem) {
        self.flydown.add_option(item.id.as_str(), item.title.as_str());
        self.items.push(item);
    }

    /// Whether the flydown is cleared after processing.
    pub fn auto_reset(mut self, auto_reset: bool) -> Self {
        self.auto_reset = auto_reset;
        self
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&ActionItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut ActionItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// The item chosen in the last submission.
    pub fn selected(&self) -> Option<&ActionItem> {
        self.selected.as_deref().and_then(|id| self.item(id))
    }

    pub fn flydown(&self) -> &Flydown {
        &self.flydown
    }

    pub fn apply_button(&self) -> &Button {
        &self.apply_button
    }

    fn item_div_id(&self, item_id: &str) -> String {
        format!("{}_{}", self.id().unwrap_or(""), item_id)
    }

    fn inline_script(&self) -> Option<String> {
        let id = self.id()?;
        let items = self
            .items
            .iter()
            .map(|i| format!("'{}'", escape_js_string(&i.id)))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "var {}_obj = new SwatActions('{}', [{}]);",
            id,
            escape_js_string(id),
            items
        ))
    }
}

impl Widget for Actions {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "actions"
    }

    fn init(&mut self) -> Result<()> {
        self.flydown.init()?;
        self.apply_button.init()?;
        for item in &mut self.items {
            if let Some(widget) = item.widget.as_mut() {
                widget.init()?;
            }
        }
        self.state.initialized = true;
        Ok(())
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state.processed = true;
        self.flydown.process(ctx)?;
        self.apply_button.process(ctx)?;

        self.selected = self.flydown.value().map(str::to_string);
        if let Some(selected) = self.selected.clone() {
            if let Some(widget) = self.item_mut(&selected).and_then(|i| i.widget.as_mut()) {
                widget.process(ctx)?;
            }
            tracing::debug!(actions = ?self.state.id, action = %selected, "action selected");
        }
        if self.auto_reset {
            self.flydown.reset();
        }
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        let mut div = HtmlTag::new("div");
        div.set_opt_attr("id", self.id());
        div.set_classes(self.state.css_classes(&["swat-actions"]));
        div.open(out);

        out.push_str(r#"<div class="swat-actions-controls">"#);
        self.flydown.display(out)?;
        out.push_str(" ");
        self.apply_button.display(out)?;
        out.push_str("</div>");

        let current = self.selected.as_deref();
        for item in &self.items {
            let Some(widget) = item.widget.as_ref() else {
                continue;
            };
            let class = if current == Some(item.id.as_str()) {
                "swat-visible"
            } else {
                "swat-hidden"
            };
            let panel = HtmlTag::new("div")
                .attr("id", self.item_div_id(&item.id))
                .attr("class", class);
            panel.open(out);
            widget.display(out)?;
            panel.close(out);
        }

        div.close(out);
        if let Some(script) = self.inline_script() {
            out.push_script(&script);
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Widget> {
        let mut children: Vec<&dyn Widget> = vec![&self.flydown as &dyn Widget, &self.apply_button];
        children.extend(self.items.iter().filter_map(|i| i.widget()));
        children
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        let mut children: Vec<&mut dyn Widget> =
            vec![&mut self.flydown as &mut dyn Widget, &mut self.apply_button];
        children.extend(
            self.items
                .iter_mut()
                .filter_map(|i| i.widget.as_mut())
                .map(|w| w.as_mut() as &mut dyn Widget),
        );
        children
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        set.add_entry(HtmlHeadEntry::javascript(
            "packages/swat/javascript/swat-actions.js",
        ));
        for child in self.children() {
            set.add_set(&child.head_entries());
        }
        set
    }
}
