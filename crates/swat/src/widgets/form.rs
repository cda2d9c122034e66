use swat_html::{escape_js_string, HtmlHeadEntry, HtmlHeadEntrySet, HtmlTag, Response};

use super::fieldset::Fieldset;
use crate::config::FormConfig;
use crate::container::{Container, UiObject, UiParent};
use crate::error::Result;
use crate::request::{FieldValue, Method, ProcessContext, Request};
use crate::widget::{Widget, WidgetState};

/// Field whose value names the form that was submitted.
pub const PROCESS_FIELD: &str = "_swat_form_process";

/// Repeated field listing the names of the hidden fields to restore.
pub const HIDDEN_FIELD: &str = "_swat_form_hidden_fields";

/// A container that only processes its children when the request was
/// submitted from this form.
///
/// Hidden fields survive a round trip: each one is written with a manifest
/// entry, and on the next submission every manifest name present in the data
/// is restored.
#[derive(Debug, Clone)]
pub struct Form {
    container: Container,
    method: Method,
    action: String,
    encoding_type: Option<String>,
    autofocus: bool,
    default_focused_control: Option<String>,
    hidden_fields: Vec<(String, FieldValue)>,
    clicked_button: Option<String>,
}

impl Form {
    /// Creates a form posting to `#` with the default configuration.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, &FormConfig::default())
    }

    /// Creates a form taking its method and action from `config`.
    pub fn with_config(id: impl Into<String>, config: &FormConfig) -> Self {
        Form {
            container: Container::with_id(id),
            method: config.method,
            action: config.action.clone(),
            encoding_type: None,
            autofocus: false,
            default_focused_control: None,
            hidden_fields: Vec::new(),
            clicked_button: None,
        }
    }

    /// The request partition this form submits to and reads from.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Switches between `post` and `get`.
    ///
    /// The form only ever reads the matching partition of a request, so a
    /// `get` form ignores posted data even when the marker is present.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// The URL written into the `action` attribute.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Sets the URL the form submits to.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    /// Sets the `enctype` attribute, such as `multipart/form-data`. `None`
    /// leaves it out.
    pub fn set_encoding_type(&mut self, encoding_type: Option<String>) {
        self.encoding_type = encoding_type;
    }

    /// Focus a control when the page loads.
    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    /// The control focused by `autofocus`. Defaults to the first focusable
    /// descendant.
    pub fn set_default_focused_control(&mut self, id: Option<String>) {
        self.default_focused_control = id;
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_child<W: Widget + 'static>(mut self, widget: W) -> Self {
        self.container.add(widget);
        self
    }

    /// Appends a child widget.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.container.add(widget);
    }

    /// Adds `widget` inside a fieldset titled `title`.
    pub fn add_with_field<W: Widget + 'static>(&mut self, widget: W, title: impl Into<String>) {
        self.container
            .add(Fieldset::new().with_title(title).with_child(widget));
    }

    /// The children of this form.
    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Sets a hidden field. A later value for the same name replaces the
    /// earlier one.
    pub fn add_hidden_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.hidden_fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.hidden_fields.push((name, value)),
        }
    }

    /// A stored hidden field: one set with
    /// [`add_hidden_field`](Self::add_hidden_field) or restored from the
    /// manifest during processing.
    pub fn hidden_field(&self, name: &str) -> Option<&FieldValue> {
        self.hidden_fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Scalar value of a stored hidden field. Lists yield `None`.
    pub fn hidden_field_str(&self, name: &str) -> Option<&str> {
        self.hidden_field(name).and_then(FieldValue::as_str)
    }

    /// A hidden field, falling back to the raw submitted value.
    ///
    /// Before `process` has run on a submitted form the stored fields are not
    /// restored yet, so the value is read straight from the request. Once the
    /// form is processed, or if `request` was not submitted from it, only the
    /// stored fields are consulted.
    pub fn hidden_field_from<'a>(
        &'a self,
        request: &'a Request,
        name: &str,
    ) -> Option<&'a FieldValue> {
        if let Some(value) = self.hidden_field(name) {
            return Some(value);
        }
        if self.is_processed() || !self.is_submitted(request) {
            return None;
        }
        request.data(self.method).get(name)
    }

    /// Removes every stored hidden field. The process marker is still written.
    pub fn clear_hidden_fields(&mut self) {
        self.hidden_fields.clear();
    }

    /// Id of the button that submitted this form.
    pub fn clicked_button(&self) -> Option<&str> {
        self.clicked_button.as_deref()
    }

    /// Whether `request` was submitted from this form.
    pub fn is_submitted(&self, request: &Request) -> bool {
        match self.id() {
            Some(id) => request.data(self.method).get_str(PROCESS_FIELD) == Some(id),
            None => false,
        }
    }

    fn restore_hidden_fields(&mut self, request: &Request) {
        let data = request.data(self.method);
        for name in data.get_list(HIDDEN_FIELD) {
            if let Some(value) = data.get(&name) {
                self.add_hidden_field(name.as_str(), value.clone());
            }
        }
    }

    fn display_hidden_fields(&self, out: &mut Response) {
        let mut fields = self.hidden_fields.clone();
        if let Some(id) = self.id() {
            match fields.iter_mut().find(|(n, _)| n == PROCESS_FIELD) {
                Some(slot) => slot.1 = FieldValue::from(id),
                None => fields.push((PROCESS_FIELD.to_string(), FieldValue::from(id))),
            }
        }

        out.push_str(r#"<div class="swat-input-hidden">"#);
        for (name, value) in &fields {
            match value {
                FieldValue::List(values) => {
                    let list_name = format!("{}[]", name);
                    for v in values {
                        hidden_input(&list_name, v).display(out);
                    }
                }
                FieldValue::Scalar(v) => hidden_input(name, v).display(out),
            }
            hidden_input(&format!("{}[]", HIDDEN_FIELD), name).display(out);
        }
        out.push_str("</div>");
    }

    fn inline_script(&self) -> Option<String> {
        let id = self.id()?;
        let mut script = format!("var {}_obj = new SwatForm('{}');", id, escape_js_string(id));
        if self.autofocus {
            let focus = self
                .default_focused_control
                .clone()
                .or_else(|| self.container.focusable_id());
            if let Some(focus) = focus {
                script.push_str(&format!(
                    "\n{}_obj.setDefaultFocus('{}');",
                    id,
                    escape_js_string(&focus)
                ));
            }
        }
        Some(script)
    }
}

fn hidden_input(name: &str, value: &str) -> HtmlTag {
    HtmlTag::new("input")
        .attr("type", "hidden")
        .attr("name", name)
        .attr("value", value)
}

impl Widget for Form {
    fn state(&self) -> &WidgetState {
        self.container.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.container.state_mut()
    }

    fn kind(&self) -> &'static str {
        "form"
    }

    fn init(&mut self) -> Result<()> {
        if self.id().is_none() {
            tracing::warn!("form without an id can never be submitted");
        }
        self.container.init()
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        let request = ctx.request();
        if !self.is_submitted(request) {
            tracing::debug!(form = ?self.id(), method = %self.method, "form not submitted");
            return Ok(());
        }
        let Some(id) = self.id().map(str::to_string) else {
            return Ok(());
        };
        self.state_mut().processed = true;
        self.restore_hidden_fields(request);

        let frame = ctx.enter_form(&id, self.method);
        let mut result = Ok(());
        for child in self.container.children_mut() {
            if !child.is_processed() {
                result = child.process(ctx);
                if result.is_err() {
                    break;
                }
            }
        }
        let scope = ctx.leave_form(frame);
        self.clicked_button = scope.and_then(|s| s.clicked_button);
        tracing::debug!(form = %id, clicked = ?self.clicked_button, "form processed");
        result
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.is_visible() {
            return Ok(());
        }
        let mut form = HtmlTag::new("form");
        form.set_opt_attr("id", self.id());
        form.set_attr("method", self.method.as_str());
        form.set_opt_attr("enctype", self.encoding_type.as_deref());
        form.set_attr("action", self.action.as_str());
        form.set_classes(self.state().css_classes(&["swat-form"]));

        form.open(out);
        self.container.display_children(out)?;
        self.display_hidden_fields(out);
        form.close(out);

        if let Some(script) = self.inline_script() {
            out.push_script(&script);
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn Widget> {
        self.container.children()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Widget> {
        self.container.children_mut()
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        set.add_entry(HtmlHeadEntry::javascript(
            "packages/swat/javascript/swat-form.js",
        ));
        set.add_set(&self.container.head_entries());
        set
    }
}

impl UiParent for Form {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        self.container.add_child(child)
    }
}
