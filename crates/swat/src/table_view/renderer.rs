//! Cell renderers: what a column draws inside a cell for one row.
//!
//! A renderer is bound to row fields through [`Binding`]s and is invoked
//! once per row. Renderers that take input (checkbox, entry) name their
//! inputs after the id of the column they sit in, which is passed to
//! `process` and `render`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::Value;
use swat_html::{ContentType, HtmlHeadEntrySet, HtmlTag, Response};

use super::model::{field, is_truthy, value_to_string};
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;

/// Where a renderer property gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The same value for every row.
    Literal(Value),
    /// A dot-path into the row.
    Field(String),
}

impl Binding {
    pub fn field(path: impl Into<String>) -> Self {
        Binding::Field(path.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Binding::Literal(value.into())
    }

    pub fn resolve<'a>(&'a self, row: &'a Value) -> Option<&'a Value> {
        match self {
            Binding::Literal(value) => Some(value),
            Binding::Field(path) => field(row, path),
        }
    }

    pub fn resolve_string(&self, row: &Value) -> String {
        self.resolve(row).map(value_to_string).unwrap_or_default()
    }

    pub fn is_truthy(&self, row: &Value) -> bool {
        self.resolve(row).is_some_and(is_truthy)
    }
}

/// Object-safe cloning for renderers.
pub trait RendererClone {
    fn clone_box(&self) -> Box<dyn CellRenderer>;
}

impl<T> RendererClone for T
where
    T: CellRenderer + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn CellRenderer> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn CellRenderer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Draws the content of one cell for one row.
pub trait CellRenderer: RendererClone + fmt::Debug {
    /// Writes the cell content for `row`.
    fn render(&self, row: &Value, column_id: &str, out: &mut Response) -> Result<()>;

    /// CSS class given to cells holding this renderer.
    fn css_class(&self) -> &'static str;

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn process(&mut self, _ctx: &mut ProcessContext<'_>, _column_id: &str) -> Result<()> {
        Ok(())
    }

    /// Per-row visibility.
    fn is_visible_for(&self, _row: &Value) -> bool {
        true
    }

    fn messages_for(&self, _row: &Value) -> Vec<Message> {
        Vec::new()
    }

    fn has_message_for(&self, row: &Value) -> bool {
        !self.messages_for(row).is_empty()
    }

    /// Attributes this renderer adds to the row's `tr`.
    fn tr_attributes(&self, _row: &Value) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Values selected by the user, for renderers that offer a selection.
    fn selected_items(&self) -> Option<Vec<String>> {
        None
    }

    fn inline_script(&self, _column_id: &str) -> Option<String> {
        None
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        HtmlHeadEntrySet::new()
    }
}

fn visible_for(binding: &Option<Binding>, row: &Value) -> bool {
    binding.as_ref().map_or(true, |b| b.is_truthy(row))
}

/// Plain or markup text.
#[derive(Debug, Clone)]
pub struct TextCellRenderer {
    text: Binding,
    content_type: ContentType,
    visible: Option<Binding>,
}

impl TextCellRenderer {
    pub fn new(text: Binding) -> Self {
        TextCellRenderer {
            text,
            content_type: ContentType::Plain,
            visible: None,
        }
    }

    /// Renders the field at `path`.
    pub fn field(path: impl Into<String>) -> Self {
        Self::new(Binding::field(path))
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn visible_when(mut self, binding: Binding) -> Self {
        self.visible = Some(binding);
        self
    }
}

impl CellRenderer for TextCellRenderer {
    fn render(&self, row: &Value, _column_id: &str, out: &mut Response) -> Result<()> {
        out.push_text(&self.text.resolve_string(row), self.content_type);
        Ok(())
    }

    fn css_class(&self) -> &'static str {
        "swat-text-cell-renderer"
    }

    fn is_visible_for(&self, row: &Value) -> bool {
        visible_for(&self.visible, row)
    }
}

/// A link whose href has `%s` replaced by a bound value.
#[derive(Debug, Clone)]
pub struct LinkCellRenderer {
    link: String,
    link_value: Option<Binding>,
    text: Binding,
    content_type: ContentType,
    visible: Option<Binding>,
}

impl LinkCellRenderer {
    pub fn new(link: impl Into<String>, text: Binding) -> Self {
        LinkCellRenderer {
            link: link.into(),
            link_value: None,
            text,
            content_type: ContentType::Plain,
            visible: None,
        }
    }

    /// The value substituted for `%s` in the link.
    pub fn link_value(mut self, binding: Binding) -> Self {
        self.link_value = Some(binding);
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn visible_when(mut self, binding: Binding) -> Self {
        self.visible = Some(binding);
        self
    }

    pub fn href(&self, row: &Value) -> String {
        match &self.link_value {
            Some(binding) => self.link.replacen("%s", &binding.resolve_string(row), 1),
            None => self.link.clone(),
        }
    }
}

impl CellRenderer for LinkCellRenderer {
    fn render(&self, row: &Value, _column_id: &str, out: &mut Response) -> Result<()> {
        let mut anchor = HtmlTag::new("a");
        anchor.set_attr("href", self.href(row));
        anchor.set_content(self.text.resolve_string(row), self.content_type);
        anchor.display(out);
        Ok(())
    }

    fn css_class(&self) -> &'static str {
        "swat-link-cell-renderer"
    }

    fn is_visible_for(&self, row: &Value) -> bool {
        visible_for(&self.visible, row)
    }
}

/// A per-row checkbox. The checked values are the renderer's selection.
#[derive(Debug, Clone)]
pub struct CheckboxCellRenderer {
    value: Binding,
    selected: Vec<String>,
    visible: Option<Binding>,
}

impl CheckboxCellRenderer {
    pub fn new(value: Binding) -> Self {
        CheckboxCellRenderer {
            value,
            selected: Vec::new(),
            visible: None,
        }
    }

    pub fn visible_when(mut self, binding: Binding) -> Self {
        self.visible = Some(binding);
        self
    }

    /// Preselects values, as if they had been submitted.
    pub fn set_selected<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = values.into_iter().map(Into::into).collect();
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }
}

impl CellRenderer for CheckboxCellRenderer {
    fn render(&self, row: &Value, column_id: &str, out: &mut Response) -> Result<()> {
        let value = self.value.resolve_string(row);
        let mut input = HtmlTag::new("input");
        input.set_attr("type", "checkbox");
        input.set_attr("name", format!("{}[]", column_id));
        input.set_attr("value", value.as_str());
        input.set_attr("class", "swat-checkbox-cell-renderer-checkbox");
        if self.selected.contains(&value) {
            input.set_attr("checked", "checked");
        }
        input.display(out);
        Ok(())
    }

    fn css_class(&self) -> &'static str {
        "swat-checkbox-cell-renderer"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>, column_id: &str) -> Result<()> {
        self.selected = ctx.data().get_list(column_id);
        Ok(())
    }

    fn is_visible_for(&self, row: &Value) -> bool {
        visible_for(&self.visible, row)
    }

    fn selected_items(&self) -> Option<Vec<String>> {
        Some(self.selected.clone())
    }
}

/// A per-row text input named `<column id>[<row key>]`.
#[derive(Debug, Clone)]
pub struct EntryCellRenderer {
    row_key: Binding,
    value: Option<Binding>,
    title: String,
    required: bool,
    max_length: Option<usize>,
    submitted: BTreeMap<String, String>,
    messages: HashMap<String, Vec<Message>>,
    visible: Option<Binding>,
}

impl EntryCellRenderer {
    /// `row_key` identifies the row in submitted input names.
    pub fn new(row_key: Binding, title: impl Into<String>) -> Self {
        EntryCellRenderer {
            row_key,
            value: None,
            title: title.into(),
            required: false,
            max_length: None,
            submitted: BTreeMap::new(),
            messages: HashMap::new(),
            visible: None,
        }
    }

    /// Initial value shown before anything is submitted.
    pub fn value(mut self, binding: Binding) -> Self {
        self.value = Some(binding);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn visible_when(mut self, binding: Binding) -> Self {
        self.visible = Some(binding);
        self
    }

    /// The submitted value for a row key.
    pub fn submitted_value(&self, row_key: &str) -> Option<&str> {
        self.submitted.get(row_key).map(String::as_str)
    }

    /// Every submitted value by row key.
    pub fn submitted(&self) -> &BTreeMap<String, String> {
        &self.submitted
    }

    fn validate(&self, value: &str) -> Option<Message> {
        let trimmed = value.trim();
        if self.required && trimmed.is_empty() {
            return Some(Message::error(format!(
                "The {} field is required.",
                self.title
            )));
        }
        match self.max_length {
            Some(max) if trimmed.chars().count() > max => Some(Message::error(format!(
                "The {} field can be at most {} characters long.",
                self.title, max
            ))),
            _ => None,
        }
    }
}

impl CellRenderer for EntryCellRenderer {
    fn render(&self, row: &Value, column_id: &str, out: &mut Response) -> Result<()> {
        let key = self.row_key.resolve_string(row);
        let value = match self.submitted.get(&key) {
            Some(submitted) => submitted.clone(),
            None => self
                .value
                .as_ref()
                .map(|b| b.resolve_string(row))
                .unwrap_or_default(),
        };
        let mut input = HtmlTag::new("input");
        input.set_attr("type", "text");
        input.set_attr("name", format!("{}[{}]", column_id, key));
        input.set_attr("value", value);
        input.set_attr("class", "swat-entry");
        if let Some(max) = self.max_length {
            input.set_attr("maxlength", max.to_string());
        }
        input.display(out);
        Ok(())
    }

    fn css_class(&self) -> &'static str {
        "swat-entry-cell-renderer"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>, column_id: &str) -> Result<()> {
        self.submitted = ctx.data().keyed(column_id);
        let mut messages: HashMap<String, Vec<Message>> = HashMap::new();
        for (key, value) in &self.submitted {
            if let Some(message) = self.validate(value) {
                messages.entry(key.clone()).or_default().push(message);
            }
        }
        self.messages = messages;
        Ok(())
    }

    fn is_visible_for(&self, row: &Value) -> bool {
        visible_for(&self.visible, row)
    }

    fn messages_for(&self, row: &Value) -> Vec<Message> {
        self.messages
            .get(&self.row_key.resolve_string(row))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FormData, Request};
    use serde_json::json;

    fn render(renderer: &dyn CellRenderer, row: &Value, column_id: &str) -> String {
        let mut out = Response::new();
        renderer.render(row, column_id, &mut out).unwrap();
        out.into_string()
    }

    #[test]
    fn text_renderer_escapes_plain_text() {
        let r = TextCellRenderer::field("name");
        assert_eq!(render(&r, &json!({"name": "A & B"}), "c"), "A &amp; B");
    }

    #[test]
    fn text_renderer_passes_markup() {
        let r = TextCellRenderer::new(Binding::literal("<b>x</b>")).content_type(ContentType::Html);
        assert_eq!(render(&r, &json!({}), "c"), "<b>x</b>");
    }

    #[test]
    fn link_renderer_substitutes_value() {
        let r = LinkCellRenderer::new("edit?id=%s", Binding::field("title"))
            .link_value(Binding::field("id"));
        assert_eq!(
            render(&r, &json!({"id": 7, "title": "Seven"}), "c"),
            r#"<a href="edit?id=7">Seven</a>"#
        );
    }

    #[test]
    fn visibility_binding_uses_truthiness() {
        let r = TextCellRenderer::field("name").visible_when(Binding::field("active"));
        assert!(r.is_visible_for(&json!({"active": true})));
        assert!(!r.is_visible_for(&json!({"active": 0})));
        assert!(!r.is_visible_for(&json!({})));
    }

    #[test]
    fn checkbox_reads_selection_from_column_list() {
        let request = Request::new().with_post(FormData::parse_urlencoded("checkbox[]=2&checkbox[]=5"));
        let mut ctx = ProcessContext::new(&request);
        let mut r = CheckboxCellRenderer::new(Binding::field("id"));
        r.process(&mut ctx, "checkbox").unwrap();

        assert_eq!(r.selected_items(), Some(vec!["2".to_string(), "5".to_string()]));
        assert_eq!(
            render(&r, &json!({"id": 5}), "checkbox"),
            r#"<input type="checkbox" name="checkbox[]" value="5" class="swat-checkbox-cell-renderer-checkbox" checked="checked" />"#
        );
    }

    #[test]
    fn entry_renderer_flags_empty_required_rows() {
        let request = Request::new().with_post(FormData::parse_urlencoded("qty[1]=3&qty[2]=+"));
        let mut ctx = ProcessContext::new(&request);
        let mut r = EntryCellRenderer::new(Binding::field("id"), "Quantity").required(true);
        r.process(&mut ctx, "qty").unwrap();

        assert!(!r.has_message_for(&json!({"id": 1})));
        let messages = r.messages_for(&json!({"id": 2}));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].primary_content(), "The Quantity field is required.");
        assert_eq!(r.submitted_value("1"), Some("3"));
    }

    #[test]
    fn entry_renderer_prefers_submitted_value() {
        let request = Request::new().with_post(FormData::new().with("qty[1]", "9"));
        let mut ctx = ProcessContext::new(&request);
        let mut r = EntryCellRenderer::new(Binding::field("id"), "Quantity").value(Binding::field("qty"));
        assert_eq!(
            render(&r, &json!({"id": 1, "qty": 4}), "qty"),
            r#"<input type="text" name="qty[1]" value="4" class="swat-entry" />"#
        );
        r.process(&mut ctx, "qty").unwrap();
        assert!(render(&r, &json!({"id": 1, "qty": 4}), "qty").contains(r#"value="9""#));
    }
}
