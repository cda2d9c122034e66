use swat_html::{HtmlTag, Response};

use super::display_messages;
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// A single-line text input.
///
/// Submitted values are trimmed; an empty submission clears the value.
/// Validation problems become error messages on the entry.
#[derive(Debug, Clone)]
pub struct Entry {
    state: WidgetState,
    title: String,
    value: Option<String>,
    required: bool,
    max_length: Option<usize>,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Entry {
            state: WidgetState::with_id(id),
            title: title.into(),
            value: None,
            required: false,
            max_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl Widget for Entry {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "entry"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state.processed = true;
        let Some(id) = self.state.id.as_deref() else {
            return Ok(());
        };
        let Some(raw) = ctx.data().get_str(id) else {
            return Ok(());
        };
        let trimmed = raw.trim();
        self.value = (!trimmed.is_empty()).then(|| trimmed.to_string());

        let message = match (&self.value, self.max_length) {
            (None, _) if self.required => Some(Message::error(format!(
                "The {} field is required.",
                self.title
            ))),
            (Some(value), Some(max)) if value.chars().count() > max => Some(Message::error(format!(
                "The {} field can be at most {} characters long.",
                self.title, max
            ))),
            _ => None,
        };
        if let Some(message) = message {
            self.add_message(message);
        }
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        let mut input = HtmlTag::new("input").attr("type", "text");
        input.set_opt_attr("name", self.state.id.as_deref());
        input.set_opt_attr("id", self.state.id.as_deref());
        input.set_classes(self.state.css_classes(&["swat-entry"]));
        input.set_attr("value", self.value.as_deref().unwrap_or(""));
        if let Some(max) = self.max_length {
            input.set_attr("maxlength", max.to_string());
        }
        input.display(out);
        display_messages(&self.state.messages, out);
        Ok(())
    }

    fn is_focusable(&self) -> bool {
        true
    }
}
