use serde::{Deserialize, Serialize};
use swat_html::{ContentType, HtmlTag, Response};

use super::display_messages;
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// One choice of a [`Flydown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlydownOption {
    pub value: String,
    pub title: String,
}

impl FlydownOption {
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        FlydownOption {
            value: value.into(),
            title: title.into(),
        }
    }
}

/// A `select` box. Only values among its options are accepted.
#[derive(Debug, Clone)]
pub struct Flydown {
    state: WidgetState,
    title: String,
    options: Vec<FlydownOption>,
    value: Option<String>,
    show_blank: bool,
    blank_title: String,
    required: bool,
}

impl Flydown {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Flydown {
            state: WidgetState::with_id(id),
            title: title.into(),
            options: Vec::new(),
            value: None,
            show_blank: true,
            blank_title: String::new(),
            required: false,
        }
    }

    pub fn with_option(mut self, value: impl Into<String>, title: impl Into<String>) -> Self {
        self.add_option(value, title);
        self
    }

    pub fn add_option(&mut self, value: impl Into<String>, title: impl Into<String>) {
        self.options.push(FlydownOption::new(value, title));
    }

    /// Whether a leading empty option is drawn.
    pub fn show_blank(mut self, show_blank: bool) -> Self {
        self.show_blank = show_blank;
        self
    }

    pub fn blank_title(mut self, title: impl Into<String>) -> Self {
        self.blank_title = title.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn options(&self) -> &[FlydownOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Selects `value` if it is one of the options.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value
            .filter(|v| self.options.iter().any(|o| o.value == *v))
            .map(str::to_string);
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.value = None;
    }
}

impl Widget for Flydown {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "flydown"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state.processed = true;
        let Some(id) = self.state.id.clone() else {
            return Ok(());
        };
        if !ctx.data().contains(&id) {
            return Ok(());
        }
        self.set_value(ctx.data().get_str(&id));
        if self.required && self.value.is_none() {
            let message = Message::error(format!("The {} field is required.", self.title));
            self.add_message(message);
        }
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        let mut select = HtmlTag::new("select");
        select.set_opt_attr("name", self.state.id.as_deref());
        select.set_opt_attr("id", self.state.id.as_deref());
        select.set_classes(self.state.css_classes(&["swat-flydown"]));
        select.open(out);
        if self.show_blank {
            HtmlTag::new("option")
                .attr("value", "")
                .content(self.blank_title.as_str(), ContentType::Plain)
                .display(out);
        }
        for option in &self.options {
            let mut tag = HtmlTag::new("option").attr("value", option.value.as_str());
            if self.value.as_deref() == Some(option.value.as_str()) {
                tag.set_attr("selected", "selected");
            }
            tag.set_content(option.title.as_str(), ContentType::Plain);
            tag.display(out);
        }
        select.close(out);
        display_messages(&self.state.messages, out);
        Ok(())
    }

    fn is_focusable(&self) -> bool {
        true
    }
}
