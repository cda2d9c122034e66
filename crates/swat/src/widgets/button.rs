use swat_html::{HtmlTag, Response};

use crate::error::Result;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// A submit button. When clicked it registers itself with the enclosing form.
#[derive(Debug, Clone)]
pub struct Button {
    state: WidgetState,
    title: String,
    clicked: bool,
}

impl Button {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Button {
            state: WidgetState::with_id(id),
            title: title.into(),
            clicked: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn has_been_clicked(&self) -> bool {
        self.clicked
    }
}

impl Widget for Button {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "button"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state.processed = true;
        if let Some(id) = self.state.id.as_deref() {
            if ctx.data().contains(id) {
                self.clicked = true;
                ctx.register_clicked_button(id);
            }
        }
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        let mut input = HtmlTag::new("input").attr("type", "submit");
        input.set_opt_attr("name", self.state.id.as_deref());
        input.set_opt_attr("id", self.state.id.as_deref());
        input.set_attr("value", self.title.as_str());
        input.set_classes(self.state.css_classes(&["swat-button"]));
        input.display(out);
        Ok(())
    }

    fn is_focusable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FormData, Method, Request};

    #[test]
    fn displays_submit_input() {
        let mut out = Response::new();
        Button::new("save", "Save").display(&mut out).unwrap();
        assert_eq!(
            out.as_str(),
            r#"<input type="submit" name="save" id="save" value="Save" class="swat-button" />"#
        );
    }

    #[test]
    fn click_registers_with_form_scope() {
        let request = Request::new().with_post(FormData::new().with("save", "Save"));
        let mut ctx = ProcessContext::new(&request);
        let frame = ctx.enter_form("edit", Method::Post);

        let mut save = Button::new("save", "Save");
        let mut cancel = Button::new("cancel", "Cancel");
        save.process(&mut ctx).unwrap();
        cancel.process(&mut ctx).unwrap();

        assert!(save.has_been_clicked());
        assert!(!cancel.has_been_clicked());
        let scope = ctx.leave_form(frame).unwrap();
        assert_eq!(scope.clicked_button.as_deref(), Some("save"));
    }
}
