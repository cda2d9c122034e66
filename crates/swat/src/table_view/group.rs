//! Grouping of consecutive rows that share a key.
//!
//! A group starts on a row whose key differs from the previous row's (or on
//! the first row) and ends on a row whose key differs from the next row's
//! (or on the last row). The body loop passes the previous and next rows, so
//! header and footer placement is decided without buffering.

use serde_json::Value;
use swat_html::{ContentType, HtmlHeadEntrySet, HtmlTag, Response};

use super::model::{field, value_to_string};
use super::renderer::CellRenderer;
use crate::container::{UiObject, UiParent};
use crate::error::{Result, SwatError};

/// Where a row sits relative to the runs of a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupBoundary {
    /// The row opens a new run.
    pub starts: bool,
    /// The row closes the current run.
    pub ends: bool,
}

/// Header and footer rows around runs of rows sharing a key.
#[derive(Debug, Clone)]
pub struct TableViewGroup {
    id: Option<String>,
    group_by: String,
    visible: bool,
    header_renderers: Vec<Box<dyn CellRenderer>>,
    footer_renderers: Vec<Box<dyn CellRenderer>>,
    classes: Vec<String>,
}

impl TableViewGroup {
    /// Groups rows by the field at `group_by`.
    pub fn new(id: impl Into<String>, group_by: impl Into<String>) -> Self {
        let mut group = Self::anonymous(group_by);
        group.id = Some(id.into());
        group
    }

    pub fn anonymous(group_by: impl Into<String>) -> Self {
        TableViewGroup {
            id: None,
            group_by: group_by.into(),
            visible: true,
            header_renderers: Vec::new(),
            footer_renderers: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn with_header_renderer<R: CellRenderer + 'static>(mut self, renderer: R) -> Self {
        self.header_renderers.push(Box::new(renderer));
        self
    }

    pub fn with_footer_renderer<R: CellRenderer + 'static>(mut self, renderer: R) -> Self {
        self.footer_renderers.push(Box::new(renderer));
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn group_by(&self) -> &str {
        &self.group_by
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn has_footer(&self) -> bool {
        !self.footer_renderers.is_empty()
    }

    /// The grouping key of a row. Rows without the field share the `None` key.
    pub fn key<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        field(row, &self.group_by)
    }

    pub fn starts_group(&self, previous: Option<&Value>, row: &Value) -> bool {
        previous.map_or(true, |p| self.key(p) != self.key(row))
    }

    pub fn ends_group(&self, row: &Value, next: Option<&Value>) -> bool {
        next.map_or(true, |n| self.key(n) != self.key(row))
    }

    pub fn boundary(&self, previous: Option<&Value>, row: &Value, next: Option<&Value>) -> GroupBoundary {
        GroupBoundary {
            starts: self.starts_group(previous, row),
            ends: self.ends_group(row, next),
        }
    }

    pub fn init(&mut self) -> Result<()> {
        for renderer in self
            .header_renderers
            .iter_mut()
            .chain(self.footer_renderers.iter_mut())
        {
            renderer.init()?;
        }
        Ok(())
    }

    fn display_renderers(
        &self,
        renderers: &[Box<dyn CellRenderer>],
        row: &Value,
        out: &mut Response,
    ) -> Result<()> {
        let name = self.id.as_deref().unwrap_or("");
        for renderer in renderers {
            if renderer.is_visible_for(row) {
                renderer.render(row, name, out)?;
            }
        }
        Ok(())
    }

    fn display_group_row(
        &self,
        class: &str,
        renderers: &[Box<dyn CellRenderer>],
        row: &Value,
        colspan: usize,
        out: &mut Response,
    ) -> Result<()> {
        let mut tr = HtmlTag::new("tr");
        tr.add_class(class);
        for extra in &self.classes {
            tr.add_class(extra);
        }
        tr.open(out);
        let td = HtmlTag::new("td").attr("colspan", colspan.max(1).to_string());
        td.open(out);
        if renderers.is_empty() {
            let key = self.key(row).map(value_to_string).unwrap_or_default();
            out.push_text(&key, ContentType::Plain);
        } else {
            self.display_renderers(renderers, row, out)?;
        }
        td.close(out);
        tr.close(out);
        Ok(())
    }

    /// Writes the header row if `row` starts a run.
    pub fn display_header(
        &self,
        previous: Option<&Value>,
        row: &Value,
        colspan: usize,
        out: &mut Response,
    ) -> Result<()> {
        if !self.visible || !self.starts_group(previous, row) {
            return Ok(());
        }
        self.display_group_row("swat-table-view-group", &self.header_renderers, row, colspan, out)
    }

    /// Writes the footer row if `row` ends a run and the group has footer renderers.
    pub fn display_footer(
        &self,
        row: &Value,
        next: Option<&Value>,
        colspan: usize,
        out: &mut Response,
    ) -> Result<()> {
        if !self.visible || !self.has_footer() || !self.ends_group(row, next) {
            return Ok(());
        }
        self.display_group_row(
            "swat-table-view-group-footer",
            &self.footer_renderers,
            row,
            colspan,
            out,
        )
    }

    pub fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        for renderer in self.header_renderers.iter().chain(&self.footer_renderers) {
            set.add_set(&renderer.head_entries());
        }
        set
    }
}

impl UiParent for TableViewGroup {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        match child {
            UiObject::Renderer(renderer) => {
                self.header_renderers.push(renderer);
                Ok(())
            }
            other => Err(SwatError::TypeMismatch {
                expected: "cell renderer",
                found: other.kind_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_view::renderer::TextCellRenderer;
    use serde_json::json;

    #[test]
    fn boundaries_follow_key_changes() {
        let group = TableViewGroup::new("by-region", "region");
        let a1 = json!({"region": "a"});
        let a2 = json!({"region": "a"});
        let b = json!({"region": "b"});

        assert_eq!(
            group.boundary(None, &a1, Some(&a2)),
            GroupBoundary { starts: true, ends: false }
        );
        assert_eq!(
            group.boundary(Some(&a1), &a2, Some(&b)),
            GroupBoundary { starts: false, ends: true }
        );
        assert_eq!(
            group.boundary(Some(&a2), &b, None),
            GroupBoundary { starts: true, ends: true }
        );
    }

    #[test]
    fn rows_missing_the_field_share_a_group() {
        let group = TableViewGroup::anonymous("region");
        assert!(!group.starts_group(Some(&json!({})), &json!({"other": 1})));
    }

    #[test]
    fn header_defaults_to_escaped_key() {
        let group = TableViewGroup::new("g", "region");
        let mut out = Response::new();
        group
            .display_header(None, &json!({"region": "R&D"}), 2, &mut out)
            .unwrap();
        assert_eq!(
            out.as_str(),
            r#"<tr class="swat-table-view-group"><td colspan="2">R&amp;D</td></tr>"#
        );
    }

    #[test]
    fn footer_needs_renderers() {
        let row = json!({"region": "a", "total": 30});
        let mut out = Response::new();
        TableViewGroup::new("g", "region")
            .display_footer(&row, None, 2, &mut out)
            .unwrap();
        assert!(out.is_empty());

        TableViewGroup::new("g", "region")
            .with_footer_renderer(TextCellRenderer::field("total"))
            .display_footer(&row, None, 2, &mut out)
            .unwrap();
        assert_eq!(
            out.as_str(),
            r#"<tr class="swat-table-view-group-footer"><td colspan="2">30</td></tr>"#
        );
    }
}
