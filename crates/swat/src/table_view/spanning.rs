//! Spanning columns: a full-width row segment drawn below a data row.

use serde_json::Value;
use swat_html::{HtmlHeadEntrySet, HtmlTag, Response};

use super::column::TableViewColumn;
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;

/// A column whose cell spans the width of the table, on its own row.
///
/// `offset` leading columns are left empty before the spanning cell.
#[derive(Debug, Clone)]
pub struct TableViewSpanningColumn {
    column: TableViewColumn,
    offset: usize,
}

impl TableViewSpanningColumn {
    pub fn new(column: TableViewColumn) -> Self {
        TableViewSpanningColumn { column, offset: 0 }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn column(&self) -> &TableViewColumn {
        &self.column
    }

    pub fn column_mut(&mut self) -> &mut TableViewColumn {
        &mut self.column
    }

    pub fn id(&self) -> Option<&str> {
        self.column.id()
    }

    pub fn is_visible(&self) -> bool {
        self.column.is_visible()
    }

    /// Whether a spanning row is drawn for `row`.
    pub fn is_visible_for(&self, row: &Value) -> bool {
        self.column.is_visible() && self.column.has_visible_renderer(row)
    }

    pub fn init(&mut self) -> Result<()> {
        self.column.init()
    }

    pub fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.column.process(ctx)
    }

    pub fn messages_for(&self, row: &Value) -> Vec<Message> {
        self.column.messages_for(row)
    }

    pub fn inline_script(&self) -> Option<String> {
        self.column.inline_script()
    }

    pub fn head_entries(&self) -> HtmlHeadEntrySet {
        self.column.head_entries()
    }

    /// Writes the cells of the spanning row for `row`.
    pub fn display(&self, row: &Value, visible_column_count: usize, out: &mut Response) -> Result<()> {
        let offset = self.offset.min(visible_column_count.saturating_sub(1));
        if offset > 0 {
            HtmlTag::new("td")
                .attr("colspan", offset.to_string())
                .display(out);
        }
        let span = visible_column_count.saturating_sub(offset).max(1);
        let mut td = self.column.td_tag();
        td.set_attr("colspan", span.to_string());
        td.open(out);
        self.column.display_renderers(row, out)?;
        td.close(out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_view::renderer::{Binding, TextCellRenderer};
    use serde_json::json;

    fn notes() -> TableViewSpanningColumn {
        TableViewSpanningColumn::new(
            TableViewColumn::new("notes", "Notes")
                .with_renderer(TextCellRenderer::field("note").visible_when(Binding::field("note"))),
        )
    }

    #[test]
    fn spans_all_visible_columns() {
        let mut out = Response::new();
        notes().display(&json!({"note": "late"}), 3, &mut out).unwrap();
        assert_eq!(
            out.as_str(),
            r#"<td class="swat-text-cell-renderer" colspan="3">late</td>"#
        );
    }

    #[test]
    fn offset_leaves_leading_cells_empty() {
        let mut out = Response::new();
        notes()
            .with_offset(1)
            .display(&json!({"note": "late"}), 3, &mut out)
            .unwrap();
        assert_eq!(
            out.as_str(),
            r#"<td colspan="1"></td><td class="swat-text-cell-renderer" colspan="2">late</td>"#
        );
    }

    #[test]
    fn visibility_depends_on_row() {
        let column = notes();
        assert!(column.is_visible_for(&json!({"note": "x"})));
        assert!(!column.is_visible_for(&json!({"note": null})));
    }
}
