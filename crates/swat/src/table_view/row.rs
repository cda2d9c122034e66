//! Extra rows: table view decorations drawn in the footer, independent of
//! the model's rows.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use swat_html::{escape_js_string, HtmlHeadEntry, HtmlHeadEntrySet, HtmlTag, Response};

use super::column::TableViewColumn;
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;

/// What an extra row can see of its table view while displaying.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    view_id: Option<&'a str>,
    columns: &'a [TableViewColumn],
    row_count: usize,
}

impl<'a> RowContext<'a> {
    pub fn new(view_id: Option<&'a str>, columns: &'a [TableViewColumn], row_count: usize) -> Self {
        RowContext {
            view_id,
            columns,
            row_count,
        }
    }

    pub fn view_id(&self) -> Option<&'a str> {
        self.view_id
    }

    pub fn columns(&self) -> &'a [TableViewColumn] {
        self.columns
    }

    /// Number of rows in the view's model.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &'a TableViewColumn> {
        self.columns.iter().filter(|c| c.is_visible())
    }

    pub fn visible_column_count(&self) -> usize {
        self.visible_columns().count()
    }
}

/// Object-safe cloning and downcasting for rows.
pub trait RowClone {
    fn clone_box(&self) -> Box<dyn TableViewRow>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> RowClone for T
where
    T: TableViewRow + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn TableViewRow> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn TableViewRow> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A row owned by a table view and drawn after its body.
pub trait TableViewRow: RowClone + fmt::Debug {
    fn id(&self) -> Option<&str>;

    fn is_visible(&self) -> bool;

    /// Writes the row. Rows check their own visibility.
    fn display(&self, view: &RowContext<'_>, out: &mut Response) -> Result<()>;

    /// Whether the row shows when the model has `count` rows.
    fn is_visible_by_count(&self, count: usize) -> bool {
        self.is_visible() && count > 0
    }

    /// Input rows are limited to one per table view.
    fn is_input_row(&self) -> bool {
        false
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn process(&mut self, _ctx: &mut ProcessContext<'_>) -> Result<()> {
        Ok(())
    }

    fn messages(&self) -> Vec<Message> {
        Vec::new()
    }

    fn inline_script(&self, _view: &RowContext<'_>) -> Option<String> {
        None
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        HtmlHeadEntrySet::new()
    }
}

impl<'r> dyn TableViewRow + 'r {
    pub fn downcast_ref<T: TableViewRow + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: TableViewRow + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A "check all" checkbox spanning the table.
#[derive(Debug, Clone)]
pub struct CheckAllRow {
    id: Option<String>,
    visible: bool,
    title: String,
}

impl CheckAllRow {
    pub fn new(id: impl Into<String>) -> Self {
        CheckAllRow {
            id: Some(id.into()),
            visible: true,
            title: "Check All".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl TableViewRow for CheckAllRow {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn display(&self, view: &RowContext<'_>, out: &mut Response) -> Result<()> {
        if !self.is_visible_by_count(view.row_count()) {
            return Ok(());
        }
        let input_id = self.id.as_deref().map(|id| format!("{}_value", id));

        let tr = HtmlTag::new("tr").attr("class", "swat-table-view-check-all");
        let td = HtmlTag::new("td").attr("colspan", view.visible_column_count().max(1).to_string());
        let mut label = HtmlTag::new("label");
        label.set_opt_attr("for", input_id.clone());
        let mut input = HtmlTag::new("input").attr("type", "checkbox");
        input.set_opt_attr("id", input_id);
        input.set_attr("class", "swat-check-all");

        tr.open(out);
        td.open(out);
        label.open(out);
        input.display(out);
        out.push_str(" ");
        out.push_text(&self.title, swat_html::ContentType::Plain);
        label.close(out);
        td.close(out);
        tr.close(out);
        Ok(())
    }

    fn inline_script(&self, _view: &RowContext<'_>) -> Option<String> {
        let id = self.id.as_deref()?;
        Some(format!(
            "var {}_obj = new SwatCheckAll('{}');",
            id,
            escape_js_string(id)
        ))
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        set.add_entry(HtmlHeadEntry::javascript("packages/swat/javascript/swat-check-all.js"));
        set
    }
}

/// Blank rows for entering new records, one text input per mapped column.
///
/// Inputs are named `<row id>_<column id>[<n>]`. After processing, every
/// submitted line with at least one non-blank value is available from
/// [`submitted_rows`](Self::submitted_rows).
#[derive(Debug, Clone)]
pub struct InputRow {
    id: String,
    visible: bool,
    number: usize,
    fields: Vec<String>,
    submitted: Vec<BTreeMap<String, String>>,
}

impl InputRow {
    pub fn new(id: impl Into<String>) -> Self {
        InputRow {
            id: id.into(),
            visible: true,
            number: 1,
            fields: Vec::new(),
            submitted: Vec::new(),
        }
    }

    /// Adds an input under the column with the given id.
    pub fn with_field(mut self, column_id: impl Into<String>) -> Self {
        self.fields.push(column_id.into());
        self
    }

    /// How many blank lines to draw.
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn submitted_rows(&self) -> &[BTreeMap<String, String>] {
        &self.submitted
    }

    fn input_name(&self, column_id: &str) -> String {
        format!("{}_{}", self.id, column_id)
    }
}

impl TableViewRow for InputRow {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn is_visible_by_count(&self, _count: usize) -> bool {
        self.visible
    }

    fn is_input_row(&self) -> bool {
        true
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        let mut lines: BTreeMap<usize, BTreeMap<String, String>> = BTreeMap::new();
        for column_id in &self.fields {
            for (index, value) in ctx.data().keyed(&self.input_name(column_id)) {
                let Ok(index) = index.parse::<usize>() else {
                    continue;
                };
                lines
                    .entry(index)
                    .or_default()
                    .insert(column_id.clone(), value);
            }
        }
        self.submitted = lines
            .into_values()
            .filter(|line| line.values().any(|v| !v.trim().is_empty()))
            .collect();
        Ok(())
    }

    fn display(&self, view: &RowContext<'_>, out: &mut Response) -> Result<()> {
        if !self.is_visible_by_count(view.row_count()) {
            return Ok(());
        }
        let tr = HtmlTag::new("tr").attr("class", "swat-table-view-input-row");
        for line in 0..self.number {
            tr.open(out);
            for column in view.visible_columns() {
                let td = HtmlTag::new("td");
                td.open(out);
                if let Some(column_id) = column.id().filter(|id| self.fields.iter().any(|f| f == id)) {
                    let value = self
                        .submitted
                        .get(line)
                        .and_then(|l| l.get(column_id))
                        .cloned()
                        .unwrap_or_default();
                    HtmlTag::new("input")
                        .attr("type", "text")
                        .attr("name", format!("{}[{}]", self.input_name(column_id), line))
                        .attr("value", value)
                        .attr("class", "swat-entry")
                        .display(out);
                }
                td.close(out);
            }
            tr.close(out);
        }
        Ok(())
    }
}
