//! The table view engine.
//!
//! A [`TableView`] owns four independently ordered sequences (columns,
//! spanning columns, groups and extra rows), each with its own id index, and
//! renders them against a [`TableModel`] in one pass:
//!
//! - a `thead` with one header cell per column
//! - a `tbody` walked with one row of lookahead, so groups know when a run
//!   ends without buffering
//! - a `tfoot` holding the extra rows, placed before or after the body
//!   depending on [`set_invalid_tfoot_ordering`](TableView::set_invalid_tfoot_ordering)
//!
//! Appending an item whose explicit id is already indexed in the same
//! sequence fails. `init` rebuilds the indexes from the sequences; if ids
//! were changed after appending, the first item with an id wins and later
//! ones stay in the sequence unindexed.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use swat_html::{
    escape_js_string, ContentType, HtmlHeadEntry, HtmlHeadEntrySet, HtmlTag, Response,
};

use super::column::TableViewColumn;
use super::group::TableViewGroup;
use super::model::TableModel;
use super::ordering::OrderDirection;
use super::row::{InputRow, RowContext, TableViewRow};
use super::spanning::TableViewSpanningColumn;
use crate::config::TableViewConfig;
use crate::container::{UiObject, UiParent};
use crate::error::{Result, SwatError};
use crate::message::Message;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// Id of the column whose selection becomes the view's checked items.
pub const CHECKBOX_COLUMN_ID: &str = "checkbox";

/// Default placeholder shown for an empty model.
pub const DEFAULT_NO_RECORDS_MESSAGE: &str = "<none>";

/// Anything a table view can hold.
#[derive(Debug, Clone)]
pub enum TableViewChild {
    Column(TableViewColumn),
    SpanningColumn(TableViewSpanningColumn),
    Group(TableViewGroup),
    Row(Box<dyn TableViewRow>),
}

impl From<TableViewColumn> for TableViewChild {
    fn from(column: TableViewColumn) -> Self {
        TableViewChild::Column(column)
    }
}

impl From<TableViewSpanningColumn> for TableViewChild {
    fn from(column: TableViewSpanningColumn) -> Self {
        TableViewChild::SpanningColumn(column)
    }
}

impl From<TableViewGroup> for TableViewChild {
    fn from(group: TableViewGroup) -> Self {
        TableViewChild::Group(group)
    }
}

impl From<Box<dyn TableViewRow>> for TableViewChild {
    fn from(row: Box<dyn TableViewRow>) -> Self {
        TableViewChild::Row(row)
    }
}

impl TryFrom<UiObject> for TableViewChild {
    type Error = SwatError;

    fn try_from(object: UiObject) -> Result<Self> {
        match object {
            UiObject::Column(column) => Ok(TableViewChild::Column(column)),
            UiObject::SpanningColumn(column) => Ok(TableViewChild::SpanningColumn(column)),
            UiObject::Group(group) => Ok(TableViewChild::Group(group)),
            UiObject::Row(row) => Ok(TableViewChild::Row(row)),
            other => Err(SwatError::TypeMismatch {
                expected: "column, spanning column, group or row",
                found: other.kind_name(),
            }),
        }
    }
}

/// Tabular rendering and processing over a row model.
#[derive(Debug, Clone)]
pub struct TableView {
    state: WidgetState,
    model: Option<Rc<dyn TableModel>>,
    columns: Vec<TableViewColumn>,
    column_index: HashMap<String, usize>,
    spanning_columns: Vec<TableViewSpanningColumn>,
    spanning_column_index: HashMap<String, usize>,
    groups: Vec<TableViewGroup>,
    group_index: HashMap<String, usize>,
    extra_rows: Vec<Box<dyn TableViewRow>>,
    row_index: HashMap<String, usize>,
    checked_items: Vec<String>,
    no_records_message: Option<String>,
    no_records_content_type: ContentType,
    invalid_tfoot_ordering: bool,
}

impl Default for TableView {
    fn default() -> Self {
        TableView {
            state: WidgetState::default(),
            model: None,
            columns: Vec::new(),
            column_index: HashMap::new(),
            spanning_columns: Vec::new(),
            spanning_column_index: HashMap::new(),
            groups: Vec::new(),
            group_index: HashMap::new(),
            extra_rows: Vec::new(),
            row_index: HashMap::new(),
            checked_items: Vec::new(),
            no_records_message: Some(DEFAULT_NO_RECORDS_MESSAGE.to_string()),
            no_records_content_type: ContentType::Plain,
            invalid_tfoot_ordering: false,
        }
    }
}

/// Adds `id` at `position` unless already present.
fn register(
    index: &mut HashMap<String, usize>,
    kind: &'static str,
    id: Option<&str>,
    position: usize,
) -> Result<()> {
    if let Some(id) = id {
        if index.contains_key(id) {
            return Err(SwatError::duplicate(kind, id));
        }
        index.insert(id.to_string(), position);
    }
    Ok(())
}

/// Indexes ids with the first occurrence winning.
fn index_first_wins<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if let Some(id) = id {
            index.entry(id.to_string()).or_insert(position);
        }
    }
    index
}

fn row_classes(position: usize, has_message: bool) -> Vec<&'static str> {
    let mut classes = Vec::new();
    if position % 2 == 1 {
        classes.push("odd");
    }
    if has_message {
        classes.push("swat-error");
    }
    classes
}

impl TableView {
    /// Creates an empty view with the given id.
    ///
    /// The id becomes the `table` id and the name of the client-side object
    /// registered after it.
    pub fn new(id: impl Into<String>) -> Self {
        TableView {
            state: WidgetState::with_id(id),
            ..Default::default()
        }
    }

    /// Applies configured defaults.
    pub fn with_config(mut self, config: &TableViewConfig) -> Self {
        self.no_records_message = config.no_records_message.clone();
        self.no_records_content_type = config.no_records_content_type;
        self.invalid_tfoot_ordering = config.invalid_tfoot_ordering;
        self
    }

    /// Builder form of [`set_model`](Self::set_model).
    pub fn with_model<M: TableModel + 'static>(mut self, model: M) -> Self {
        self.set_model(model);
        self
    }

    /// Sets the rows to render. A view without a model displays nothing.
    pub fn set_model<M: TableModel + 'static>(&mut self, model: M) {
        self.model = Some(Rc::new(model));
    }

    /// Shares one model between several views.
    pub fn set_shared_model(&mut self, model: Rc<dyn TableModel>) {
        self.model = Some(model);
    }

    /// The current model, if one was set.
    pub fn model(&self) -> Option<&dyn TableModel> {
        self.model.as_deref()
    }

    /// Placeholder for an empty model. `None` renders an empty table instead.
    pub fn set_no_records_message(&mut self, message: Option<String>, content_type: ContentType) {
        self.no_records_message = message;
        self.no_records_content_type = content_type;
    }

    /// Puts the `tfoot` after the `tbody` and marks it with a class.
    pub fn set_invalid_tfoot_ordering(&mut self, invalid: bool) {
        self.invalid_tfoot_ordering = invalid;
    }

    /// Whether the `tfoot` is written after the `tbody`.
    pub fn uses_invalid_tfoot_ordering(&self) -> bool {
        self.invalid_tfoot_ordering
    }

    /// Appends a column.
    ///
    /// Fails with [`SwatError::DuplicateId`] when another column already uses
    /// the same explicit id. Anonymous columns are always accepted.
    pub fn append_column(&mut self, column: TableViewColumn) -> Result<()> {
        register(&mut self.column_index, "column", column.id(), self.columns.len())?;
        self.columns.push(column);
        Ok(())
    }

    /// Appends a spanning column. Ids are checked like
    /// [`append_column`](Self::append_column).
    pub fn append_spanning_column(&mut self, column: TableViewSpanningColumn) -> Result<()> {
        register(
            &mut self.spanning_column_index,
            "spanning column",
            column.id(),
            self.spanning_columns.len(),
        )?;
        self.spanning_columns.push(column);
        Ok(())
    }

    /// Appends a group. Groups nest in insertion order: the first group's
    /// header is written before the second's.
    pub fn append_group(&mut self, group: TableViewGroup) -> Result<()> {
        register(&mut self.group_index, "group", group.id(), self.groups.len())?;
        self.groups.push(group);
        Ok(())
    }

    /// Appends an extra row. A view holds at most one input row.
    pub fn append_row(&mut self, row: Box<dyn TableViewRow>) -> Result<()> {
        if row.is_input_row() && self.extra_rows.iter().any(|r| r.is_input_row()) {
            return Err(SwatError::Constraint(
                "only one input row may be added to a table view".to_string(),
            ));
        }
        register(&mut self.row_index, "row", row.id(), self.extra_rows.len())?;
        self.extra_rows.push(row);
        Ok(())
    }

    /// Appends a child to the sequence matching its kind.
    pub fn add(&mut self, child: impl Into<TableViewChild>) -> Result<()> {
        match child.into() {
            TableViewChild::Column(column) => self.append_column(column),
            TableViewChild::SpanningColumn(column) => self.append_spanning_column(column),
            TableViewChild::Group(group) => self.append_group(group),
            TableViewChild::Row(row) => self.append_row(row),
        }
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, child: impl Into<TableViewChild>) -> Result<Self> {
        self.add(child)?;
        Ok(self)
    }

    /// Whether a column with this id is indexed.
    pub fn has_column(&self, id: &str) -> bool {
        self.column_index.contains_key(id)
    }

    /// The column with the given id.
    ///
    /// Fails with [`SwatError::NotFound`] for unknown ids.
    pub fn column(&self, id: &str) -> Result<&TableViewColumn> {
        self.column_index
            .get(id)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| SwatError::not_found("column", id))
    }

    /// Mutable form of [`column`](Self::column).
    pub fn column_mut(&mut self, id: &str) -> Result<&mut TableViewColumn> {
        match self.column_index.get(id) {
            Some(&i) => Ok(&mut self.columns[i]),
            None => Err(SwatError::not_found("column", id)),
        }
    }

    /// Every column in insertion order, hidden ones included.
    pub fn columns(&self) -> &[TableViewColumn] {
        &self.columns
    }

    /// Columns that produce cells.
    pub fn visible_columns(&self) -> impl Iterator<Item = &TableViewColumn> {
        self.columns.iter().filter(|c| c.is_visible())
    }

    /// Number of columns, hidden ones included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of visible columns. Full-width rows span this many cells.
    pub fn visible_column_count(&self) -> usize {
        self.visible_columns().count()
    }

    /// Whether a spanning column with this id is indexed.
    pub fn has_spanning_column(&self, id: &str) -> bool {
        self.spanning_column_index.contains_key(id)
    }

    /// The spanning column with the given id.
    pub fn spanning_column(&self, id: &str) -> Result<&TableViewSpanningColumn> {
        self.spanning_column_index
            .get(id)
            .map(|&i| &self.spanning_columns[i])
            .ok_or_else(|| SwatError::not_found("spanning column", id))
    }

    /// Mutable form of [`spanning_column`](Self::spanning_column).
    pub fn spanning_column_mut(&mut self, id: &str) -> Result<&mut TableViewSpanningColumn> {
        match self.spanning_column_index.get(id) {
            Some(&i) => Ok(&mut self.spanning_columns[i]),
            None => Err(SwatError::not_found("spanning column", id)),
        }
    }

    /// Every spanning column in insertion order.
    pub fn spanning_columns(&self) -> &[TableViewSpanningColumn] {
        &self.spanning_columns
    }

    /// Whether a group with this id is indexed.
    pub fn has_group(&self, id: &str) -> bool {
        self.group_index.contains_key(id)
    }

    /// The group with the given id.
    pub fn group(&self, id: &str) -> Result<&TableViewGroup> {
        self.group_index
            .get(id)
            .map(|&i| &self.groups[i])
            .ok_or_else(|| SwatError::not_found("group", id))
    }

    /// Mutable form of [`group`](Self::group).
    pub fn group_mut(&mut self, id: &str) -> Result<&mut TableViewGroup> {
        match self.group_index.get(id) {
            Some(&i) => Ok(&mut self.groups[i]),
            None => Err(SwatError::not_found("group", id)),
        }
    }

    /// Every group, outermost first.
    pub fn groups(&self) -> &[TableViewGroup] {
        &self.groups
    }

    /// Whether an extra row with this id is indexed.
    pub fn has_row(&self, id: &str) -> bool {
        self.row_index.contains_key(id)
    }

    /// The extra row with the given id.
    ///
    /// Downcast it, or use [`rows_by_type`](Self::rows_by_type), to reach the
    /// concrete row.
    pub fn row(&self, id: &str) -> Result<&dyn TableViewRow> {
        self.row_index
            .get(id)
            .map(|&i| self.extra_rows[i].as_ref())
            .ok_or_else(|| SwatError::not_found("row", id))
    }

    /// Mutable form of [`row`](Self::row).
    pub fn row_mut(&mut self, id: &str) -> Result<&mut Box<dyn TableViewRow>> {
        match self.row_index.get(id) {
            Some(&i) => Ok(&mut self.extra_rows[i]),
            None => Err(SwatError::not_found("row", id)),
        }
    }

    /// Every extra row in insertion order.
    pub fn extra_rows(&self) -> &[Box<dyn TableViewRow>] {
        &self.extra_rows
    }

    /// Extra rows of a concrete type.
    pub fn rows_by_type<T: TableViewRow + 'static>(&self) -> Vec<&T> {
        self.extra_rows
            .iter()
            .filter_map(|r| r.downcast_ref::<T>())
            .collect()
    }

    /// The input row, if one was added.
    pub fn input_row(&self) -> Option<&InputRow> {
        self.rows_by_type::<InputRow>().into_iter().next()
    }

    /// Values selected in the `checkbox` column during the last `process`.
    pub fn checked_items(&self) -> &[String] {
        &self.checked_items
    }

    /// Orders by `id` unless the request names another column.
    pub fn set_default_orderby_column(&mut self, id: &str, direction: OrderDirection) -> Result<()> {
        let position = self.column_index.get(id).copied().ok_or_else(|| {
            SwatError::Constraint(format!("column '{}' is not part of this table view", id))
        })?;
        let ordering = self.columns[position].ordering_mut().ok_or_else(|| {
            SwatError::Constraint(format!("column '{}' is not orderable", id))
        })?;
        ordering.set_default_direction(direction);
        Ok(())
    }

    /// The column the view is currently ordered by.
    pub fn orderby_column(&self) -> Option<&TableViewColumn> {
        self.columns.iter().find(|c| c.direction().is_ordered())
    }

    fn row_context(&self, row_count: usize) -> RowContext<'_> {
        RowContext::new(self.state.id.as_deref(), &self.columns, row_count)
    }

    fn display_header(&self, out: &mut Response) -> Result<()> {
        out.push_str("<thead><tr>");
        for column in &self.columns {
            column.display_header_cell(out)?;
        }
        out.push_str("</tr></thead>");
        Ok(())
    }

    fn display_body(&self, model: &dyn TableModel, out: &mut Response) -> Result<()> {
        let colspan = self.visible_column_count();
        out.push_str("<tbody>");

        let mut rows = model.rows().peekable();
        let mut previous: Option<&Value> = None;
        let mut position = 0;
        while let Some(row) = rows.next() {
            position += 1;
            let next = rows.peek().copied();

            for group in &self.groups {
                group.display_header(previous, row, colspan, out)?;
            }

            let has_message = self.columns.iter().any(|c| c.has_message_for(row));
            self.display_data_row(row, position, has_message, out)?;
            self.display_spanning_rows(row, position, has_message, colspan, out)?;
            self.display_row_messages(row, colspan, out);

            for group in &self.groups {
                group.display_footer(row, next, colspan, out)?;
            }
            previous = Some(row);
        }

        out.push_str("</tbody>");
        Ok(())
    }

    fn display_data_row(
        &self,
        row: &Value,
        position: usize,
        has_message: bool,
        out: &mut Response,
    ) -> Result<()> {
        let mut tr = HtmlTag::new("tr");
        if position % 2 == 1 {
            tr.add_class("odd");
        }
        for column in &self.columns {
            tr.add_attributes(column.tr_attributes(row));
        }
        if has_message {
            tr.add_class("swat-error");
        }
        tr.open(out);
        for column in &self.columns {
            column.display(row, out)?;
        }
        tr.close(out);
        Ok(())
    }

    fn display_spanning_rows(
        &self,
        row: &Value,
        position: usize,
        has_message: bool,
        colspan: usize,
        out: &mut Response,
    ) -> Result<()> {
        let mut tr = HtmlTag::new("tr");
        tr.set_classes(row_classes(position, has_message));
        tr.add_class("swat-table-view-spanning-column");
        for column in &self.spanning_columns {
            if column.is_visible_for(row) {
                tr.open(out);
                column.display(row, colspan, out)?;
                tr.close(out);
            }
        }
        Ok(())
    }

    fn display_row_messages(&self, row: &Value, colspan: usize, out: &mut Response) {
        let messages: Vec<Message> = self
            .columns
            .iter()
            .flat_map(|c| c.messages_for(row))
            .collect();
        if messages.is_empty() {
            return;
        }
        out.push_str(r#"<tr class="swat-table-view-input-row-messages">"#);
        let td = HtmlTag::new("td").attr("colspan", colspan.max(1).to_string());
        td.open(out);
        out.push_str(r#"<ul class="swat-table-view-input-row-messages">"#);
        for message in &messages {
            HtmlTag::new("li")
                .attr("class", message.css_class())
                .content(message.primary_content(), message.content_type())
                .display(out);
        }
        out.push_str("</ul>");
        td.close(out);
        out.push_str("</tr>");
    }

    fn display_footer(&self, row_count: usize, out: &mut Response) -> Result<()> {
        let context = self.row_context(row_count);
        let footer = out.capture(|o| {
            for row in &self.extra_rows {
                row.display(&context, o)?;
            }
            Ok::<(), SwatError>(())
        })?;
        if footer.is_empty() {
            return Ok(());
        }
        let mut tfoot = HtmlTag::new("tfoot");
        if self.invalid_tfoot_ordering {
            tfoot.set_attr("class", "swat-table-view-invalid-tfoot-ordering");
        }
        tfoot.set_content(footer, ContentType::Html);
        tfoot.display(out);
        Ok(())
    }

    /// Script registering the view and its children on the client.
    pub fn inline_javascript(&self) -> Option<String> {
        let id = self.state.id.as_deref()?;
        let mut script = format!("var {} = new SwatTableView('{}');", id, escape_js_string(id));
        let context = self.row_context(self.model.as_ref().map_or(0, |m| m.row_count()));
        let children = self
            .columns
            .iter()
            .filter_map(|c| c.inline_script())
            .chain(self.spanning_columns.iter().filter_map(|c| c.inline_script()))
            .chain(self.extra_rows.iter().filter_map(|r| r.inline_script(&context)));
        for child_script in children {
            script.push('\n');
            script.push_str(&child_script);
        }
        Some(script)
    }
}

impl Widget for TableView {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn kind(&self) -> &'static str {
        "table view"
    }

    fn init(&mut self) -> Result<()> {
        tracing::debug!(
            id = ?self.state.id,
            columns = self.columns.len(),
            spanning_columns = self.spanning_columns.len(),
            groups = self.groups.len(),
            rows = self.extra_rows.len(),
            "initializing table view"
        );
        for column in &mut self.columns {
            column.init()?;
        }
        for row in &mut self.extra_rows {
            row.init()?;
        }
        for group in &mut self.groups {
            group.init()?;
        }
        for column in &mut self.spanning_columns {
            column.init()?;
        }
        self.column_index = index_first_wins(self.columns.iter().map(|c| c.id()));
        self.row_index = index_first_wins(self.extra_rows.iter().map(|r| r.id()));
        self.group_index = index_first_wins(self.groups.iter().map(|g| g.id()));
        self.spanning_column_index =
            index_first_wins(self.spanning_columns.iter().map(|c| c.id()));
        self.state.initialized = true;
        Ok(())
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.state.processed = true;
        for column in &mut self.columns {
            column.process(ctx)?;
        }
        for column in &mut self.spanning_columns {
            column.process(ctx)?;
        }
        for row in &mut self.extra_rows {
            row.process(ctx)?;
        }
        self.checked_items = match self.column(CHECKBOX_COLUMN_ID) {
            Ok(column) => column.selected_items().unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        if !self.state.visible {
            return Ok(());
        }
        let Some(model) = self.model.as_deref() else {
            return Ok(());
        };

        let row_count = model.row_count();
        let row_visible = self
            .extra_rows
            .iter()
            .any(|r| r.is_visible_by_count(row_count));
        if row_count == 0 && !row_visible {
            if let Some(message) = &self.no_records_message {
                HtmlTag::new("div")
                    .attr("class", "swat-none")
                    .content(message.as_str(), self.no_records_content_type)
                    .display(out);
                return Ok(());
            }
        }

        let mut table = HtmlTag::new("table");
        table.set_opt_attr("id", self.state.id.as_deref());
        table.set_classes(self.state.css_classes(&["swat-table-view"]));
        table.set_attr("cellspacing", "0");
        table.open(out);

        self.display_header(out)?;
        if self.invalid_tfoot_ordering {
            self.display_body(model, out)?;
            self.display_footer(row_count, out)?;
        } else {
            self.display_footer(row_count, out)?;
            self.display_body(model, out)?;
        }

        table.close(out);

        if let Some(script) = self.inline_javascript() {
            out.push_script(&script);
        }
        Ok(())
    }

    /// Own messages plus every column's messages for every row.
    fn messages(&self) -> Vec<Message> {
        let mut messages = self.state.messages.clone();
        if let Some(model) = self.model.as_deref() {
            for row in model.rows() {
                for column in &self.columns {
                    messages.extend(column.messages_for(row));
                }
            }
        }
        messages
    }

    fn has_message(&self) -> bool {
        if !self.state.messages.is_empty() {
            return true;
        }
        let Some(model) = self.model.as_deref() else {
            return false;
        };
        model
            .rows()
            .any(|row| self.columns.iter().any(|c| c.has_message_for(row)))
    }

    fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        set.add_entry(HtmlHeadEntry::javascript(
            "packages/swat/javascript/swat-table-view.js",
        ));
        set.add_entry(HtmlHeadEntry::stylesheet(
            "packages/swat/styles/swat-table-view.css",
        ));
        for column in &self.columns {
            set.add_set(&column.head_entries());
        }
        for column in &self.spanning_columns {
            set.add_set(&column.head_entries());
        }
        for group in &self.groups {
            set.add_set(&group.head_entries());
        }
        for row in &self.extra_rows {
            set.add_set(&row.head_entries());
        }
        set
    }
}

impl UiParent for TableView {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        let child = TableViewChild::try_from(child)?;
        self.add(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_view::model::TableStore;
    use crate::table_view::renderer::TextCellRenderer;
    use crate::table_view::row::CheckAllRow;
    use serde_json::json;

    fn view() -> TableView {
        let mut view = TableView::new("invoices").with_model(TableStore::from_rows(vec![
            json!({"amt": 10}),
            json!({"amt": 20}),
        ]));
        view.append_column(
            TableViewColumn::new("amt", "Amount").with_renderer(TextCellRenderer::field("amt")),
        )
        .unwrap();
        view
    }

    #[test]
    fn duplicate_column_id_is_rejected_at_append() {
        let mut view = view();
        let err = view
            .append_column(TableViewColumn::new("amt", "Again"))
            .unwrap_err();
        assert!(matches!(err, SwatError::DuplicateId { kind: "column", .. }));
        assert_eq!(view.column_count(), 1);
    }

    #[test]
    fn same_id_in_different_sequences_is_allowed() {
        let mut view = view();
        view.append_group(TableViewGroup::new("amt", "amt")).unwrap();
        assert!(view.has_group("amt"));
        assert!(view.has_column("amt"));
    }

    #[test]
    fn init_reindexes_first_wins() {
        let mut view = view();
        view.append_column(TableViewColumn::new("other", "Other"))
            .unwrap();
        view.column_mut("other").unwrap().set_id(Some("amt".to_string()));
        view.init().unwrap();

        assert_eq!(view.column("amt").unwrap().title(), "Amount");
        assert!(!view.has_column("other"));
        assert_eq!(view.column_count(), 2);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let view = view();
        assert!(matches!(
            view.column("missing"),
            Err(SwatError::NotFound { kind: "column", .. })
        ));
        assert!(matches!(view.group("g"), Err(SwatError::NotFound { .. })));
        assert!(matches!(view.row("r"), Err(SwatError::NotFound { .. })));
        assert!(matches!(
            view.spanning_column("s"),
            Err(SwatError::NotFound { .. })
        ));
    }

    #[test]
    fn second_input_row_violates_constraint() {
        let mut view = view();
        view.append_row(Box::new(InputRow::new("first"))).unwrap();
        view.append_row(Box::new(CheckAllRow::new("check_all"))).unwrap();
        let err = view.append_row(Box::new(InputRow::new("second"))).unwrap_err();
        assert!(matches!(err, SwatError::Constraint(_)));
        assert_eq!(view.input_row().and_then(|r| r.id()), Some("first"));
    }

    #[test]
    fn widgets_are_a_type_mismatch() {
        let mut view = view();
        let err = view
            .add_child(UiObject::widget(crate::widgets::Button::new("b", "B")))
            .unwrap_err();
        assert!(matches!(err, SwatError::TypeMismatch { found: "widget", .. }));
    }

    #[test]
    fn default_orderby_must_be_an_orderable_member() {
        let mut view = view();
        assert!(matches!(
            view.set_default_orderby_column("nope", OrderDirection::Ascending),
            Err(SwatError::Constraint(_))
        ));
        assert!(matches!(
            view.set_default_orderby_column("amt", OrderDirection::Ascending),
            Err(SwatError::Constraint(_))
        ));

        view.append_column(TableViewColumn::new("date", "Date").orderable())
            .unwrap();
        view.set_default_orderby_column("date", OrderDirection::Descending)
            .unwrap();
        assert_eq!(view.orderby_column().and_then(|c| c.id()), Some("date"));
    }

    #[test]
    fn hidden_or_modelless_view_displays_nothing() {
        let mut out = Response::new();
        TableView::new("t").display(&mut out).unwrap();
        let mut hidden = view();
        hidden.set_visible(false);
        hidden.display(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn visible_column_count_ignores_hidden_columns() {
        let mut view = view();
        view.append_column(TableViewColumn::new("x", "X").hidden())
            .unwrap();
        assert_eq!(view.column_count(), 2);
        assert_eq!(view.visible_column_count(), 1);
    }

    #[test]
    fn head_entries_include_view_assets() {
        let set = view().head_entries();
        assert!(set.contains("packages/swat/javascript/swat-table-view.js"));
        assert!(set.contains("packages/swat/styles/swat-table-view.css"));
    }
}
