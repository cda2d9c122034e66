//! Table view columns.
//!
//! A column owns an ordered list of cell renderers and is invoked once per
//! row with that row as a transient parameter. It never owns table rows.

use serde_json::Value;
use swat_html::{ContentType, HtmlHeadEntrySet, HtmlTag, Response};

use super::ordering::{OrderDirection, Orderable};
use super::renderer::CellRenderer;
use crate::container::{UiObject, UiParent};
use crate::error::{Result, SwatError};
use crate::message::Message;
use crate::request::ProcessContext;

/// One column of a table view.
#[derive(Debug, Clone)]
pub struct TableViewColumn {
    id: Option<String>,
    title: String,
    title_content_type: ContentType,
    visible: bool,
    renderers: Vec<Box<dyn CellRenderer>>,
    ordering: Option<Orderable>,
    classes: Vec<String>,
}

impl TableViewColumn {
    /// Creates a visible column with a plain-text header title.
    ///
    /// The id doubles as the form field name for renderers that read input,
    /// and as the `orderby` value for orderable columns.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut column = Self::anonymous(title);
        column.id = Some(id.into());
        column
    }

    /// A column without an id. It renders but cannot be looked up.
    pub fn anonymous(title: impl Into<String>) -> Self {
        TableViewColumn {
            id: None,
            title: title.into(),
            title_content_type: ContentType::Plain,
            visible: true,
            renderers: Vec::new(),
            ordering: None,
            classes: Vec::new(),
        }
    }

    /// Appends a cell renderer. Renderers draw into the same cell in order.
    pub fn with_renderer<R: CellRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Appends an already boxed renderer.
    pub fn add_renderer(&mut self, renderer: Box<dyn CellRenderer>) {
        self.renderers.push(renderer);
    }

    /// Makes the header a link that cycles the sort direction.
    pub fn orderable(self) -> Self {
        self.with_ordering(Orderable::new())
    }

    /// Uses a preconfigured ordering, for instance one with a base link.
    pub fn with_ordering(mut self, ordering: Orderable) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Adds a class to the header cell and to every body cell.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets how the header title is written. Titles are escaped by default.
    pub fn title_content_type(mut self, content_type: ContentType) -> Self {
        self.title_content_type = content_type;
        self
    }

    /// Starts the column hidden. Hidden columns are still processed.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The id, or `None` for anonymous columns.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Changes the id. The view picks this up on its next `init`.
    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    /// The header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the column writes a header and cells.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the column.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The cell renderers in drawing order.
    pub fn renderers(&self) -> &[Box<dyn CellRenderer>] {
        &self.renderers
    }

    /// The renderer at `index`.
    pub fn renderer(&self, index: usize) -> Option<&dyn CellRenderer> {
        self.renderers.get(index).map(|r| r.as_ref())
    }

    /// Mutable form of [`renderer`](Self::renderer).
    pub fn renderer_mut(&mut self, index: usize) -> Option<&mut Box<dyn CellRenderer>> {
        self.renderers.get_mut(index)
    }

    /// Whether the header links to a reordering of the view.
    pub fn is_orderable(&self) -> bool {
        self.ordering.is_some()
    }

    /// The ordering state of an orderable column.
    pub fn ordering(&self) -> Option<&Orderable> {
        self.ordering.as_ref()
    }

    /// Mutable form of [`ordering`](Self::ordering).
    pub fn ordering_mut(&mut self) -> Option<&mut Orderable> {
        self.ordering.as_mut()
    }

    /// Current sort direction. Columns that cannot be ordered report `None`.
    pub fn direction(&self) -> OrderDirection {
        self.ordering
            .as_ref()
            .map_or(OrderDirection::None, Orderable::direction)
    }

    fn name(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Initializes every renderer.
    pub fn init(&mut self) -> Result<()> {
        for renderer in &mut self.renderers {
            renderer.init()?;
        }
        Ok(())
    }

    /// Processes renderers, then reads ordering from the query string.
    pub fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        let name = self.name().to_string();
        for renderer in &mut self.renderers {
            renderer.process(ctx, &name)?;
        }
        if let (Some(ordering), Some(id)) = (self.ordering.as_mut(), self.id.as_deref()) {
            ordering.process(id, ctx.query());
        }
        Ok(())
    }

    /// Writes the `th` for this column. Hidden columns write nothing.
    pub fn display_header_cell(&self, out: &mut Response) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        let mut th = HtmlTag::new("th");
        th.set_classes(&self.classes);
        match (&self.ordering, self.id.as_deref()) {
            (Some(ordering), Some(id)) => {
                if let Some(class) = ordering.direction().css_class() {
                    th.add_class(class);
                }
                let mut anchor = HtmlTag::new("a");
                anchor.set_attr("href", ordering.href(id));
                anchor.set_content(self.title.as_str(), self.title_content_type);
                th.set_content(anchor.to_html(), ContentType::Html);
            }
            _ => th.set_content(self.title.as_str(), self.title_content_type),
        }
        th.display(out);
        Ok(())
    }

    /// The `td` used for this column's cells.
    pub(crate) fn td_tag(&self) -> HtmlTag {
        let mut td = HtmlTag::new("td");
        if let Some(first) = self.renderers.first() {
            td.add_class(first.css_class());
        }
        for class in &self.classes {
            td.add_class(class);
        }
        td
    }

    /// Writes every renderer visible for `row`.
    pub(crate) fn display_renderers(&self, row: &Value, out: &mut Response) -> Result<()> {
        let name = self.name();
        for renderer in &self.renderers {
            if renderer.is_visible_for(row) {
                renderer.render(row, name, out)?;
            }
        }
        Ok(())
    }

    /// Writes the cell for `row`. Hidden columns write nothing.
    pub fn display(&self, row: &Value, out: &mut Response) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        let td = self.td_tag();
        td.open(out);
        self.display_renderers(row, out)?;
        td.close(out);
        Ok(())
    }

    /// Whether any renderer draws something for `row`.
    pub fn has_visible_renderer(&self, row: &Value) -> bool {
        self.renderers.iter().any(|r| r.is_visible_for(row))
    }

    /// Attributes the renderers add to the `tr` of `row`.
    pub fn tr_attributes(&self, row: &Value) -> Vec<(String, String)> {
        self.renderers
            .iter()
            .flat_map(|r| r.tr_attributes(row))
            .collect()
    }

    /// Validation messages the renderers raised for `row`.
    pub fn messages_for(&self, row: &Value) -> Vec<Message> {
        self.renderers
            .iter()
            .flat_map(|r| r.messages_for(row))
            .collect()
    }

    /// Whether any renderer raised a message for `row`.
    pub fn has_message_for(&self, row: &Value) -> bool {
        self.renderers.iter().any(|r| r.has_message_for(row))
    }

    /// The selection of the first renderer that offers one.
    pub fn selected_items(&self) -> Option<Vec<String>> {
        self.renderers.iter().find_map(|r| r.selected_items())
    }

    /// Client-side setup for the renderers, one statement per line.
    pub fn inline_script(&self) -> Option<String> {
        let scripts: Vec<String> = self
            .renderers
            .iter()
            .filter_map(|r| r.inline_script(self.name()))
            .collect();
        if scripts.is_empty() {
            None
        } else {
            Some(scripts.join("\n"))
        }
    }

    /// Stylesheets and scripts the renderers need.
    pub fn head_entries(&self) -> HtmlHeadEntrySet {
        let mut set = HtmlHeadEntrySet::new();
        for renderer in &self.renderers {
            set.add_set(&renderer.head_entries());
        }
        set
    }
}

impl UiParent for TableViewColumn {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        match child {
            UiObject::Renderer(renderer) => {
                self.add_renderer(renderer);
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
    use crate::request::{FormData, Request};
    use crate::table_view::renderer::{Binding, TextCellRenderer};
    use serde_json::json;

    fn amount_column() -> TableViewColumn {
        TableViewColumn::new("amt", "Amount").with_renderer(TextCellRenderer::field("amt"))
    }

    #[test]
    fn cell_uses_first_renderer_class() {
        let mut out = Response::new();
        amount_column().display(&json!({"amt": 10}), &mut out).unwrap();
        assert_eq!(out.as_str(), r#"<td class="swat-text-cell-renderer">10</td>"#);
    }

    #[test]
    fn hidden_column_writes_nothing() {
        let column = amount_column().hidden();
        let mut out = Response::new();
        column.display_header_cell(&mut out).unwrap();
        column.display(&json!({"amt": 10}), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn plain_header_is_escaped_title() {
        let column = TableViewColumn::new("a", "Q&A");
        let mut out = Response::new();
        column.display_header_cell(&mut out).unwrap();
        assert_eq!(out.as_str(), "<th>Q&amp;A</th>");
    }

    #[test]
    fn orderable_header_links_to_next_direction() {
        let mut column = amount_column().orderable();
        let request = Request::new()
            .with_get(FormData::new().with("orderby", "amt").with("orderbydir", "asc"));
        let mut ctx = ProcessContext::new(&request);
        column.process(&mut ctx).unwrap();

        let mut out = Response::new();
        column.display_header_cell(&mut out).unwrap();
        assert_eq!(column.direction(), OrderDirection::Ascending);
        assert_eq!(
            out.as_str(),
            r#"<th class="swat-table-view-column-sort-ascending"><a href="?orderby=amt&amp;orderbydir=desc">Amount</a></th>"#
        );
    }

    #[test]
    fn visible_renderer_check_is_per_row() {
        let column = TableViewColumn::new("note", "Note")
            .with_renderer(TextCellRenderer::field("note").visible_when(Binding::field("note")));
        assert!(column.has_visible_renderer(&json!({"note": "x"})));
        assert!(!column.has_visible_renderer(&json!({"note": ""})));
    }

    #[test]
    fn column_rejects_widgets() {
        let mut column = amount_column();
        let err = column
            .add_child(UiObject::widget(crate::widgets::Button::new("save", "Save")))
            .unwrap_err();
        assert!(matches!(err, SwatError::TypeMismatch { found: "widget", .. }));
    }
}
