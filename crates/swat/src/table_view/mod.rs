//! Table views: tabular rendering and processing of a row model.
//!
//! A [`TableView`] combines four kinds of children:
//!
//! | Child | Role |
//! |-------|------|
//! | [`TableViewColumn`] | One cell per row, drawn by its [`CellRenderer`]s |
//! | [`TableViewSpanningColumn`] | A full-width cell on its own row below the data row |
//! | [`TableViewGroup`] | Header and footer rows around runs of rows sharing a key |
//! | [`TableViewRow`] | Extra rows in the footer, such as [`CheckAllRow`] and [`InputRow`] |
//!
//! ```rust
//! use serde_json::json;
//! use swat::table_view::{TableStore, TableView, TableViewColumn, TextCellRenderer};
//! use swat::{Response, Widget};
//!
//! let mut view = TableView::new("invoices")
//!     .with_model(TableStore::from_rows(vec![json!({"amt": 10}), json!({"amt": 20})]));
//! view.append_column(
//!     TableViewColumn::new("amt", "Amount").with_renderer(TextCellRenderer::field("amt")),
//! ).unwrap();
//! view.init().unwrap();
//!
//! let mut out = Response::new();
//! view.display(&mut out).unwrap();
//! assert!(out.as_str().starts_with(r#"<table id="invoices" class="swat-table-view""#));
//! ```

mod column;
mod group;
mod model;
mod ordering;
mod renderer;
mod row;
mod spanning;
mod view;

pub use column::TableViewColumn;
pub use group::{GroupBoundary, TableViewGroup};
pub use model::{field, field_string, is_truthy, value_to_string, TableModel, TableStore};
pub use ordering::{OrderDirection, Orderable, ORDERBY_DIR_PARAM, ORDERBY_PARAM};
pub use renderer::{
    Binding, CellRenderer, CheckboxCellRenderer, EntryCellRenderer, LinkCellRenderer,
    RendererClone, TextCellRenderer,
};
pub use row::{CheckAllRow, InputRow, RowClone, RowContext, TableViewRow};
pub use spanning::TableViewSpanningColumn;
pub use view::{TableView, TableViewChild, CHECKBOX_COLUMN_ID, DEFAULT_NO_RECORDS_MESSAGE};
