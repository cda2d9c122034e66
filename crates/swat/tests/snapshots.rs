use insta::assert_snapshot;
use serde_json::json;
use swat::table_view::{TableStore, TableView, TableViewColumn, TextCellRenderer};
use swat::widgets::{Button, Entry, Form};
use swat::{Response, Widget};

#[test]
fn table_view_markup() {
    let mut view = TableView::new("invoices")
        .with_model(TableStore::from_rows(vec![json!({"amt": 10}), json!({"amt": 20})]));
    view.append_column(
        TableViewColumn::new("amt", "Amount").with_renderer(TextCellRenderer::field("amt")),
    )
    .unwrap();
    view.init().unwrap();

    let mut out = Response::new();
    view.display(&mut out).unwrap();

    assert_snapshot!(out.as_str(), @r#"
<table id="invoices" class="swat-table-view" cellspacing="0"><thead><tr><th>Amount</th></tr></thead><tbody><tr class="odd"><td class="swat-text-cell-renderer">10</td></tr><tr><td class="swat-text-cell-renderer">20</td></tr></tbody></table><script type="text/javascript">
//<![CDATA[
var invoices = new SwatTableView('invoices');
//]]>
</script>
"#);
}

#[test]
fn form_markup() {
    let mut form = Form::new("edit")
        .with_child(Entry::new("title", "Title"))
        .with_child(Button::new("save", "Save"));
    form.add_hidden_field("x", "1");
    form.init().unwrap();

    let mut out = Response::new();
    form.display(&mut out).unwrap();

    assert_snapshot!(out.as_str(), @r##"
<form id="edit" method="post" action="#" class="swat-form"><input type="text" name="title" id="title" class="swat-entry" value="" /><input type="submit" name="save" id="save" value="Save" class="swat-button" /><div class="swat-input-hidden"><input type="hidden" name="x" value="1" /><input type="hidden" name="_swat_form_hidden_fields[]" value="x" /><input type="hidden" name="_swat_form_process" value="edit" /><input type="hidden" name="_swat_form_hidden_fields[]" value="_swat_form_process" /></div></form><script type="text/javascript">
//<![CDATA[
var edit_obj = new SwatForm('edit');
//]]>
</script>
"##);
}
