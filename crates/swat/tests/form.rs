use swat::widgets::{Button, Entry, Flydown, Form, HIDDEN_FIELD, PROCESS_FIELD};
use swat::{FieldValue, FormData, Method, Request, Ui, Widget};

fn page() -> Ui {
    let mut ui = Ui::new();
    let mut form = Form::new("edit")
        .with_child(Entry::new("title", "Title").required(true))
        .with_child(
            Flydown::new("status", "Status")
                .with_option("draft", "Draft")
                .with_option("live", "Live"),
        )
        .with_child(Button::new("save", "Save"))
        .with_child(Button::new("delete", "Delete"));
    form.add_hidden_field("x", "1");
    ui.add(form);
    ui
}

/// Parses the hidden inputs a rendered form would submit back.
fn resubmit(html: &str) -> FormData {
    let mut data = FormData::new();
    for input in html.split(r#"<input type="hidden" "#).skip(1) {
        let name = attr(input, "name");
        let value = attr(input, "value");
        match name.strip_suffix("[]") {
            Some(list) => data.push(list, value.to_string()),
            None => data.insert(name, value),
        }
    }
    data
}

fn attr<'a>(tag: &'a str, name: &str) -> &'a str {
    let start = tag.find(&format!(r#"{}=""#, name)).unwrap() + name.len() + 2;
    let len = tag[start..].find('"').unwrap();
    &tag[start..start + len]
}

#[test]
fn hidden_fields_round_trip_through_manifest() {
    let mut ui = page();
    ui.init().unwrap();
    let html = ui.display().unwrap();

    let data = resubmit(&html);
    assert_eq!(data.get_str(PROCESS_FIELD), Some("edit"));
    assert_eq!(data.get_list(HIDDEN_FIELD), vec!["x", PROCESS_FIELD]);

    let mut next = page();
    next.widget_as_mut::<Form>("edit").unwrap().clear_hidden_fields();
    next.process(&Request::new().with_post(data)).unwrap();

    let form = next.widget_as::<Form>("edit").unwrap();
    assert_eq!(form.hidden_field_str("x"), Some("1"));
    assert!(form.is_processed());
}

#[test]
fn list_hidden_fields_round_trip() {
    let mut ui = page();
    ui.widget_as_mut::<Form>("edit")
        .unwrap()
        .add_hidden_field("ids", vec!["3", "9"]);
    ui.init().unwrap();
    let data = resubmit(&ui.display().unwrap());

    let mut next = Ui::new();
    next.add(Form::new("edit"));
    next.process(&Request::new().with_post(data)).unwrap();
    let form = next.widget_as::<Form>("edit").unwrap();
    assert_eq!(
        form.hidden_field("ids"),
        Some(&FieldValue::List(vec!["3".to_string(), "9".to_string()]))
    );
}

#[test]
fn mismatched_marker_leaves_children_unprocessed() {
    let mut ui = page();
    let request = Request::new().with_post(
        FormData::new()
            .with(PROCESS_FIELD, "other")
            .with("title", "Hello")
            .with("save", "Save"),
    );
    ui.process(&request).unwrap();

    let form = ui.widget_as::<Form>("edit").unwrap();
    assert!(!form.is_processed());
    assert_eq!(form.clicked_button(), None);
    assert_eq!(ui.widget_as::<Entry>("title").unwrap().value(), None);
    assert!(!ui.widget("save").unwrap().is_processed());
}

#[test]
fn get_form_ignores_post_data() {
    let mut ui = Ui::new();
    let mut form = Form::new("search").with_child(Entry::new("q", "Query"));
    form.set_method(Method::Get);
    ui.add(form);

    let request = Request::new()
        .with_post(FormData::new().with(PROCESS_FIELD, "search").with("q", "post"))
        .with_get(FormData::new().with(PROCESS_FIELD, "search").with("q", "get"));
    ui.process(&request).unwrap();
    assert_eq!(ui.widget_as::<Entry>("q").unwrap().value(), Some("get"));
}

#[test]
fn submission_records_button_and_values() {
    let mut ui = page();
    let request = Request::new().with_post(FormData::parse_urlencoded(
        "_swat_form_process=edit&title=Report&status=live&delete=Delete",
    ));
    ui.process(&request).unwrap();

    let form = ui.widget_as::<Form>("edit").unwrap();
    assert_eq!(form.clicked_button(), Some("delete"));
    assert!(ui.widget_as::<Button>("delete").unwrap().has_been_clicked());
    assert!(!ui.widget_as::<Button>("save").unwrap().has_been_clicked());
    assert_eq!(ui.widget_as::<Flydown>("status").unwrap().value(), Some("live"));
    assert!(!form.has_message());
}

#[test]
fn validation_problems_become_messages() {
    let mut ui = page();
    let request = Request::new().with_post(FormData::parse_urlencoded(
        "_swat_form_process=edit&title=+++&status=bogus",
    ));
    ui.process(&request).unwrap();

    let form = ui.widget_as::<Form>("edit").unwrap();
    let messages = form.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].primary_content(), "The Title field is required.");
    assert_eq!(ui.widget_as::<Flydown>("status").unwrap().value(), None);
}
