use swat::widgets::{Entry, Form, Replicator, PROCESS_FIELD};
use swat::{FormData, Request, Ui, Widget};

fn page() -> Ui {
    let mut ui = Ui::new();
    ui.add(
        Form::new("edit").with_child(
            Replicator::new("people")
                .with_replicators([("a", "Alice"), ("b", "Bob")])
                .with_child(Entry::new("name", "Name")),
        ),
    );
    ui.init().unwrap();
    ui
}

#[test]
fn clones_get_owner_and_key_suffix() {
    let ui = page();
    assert!(ui.widget("name_peoplea").is_ok());
    assert!(ui.widget("name_peopleb").is_ok());
    assert!(ui.widget("name").is_err());

    let replicator = ui.widget_as::<Replicator>("people").unwrap();
    assert_eq!(replicator.widget("name", "a").unwrap().id(), Some("name_peoplea"));
}

#[test]
fn clones_are_independently_mutable() {
    let mut ui = page();
    {
        let replicator = ui.widget_as_mut::<Replicator>("people").unwrap();
        let a = replicator.widget_mut("name", "a").unwrap();
        a.downcast_mut::<Entry>()
            .unwrap()
            .set_value(Some("Ann".to_string()));
        a.set_visible(false);
    }

    let a = ui.widget_as::<Entry>("name_peoplea").unwrap();
    let b = ui.widget_as::<Entry>("name_peopleb").unwrap();
    assert_eq!(a.value(), Some("Ann"));
    assert!(!a.is_visible());
    assert_eq!(b.value(), None);
    assert!(b.is_visible());
}

#[test]
fn clones_process_their_own_fields() {
    let mut ui = page();
    let request = Request::new().with_post(
        FormData::new()
            .with(PROCESS_FIELD, "edit")
            .with("name_peoplea", "Ann")
            .with("name_peopleb", "Ben"),
    );
    ui.process(&request).unwrap();
    assert_eq!(ui.widget_as::<Entry>("name_peoplea").unwrap().value(), Some("Ann"));
    assert_eq!(ui.widget_as::<Entry>("name_peopleb").unwrap().value(), Some("Ben"));

    let html = ui.display().unwrap();
    assert!(html.contains("<legend>Alice</legend>"));
    assert!(html.contains(r#"name="name_peopleb""#));
}
