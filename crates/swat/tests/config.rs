use std::io::Write;

use swat::table_view::{TableStore, TableView};
use swat::widgets::Form;
use swat::{ErrorReporter, Method, Response, SwatConfig, SwatError, Widget};
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn loads_config_from_file() {
    let file = config_file(
        "errors:\n  display: false\ntable_view:\n  no_records_message: Nothing here\nform:\n  method: get\n  action: /search\n",
    );
    let config = SwatConfig::from_file(file.path()).unwrap();
    assert!(!config.errors.display);
    assert!(config.errors.log);
    assert_eq!(config.form.method, Method::Get);
    assert_eq!(config.form.action, "/search");
}

#[test]
fn missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SwatConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SwatError::Config(_)));
}

#[test]
fn widgets_take_defaults_from_config() {
    let file = config_file(
        "table_view:\n  no_records_message: Nothing here\n  invalid_tfoot_ordering: true\nform:\n  method: get\n  action: /search\n",
    );
    let config = SwatConfig::from_file(file.path()).unwrap();

    let mut view = TableView::new("empty")
        .with_config(&config.table_view)
        .with_model(TableStore::from_rows(Vec::new()));
    view.init().unwrap();
    let mut out = Response::new();
    view.display(&mut out).unwrap();
    assert_eq!(out.as_str(), r#"<div class="swat-none">Nothing here</div>"#);
    assert!(view.uses_invalid_tfoot_ordering());

    let form = Form::with_config("search", &config.form);
    let mut out = Response::new();
    form.display(&mut out).unwrap();
    assert!(out
        .as_str()
        .starts_with(r#"<form id="search" method="get" action="/search" class="swat-form">"#));
}

#[test]
fn disabled_error_display_writes_nothing() {
    let config = SwatConfig::from_yaml("errors:\n  display: false\n  log: false\n").unwrap();
    let reporter = ErrorReporter::from_config(&config.errors);
    let mut out = Response::new();
    reporter
        .report(&SwatError::Constraint("boom".to_string()), &mut out)
        .unwrap();
    assert!(out.is_empty());

    let reporter = ErrorReporter::new();
    reporter
        .report(&SwatError::Constraint("<boom>".to_string()), &mut out)
        .unwrap();
    assert!(out.as_str().contains("&lt;boom&gt;"));
}
