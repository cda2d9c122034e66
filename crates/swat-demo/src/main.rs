//! Demo page for the swat widget toolkit.
//!
//! Builds an invoice list (a form holding a grouped, checkable table view and
//! an action menu), optionally processes a urlencoded submission against it,
//! and prints the resulting HTML.
//!
//! ```text
//! swat-demo
//! swat-demo --submit '_swat_form_process=invoices&checkbox[]=2&invoices_actions_action_flydown=archive'
//! swat-demo --data rows.json --config swat.yaml head
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use swat::table_view::{
    Binding, CheckAllRow, CheckboxCellRenderer, LinkCellRenderer, OrderDirection, TableStore,
    TableView, TableViewColumn, TableViewGroup, TextCellRenderer,
};
use swat::widgets::{ActionItem, Actions, Button, EmailEntry, Entry, Form};
use swat::{FormData, Method, Request, Response, SwatConfig, Ui, Widget};
use tracing_subscriber::EnvFilter;

/// Render the swat demo page.
#[derive(Parser, Debug)]
#[command(name = "swat-demo")]
#[command(version)]
#[command(about = "Render a demo swat page, optionally after processing a submission")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with an array of invoice rows
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Urlencoded form submission to process before rendering
    #[arg(short, long, global = true)]
    submit: Option<String>,

    /// Method the form submits with (post or get)
    #[arg(short, long, global = true)]
    method: Option<String>,

    /// Log lifecycle events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the page markup (default)
    Page,
    /// Print the stylesheet and script tags the page needs
    Head,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Invoice {
    id: u32,
    client: String,
    amount: f64,
    #[serde(default)]
    note: Option<String>,
}

fn sample_invoices() -> Vec<Invoice> {
    vec![
        Invoice { id: 1, client: "Acme".into(), amount: 120.0, note: None },
        Invoice { id: 2, client: "Acme".into(), amount: 80.5, note: Some("Paid late".into()) },
        Invoice { id: 3, client: "Globex".into(), amount: 310.0, note: None },
        Invoice { id: 4, client: "Initech".into(), amount: 42.0, note: None },
        Invoice { id: 5, client: "Initech".into(), amount: 19.99, note: None },
    ]
}

fn load_invoices(path: Option<&Path>) -> Result<Vec<Invoice>> {
    let Some(path) = path else {
        return Ok(sample_invoices());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid rows in {}", path.display()))
}

fn build_table(config: &SwatConfig, invoices: &[Invoice]) -> Result<TableView> {
    let mut view = TableView::new("invoices_view")
        .with_config(&config.table_view)
        .with_model(TableStore::from_serialize(invoices)?);

    view.append_column(
        TableViewColumn::new("checkbox", "")
            .with_renderer(CheckboxCellRenderer::new(Binding::field("id"))),
    )?;
    view.append_column(
        TableViewColumn::new("client", "Client")
            .orderable()
            .with_renderer(
                LinkCellRenderer::new("invoice?id=%s", Binding::field("client"))
                    .link_value(Binding::field("id")),
            ),
    )?;
    view.append_column(
        TableViewColumn::new("amount", "Amount")
            .orderable()
            .with_class("swat-numeric")
            .with_renderer(TextCellRenderer::field("amount")),
    )?;
    view.append_column(
        TableViewColumn::new("note", "Note").with_renderer(
            TextCellRenderer::field("note").visible_when(Binding::field("note")),
        ),
    )?;
    view.append_group(TableViewGroup::new("by_client", "client"))?;
    view.append_row(Box::new(CheckAllRow::new("invoices_check_all")))?;
    view.set_default_orderby_column("client", OrderDirection::Ascending)?;
    Ok(view)
}

fn build_page(config: &SwatConfig, invoices: &[Invoice], method: Method) -> Result<Ui> {
    let mut form = Form::with_config("invoices", &config.form)
        .autofocus(true)
        .with_child(Entry::new("search", "Search"))
        .with_child(Button::new("search_button", "Search"))
        .with_child(build_table(config, invoices)?)
        .with_child(
            Actions::new("invoices_actions")
                .with_item(ActionItem::new("archive", "Archive"))
                .with_item(
                    ActionItem::new("assign", "Assign to…")
                        .with_widget(EmailEntry::new("assignee", "Assignee").required(true)),
                ),
        );
    form.set_method(method);
    form.add_hidden_field("page", "1");

    let mut ui = Ui::with_config(config.clone());
    ui.add(form);
    Ok(ui)
}

fn report_submission(ui: &Ui) -> Result<()> {
    let form = ui.widget_as::<Form>("invoices")?;
    let view = ui.widget_as::<TableView>("invoices_view")?;
    let actions = ui.widget_as::<Actions>("invoices_actions")?;
    tracing::info!(
        processed = form.is_processed(),
        clicked = ?form.clicked_button(),
        checked = ?view.checked_items(),
        action = ?actions.selected().map(|a| a.id()),
        messages = form.messages().len(),
        "processed submission"
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => SwatConfig::from_file(path)?,
        None => SwatConfig::default(),
    };
    let method = match &cli.method {
        Some(method) => method.parse::<Method>()?,
        None => config.form.method,
    };
    let invoices = load_invoices(cli.data.as_deref())?;
    let mut ui = build_page(&config, &invoices, method)?;
    ui.init()?;

    if let Some(body) = &cli.submit {
        let data = FormData::parse_urlencoded(body);
        let request = match method {
            Method::Post => Request::new().with_post(data),
            Method::Get => Request::new().with_get(data),
        };
        ui.process(&request)?;
        report_submission(&ui)?;
    }

    match cli.command.unwrap_or(Command::Page) {
        Command::Page => println!("{}", ui.render()),
        Command::Head => {
            let mut out = Response::new();
            ui.display_into(&mut out)?;
            println!("{}", out.head_entries().display(""));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn demo_page_renders() {
        let mut ui = build_page(&SwatConfig::default(), &sample_invoices(), Method::Post).unwrap();
        ui.init().unwrap();
        let html = ui.display().unwrap();
        assert!(html.contains(r#"<table id="invoices_view""#));
        assert!(html.contains(r#"<tr class="swat-table-view-group"><td colspan="4">Acme</td></tr>"#));
        assert!(html.contains("invoices_obj.setDefaultFocus('search');"));
    }

    #[test]
    fn submission_selects_rows_and_action() {
        let mut ui = build_page(&SwatConfig::default(), &sample_invoices(), Method::Post).unwrap();
        ui.init().unwrap();
        let request = Request::new().with_post(FormData::parse_urlencoded(
            "_swat_form_process=invoices&checkbox[]=2&checkbox[]=5&invoices_actions_action_flydown=archive",
        ));
        ui.process(&request).unwrap();

        let view = ui.widget_as::<TableView>("invoices_view").unwrap();
        assert_eq!(view.checked_items(), ["2", "5"]);
        let actions = ui.widget_as::<Actions>("invoices_actions").unwrap();
        assert_eq!(actions.selected().map(|a| a.id()), Some("archive"));
    }

    #[test]
    fn rows_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 9, "client": "Umbrella", "amount": 5}}]"#).unwrap();
        let invoices = load_invoices(Some(file.path())).unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].client, "Umbrella");
        assert!(invoices[0].note.is_none());
    }
}
