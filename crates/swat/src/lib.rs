//! Swat - a server-side HTML widget toolkit.
//!
//! A page is a tree of widgets that goes through three steps per request:
//!
//! - `init`: exactly once, builds indexes and replicates templates
//! - `process`: at most once, reads submitted data into the widgets
//! - `display`: any number of times, writes markup into a [`Response`]
//!
//! User mistakes found while processing are never errors. They become
//! [`Message`]s on the widget that found them and bubble up through
//! [`Widget::messages`].
//!
//! The main pieces:
//!
//! - [`widgets::Form`]: only processes its children when it was the one
//!   submitted, and round-trips hidden fields
//! - [`widgets::Replicator`]: repeats a template subtree once per key
//! - [`table_view::TableView`]: columns, spanning columns, groups and extra
//!   rows drawn against a row model
//! - [`Ui`]: the root that enforces the lifecycle
//!
//! # Quick Start
//!
//! ```rust
//! use swat::widgets::{Button, Entry, Form, PROCESS_FIELD};
//! use swat::{FormData, Request, Ui, Widget};
//!
//! let mut ui = Ui::new();
//! ui.add(
//!     Form::new("signup")
//!         .with_child(Entry::new("email", "Email").required(true))
//!         .with_child(Button::new("submit", "Sign Up")),
//! );
//!
//! let request = Request::new().with_post(
//!     FormData::new()
//!         .with(PROCESS_FIELD, "signup")
//!         .with("email", ""),
//! );
//! ui.process(&request).unwrap();
//!
//! let form = ui.widget_as::<Form>("signup").unwrap();
//! assert_eq!(form.clicked_button(), None);
//! assert!(ui.root().has_message());
//!
//! let html = ui.display().unwrap();
//! assert!(html.contains(r#"class="swat-message-error""#));
//! ```

mod config;
mod container;
mod error;
mod exception;
mod message;
mod request;
pub mod table_view;
mod ui;
mod widget;
pub mod widgets;

pub use config::{ErrorsConfig, FormConfig, SwatConfig, TableViewConfig};
pub use container::{Container, UiObject, UiParent};
pub use error::{Result, SwatError};
pub use exception::{
    ErrorDisplayer, ErrorLogger, ErrorReporter, TracingErrorLogger, XhtmlErrorDisplayer,
    ERROR_STYLE_KEY,
};
pub use message::{Message, MessageLevel};
pub use request::{FieldValue, FormData, FormFrame, FormScope, Method, ProcessContext, Request};
pub use ui::Ui;
pub use widget::{descendants, find_descendant, find_descendant_mut, Widget, WidgetClone, WidgetState};

pub use swat_html::{ContentType, HtmlHeadEntry, HtmlHeadEntrySet, HtmlTag, Response};
