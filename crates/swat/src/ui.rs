//! The root of a widget tree and its request lifecycle.

use swat_html::{HtmlHeadEntrySet, Response};

use crate::config::SwatConfig;
use crate::container::{Container, UiObject, UiParent};
use crate::error::{Result, SwatError};
use crate::exception::ErrorReporter;
use crate::request::{ProcessContext, Request};
use crate::widget::Widget;

/// A widget tree for one request.
///
/// `init` runs exactly once, `process` at most once, and `display` any
/// number of times. Failures can be written into the page through the
/// configured [`ErrorReporter`].
#[derive(Debug)]
pub struct Ui {
    root: Container,
    config: SwatConfig,
    reporter: ErrorReporter,
    initialized: bool,
    processed: bool,
}

impl Default for Ui {
    fn default() -> Self {
        Self::with_config(SwatConfig::default())
    }
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SwatConfig) -> Self {
        Ui {
            root: Container::new(),
            reporter: ErrorReporter::from_config(&config.errors),
            config,
            initialized: false,
            processed: false,
        }
    }

    pub fn with_reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &SwatConfig {
        &self.config
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    pub fn add<W: Widget + 'static>(&mut self, widget: W) {
        self.root.add(widget);
    }

    /// Initializes the tree. Later calls do nothing.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.root.init()?;
        self.initialized = true;
        tracing::debug!(widgets = self.root.len(), "ui initialized");
        Ok(())
    }

    /// Processes `request` through the tree, initializing it first if needed.
    ///
    /// A second call is ignored.
    pub fn process(&mut self, request: &Request) -> Result<()> {
        self.init()?;
        if self.processed {
            tracing::warn!("ui already processed, ignoring request");
            return Ok(());
        }
        self.processed = true;
        let mut ctx = ProcessContext::new(request);
        self.root.process(&mut ctx)
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Renders the tree.
    pub fn display(&self) -> Result<String> {
        let mut out = Response::new();
        self.display_into(&mut out)?;
        Ok(out.into_string())
    }

    /// Renders the tree into `out` and records its head entries there.
    pub fn display_into(&self, out: &mut Response) -> Result<()> {
        if !self.initialized {
            return Err(SwatError::Constraint(
                "ui must be initialized before display".to_string(),
            ));
        }
        self.root.display(out)?;
        out.head_entries_mut().add_set(&self.root.head_entries());
        Ok(())
    }

    /// Renders the tree, reporting a failure into the page instead of
    /// returning it.
    pub fn render(&self) -> String {
        let mut out = Response::new();
        if let Err(err) = self.display_into(&mut out) {
            self.report(&err, &mut out);
        }
        out.into_string()
    }

    /// Hands `error` to the reporter. A failing displayer is logged.
    pub fn report(&self, error: &SwatError, out: &mut Response) {
        if let Err(display_err) = self.reporter.report(error, out) {
            tracing::error!(%display_err, original = %error, "failed to display error");
        }
    }

    /// Any widget in the tree with the given id.
    pub fn widget(&self, id: &str) -> Result<&dyn Widget> {
        self.root.descendant(id)
    }

    pub fn widget_mut(&mut self, id: &str) -> Result<&mut dyn Widget> {
        self.root.descendant_mut(id)
    }

    /// The widget with the given id, as a `T`.
    pub fn widget_as<T: Widget + 'static>(&self, id: &str) -> Result<&T> {
        let widget = self.widget(id)?;
        let found = widget.kind();
        widget.downcast_ref::<T>().ok_or(SwatError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found,
        })
    }

    pub fn widget_as_mut<T: Widget + 'static>(&mut self, id: &str) -> Result<&mut T> {
        let widget = self.widget_mut(id)?;
        let found = widget.kind();
        widget.downcast_mut::<T>().ok_or(SwatError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found,
        })
    }

    /// Stylesheets and scripts needed by the whole tree.
    pub fn head_entries(&self) -> HtmlHeadEntrySet {
        self.root.head_entries()
    }
}

impl UiParent for Ui {
    fn add_child(&mut self, child: UiObject) -> Result<()> {
        self.root.add_child(child)
    }
}
