//! Reporting of failures that reach the UI root.
//!
//! An [`ErrorReporter`] holds two injectable handlers: an [`ErrorDisplayer`]
//! that writes an error block into the response and an [`ErrorLogger`] that
//! records it. The stock displayer writes its stylesheet at most once per
//! [`Response`].

use std::fmt;

use minijinja::{context, Environment};
use swat_html::Response;

use crate::config::ErrorsConfig;
use crate::error::{Result, SwatError};

/// Key under which the error stylesheet is marked as emitted.
pub const ERROR_STYLE_KEY: &str = "swat-exception-style";

const ERROR_STYLE: &str = "<style type=\"text/css\" media=\"all\">\
.swat-exception { border: 1px solid #d43; margin: 1em; font-family: sans-serif; }\
.swat-exception h3 { background: #e50; color: #fff; margin: 0; padding: 0.3em 0.5em; }\
.swat-exception-message { padding: 0.5em; }\
</style>";

const ERROR_TEMPLATE: &str = r#"<div class="swat-exception"><h3>{{ kind|e }}</h3><div class="swat-exception-message">{{ message|e }}</div></div>"#;

/// Writes a failure into the response.
pub trait ErrorDisplayer: fmt::Debug {
    fn display(&self, error: &SwatError, out: &mut Response) -> Result<()>;
}

/// Records a failure.
pub trait ErrorLogger: fmt::Debug {
    fn log(&self, error: &SwatError);
}

/// Renders an XHTML error block through a template.
#[derive(Debug, Clone, Default)]
pub struct XhtmlErrorDisplayer;

impl ErrorDisplayer for XhtmlErrorDisplayer {
    fn display(&self, error: &SwatError, out: &mut Response) -> Result<()> {
        if out.emit_once(ERROR_STYLE_KEY) {
            out.push_str(ERROR_STYLE);
        }
        let env = Environment::new();
        let html = env.render_str(
            ERROR_TEMPLATE,
            context! {
                kind => error.kind_name(),
                message => error.to_string(),
            },
        )?;
        out.push_str(&html);
        Ok(())
    }
}

/// Logs through `tracing` at error level.
#[derive(Debug, Clone, Default)]
pub struct TracingErrorLogger;

impl ErrorLogger for TracingErrorLogger {
    fn log(&self, error: &SwatError) {
        tracing::error!(kind = error.kind_name(), %error, "swat error");
    }
}

/// Dispatches failures to the configured handlers.
#[derive(Debug)]
pub struct ErrorReporter {
    displayer: Box<dyn ErrorDisplayer>,
    logger: Box<dyn ErrorLogger>,
    display: bool,
    log: bool,
}

impl Default for ErrorReporter {
    fn default() -> Self {
        ErrorReporter {
            displayer: Box::new(XhtmlErrorDisplayer),
            logger: Box::new(TracingErrorLogger),
            display: true,
            log: true,
        }
    }
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ErrorsConfig) -> Self {
        ErrorReporter {
            display: config.display,
            log: config.log,
            ..Default::default()
        }
    }

    pub fn with_displayer<D: ErrorDisplayer + 'static>(mut self, displayer: D) -> Self {
        self.displayer = Box::new(displayer);
        self
    }

    pub fn with_logger<L: ErrorLogger + 'static>(mut self, logger: L) -> Self {
        self.logger = Box::new(logger);
        self
    }

    /// Logs and displays `error` as configured.
    pub fn report(&self, error: &SwatError, out: &mut Response) -> Result<()> {
        if self.log {
            self.logger.log(error);
        }
        if self.display {
            self.displayer.display(error, out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    struct RecordingLogger {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log(&self, error: &SwatError) {
            self.seen.borrow_mut().push(error.kind_name().to_string());
        }
    }

    fn lookup_error() -> SwatError {
        SwatError::NotFound {
            kind: "column",
            id: "<b>".to_string(),
        }
    }

    #[test]
    fn style_is_emitted_once_per_response() {
        let reporter = ErrorReporter::new().with_logger(RecordingLogger::default());
        let mut out = Response::new();
        reporter.report(&lookup_error(), &mut out).unwrap();
        reporter.report(&lookup_error(), &mut out).unwrap();
        assert_eq!(out.as_str().matches("<style").count(), 1);
        assert_eq!(out.as_str().matches("swat-exception-message").count(), 3);
    }

    #[test]
    fn message_is_escaped() {
        let mut out = Response::new();
        XhtmlErrorDisplayer.display(&lookup_error(), &mut out).unwrap();
        assert!(out.as_str().contains("column with id &#x27;&lt;b&gt;&#x27; not found"));
        assert!(out.as_str().contains("<h3>not-found</h3>"));
    }

    #[test]
    fn flags_select_handlers() {
        let logger = RecordingLogger::default();
        let seen = logger.seen.clone();
        let reporter = ErrorReporter::from_config(&ErrorsConfig {
            display: false,
            log: true,
        })
        .with_logger(logger);

        let mut out = Response::new();
        reporter.report(&lookup_error(), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(*seen.borrow(), vec!["not-found".to_string()]);
    }
}
