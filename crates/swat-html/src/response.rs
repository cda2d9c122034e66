//! The response-scoped output context.
//!
//! A [`Response`] is created per request and threaded through every
//! `display` call. Besides the markup buffer it carries the state that must
//! not outlive the response: which one-shot fragments (such as inline style
//! blocks) have already been written, and the head entries collected from
//! displayed widgets.

use std::collections::HashSet;
use std::fmt;

use crate::content::ContentType;
use crate::head::HtmlHeadEntrySet;

/// Markup buffer plus per-response emission state.
#[derive(Debug, Default)]
pub struct Response {
    body: String,
    emitted: HashSet<String>,
    head_entries: HtmlHeadEntrySet,
}

impl Response {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw markup.
    pub fn push_str(&mut self, markup: &str) {
        self.body.push_str(markup);
    }

    /// Appends text, escaping it unless `content_type` is [`ContentType::Html`].
    pub fn push_text(&mut self, text: &str, content_type: ContentType) {
        let rendered = content_type.render(text);
        self.body.push_str(&rendered);
    }

    /// Appends an inline script block wrapped in a CDATA section.
    pub fn push_script(&mut self, script: &str) {
        self.body.push_str("<script type=\"text/javascript\">\n//<![CDATA[\n");
        self.body.push_str(script);
        self.body.push_str("\n//]]>\n</script>");
    }

    /// The markup written so far.
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning its markup.
    pub fn into_string(self) -> String {
        self.body
    }

    /// Whether any markup has been written.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Marks `key` as emitted. Returns `true` only the first time per response.
    pub fn emit_once(&mut self, key: &str) -> bool {
        self.emitted.insert(key.to_string())
    }

    /// Whether `key` has already been emitted in this response.
    pub fn has_emitted(&self, key: &str) -> bool {
        self.emitted.contains(key)
    }

    /// Head entries collected while displaying.
    pub fn head_entries(&self) -> &HtmlHeadEntrySet {
        &self.head_entries
    }

    /// Mutable access to the collected head entries.
    pub fn head_entries_mut(&mut self) -> &mut HtmlHeadEntrySet {
        &mut self.head_entries
    }

    /// Runs `f` against this response and returns what it wrote instead of
    /// keeping it in the buffer.
    ///
    /// Emission state and head entries are shared with the capture, so a
    /// one-shot fragment written inside it still counts as emitted.
    ///
    /// ```rust
    /// use swat_html::Response;
    ///
    /// let mut out = Response::new();
    /// out.push_str("<table>");
    /// let footer = out
    ///     .capture(|o| -> Result<(), std::convert::Infallible> {
    ///         o.push_str("<tr></tr>");
    ///         Ok(())
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(footer, "<tr></tr>");
    /// assert_eq!(out.as_str(), "<table>");
    /// ```
    pub fn capture<E, F>(&mut self, f: F) -> Result<String, E>
    where
        F: FnOnce(&mut Response) -> Result<(), E>,
    {
        let saved = std::mem::take(&mut self.body);
        let result = f(self);
        let captured = std::mem::replace(&mut self.body, saved);
        result.map(|()| captured)
    }
}

impl fmt::Write for Response {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.body.push_str(s);
        Ok(())
    }
}
