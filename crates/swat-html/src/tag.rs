//! The [`HtmlTag`] builder used by every widget to emit markup.
//!
//! Widgets decide which tags, attributes and nesting to produce; `HtmlTag`
//! owns serialization and escaping. A tag can be written in one piece with
//! [`display`](HtmlTag::display), or opened and closed around nested output
//! with [`open`](HtmlTag::open) and [`close`](HtmlTag::close).
//!
//! ```rust
//! use swat_html::{ContentType, HtmlTag, Response};
//!
//! let mut out = Response::new();
//! let mut td = HtmlTag::new("td");
//! td.set_attr("colspan", "2");
//! td.set_content("Tom & Jerry", ContentType::Plain);
//! td.display(&mut out);
//!
//! assert_eq!(out.as_str(), r#"<td colspan="2">Tom &amp; Jerry</td>"#);
//! ```

use std::fmt;

use crate::content::ContentType;
use crate::response::Response;
use crate::util::escape_html;

/// Elements that never carry content and are written self-closed.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "hr", "img", "input", "link", "meta", "param",
];

/// A single markup element with ordered attributes and optional content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlTag {
    name: String,
    attributes: Vec<(String, String)>,
    content: Option<(String, ContentType)>,
}

impl HtmlTag {
    /// Creates a tag with the given element name.
    pub fn new(name: impl Into<String>) -> Self {
        HtmlTag {
            name: name.into(),
            attributes: Vec::new(),
            content: None,
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`set_content`](Self::set_content).
    pub fn content(mut self, content: impl Into<String>, content_type: ContentType) -> Self {
        self.set_content(content, content_type);
        self
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Sets an attribute when `value` is `Some`, removes it otherwise.
    pub fn set_opt_attr<V: Into<String>>(&mut self, name: &str, value: Option<V>) {
        match value {
            Some(value) => self.set_attr(name, value),
            None => self.remove_attr(name),
        }
    }

    /// Removes an attribute if present.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    /// Returns the value of an attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Appends attributes, later values replacing earlier ones.
    pub fn add_attributes<I, K, V>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attributes {
            self.set_attr(name, value);
        }
    }

    /// Appends a class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        let joined = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    /// Replaces the `class` attribute. An empty list removes it.
    pub fn set_classes<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classes
            .into_iter()
            .filter(|c| !c.as_ref().is_empty())
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", joined);
        }
    }

    /// Sets the content written between the open and close tags.
    pub fn set_content(&mut self, content: impl Into<String>, content_type: ContentType) {
        self.content = Some((content.into(), content_type));
    }

    /// Whether this element is written self-closed.
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    fn write_open(&self, buf: &mut String, self_close: bool) {
        buf.push('<');
        buf.push_str(&self.name);
        for (name, value) in &self.attributes {
            buf.push(' ');
            buf.push_str(name);
            buf.push_str("=\"");
            buf.push_str(&escape_html(value));
            buf.push('"');
        }
        if self_close {
            buf.push_str(" />");
        } else {
            buf.push('>');
        }
    }

    /// Returns the opening tag markup.
    pub fn open_tag(&self) -> String {
        let mut buf = String::new();
        self.write_open(&mut buf, false);
        buf
    }

    /// Returns the closing tag markup.
    pub fn close_tag(&self) -> String {
        format!("</{}>", self.name)
    }

    /// Writes the opening tag.
    pub fn open(&self, out: &mut Response) {
        out.push_str(&self.open_tag());
    }

    /// Writes the closing tag.
    pub fn close(&self, out: &mut Response) {
        out.push_str(&self.close_tag());
    }

    /// Writes the complete element, including its content.
    pub fn display(&self, out: &mut Response) {
        out.push_str(&self.to_html());
    }

    /// Returns the complete element as a string.
    pub fn to_html(&self) -> String {
        let mut buf = String::new();
        if self.is_void() {
            self.write_open(&mut buf, true);
            return buf;
        }
        self.write_open(&mut buf, false);
        if let Some((content, content_type)) = &self.content {
            buf.push_str(&content_type.render(content));
        }
        buf.push_str(&self.close_tag());
        buf
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_elements_self_close() {
        let tag = HtmlTag::new("input")
            .attr("type", "hidden")
            .attr("name", "x")
            .attr("value", "1");
        assert_eq!(
            tag.to_html(),
            r#"<input type="hidden" name="x" value="1" />"#
        );
    }

    #[test]
    fn attributes_keep_insertion_order_and_replace_in_place() {
        let mut tag = HtmlTag::new("tr").attr("id", "a").attr("class", "odd");
        tag.set_attr("id", "b");
        assert_eq!(tag.open_tag(), r#"<tr id="b" class="odd">"#);
    }

    #[test]
    fn attribute_values_are_escaped() {
        let tag = HtmlTag::new("a").attr("href", "?a=1&b=\"2\"");
        assert_eq!(tag.open_tag(), r#"<a href="?a=1&amp;b=&quot;2&quot;">"#);
    }

    #[test]
    fn add_class_appends() {
        let mut tag = HtmlTag::new("tr");
        tag.add_class("odd");
        tag.add_class("swat-error");
        assert_eq!(tag.get_attr("class"), Some("odd swat-error"));
    }

    #[test]
    fn empty_class_list_removes_attribute() {
        let mut tag = HtmlTag::new("tr").attr("class", "odd");
        tag.set_classes(Vec::<String>::new());
        assert_eq!(tag.get_attr("class"), None);
        assert_eq!(tag.to_html(), "<tr></tr>");
    }

    #[test]
    fn optional_attribute_none_removes() {
        let mut tag = HtmlTag::new("form").attr("enctype", "multipart/form-data");
        tag.set_opt_attr::<String>("enctype", None);
        assert_eq!(tag.open_tag(), "<form>");
    }

    #[test]
    fn html_content_is_not_escaped() {
        let tag = HtmlTag::new("tfoot").content("<tr></tr>", ContentType::Html);
        assert_eq!(tag.to_html(), "<tfoot><tr></tr></tfoot>");
    }
}
