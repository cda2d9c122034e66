//! User-facing notices attached to widgets.
//!
//! A [`Message`] is how a widget reports a problem the end user can fix, such
//! as a missing required value. Messages never abort processing; the caller
//! inspects [`Widget::has_message`](crate::Widget::has_message) to decide
//! whether to act on a submission.

use serde::{Deserialize, Serialize};
use swat_html::ContentType;

/// Severity level for messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Informational notice
    #[default]
    Info,
    /// Something needs attention but the value was accepted
    Warning,
    /// The value was rejected
    Error,
}

impl MessageLevel {
    /// Returns the CSS class used when this level is displayed.
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageLevel::Info => "swat-message-info",
            MessageLevel::Warning => "swat-message-warning",
            MessageLevel::Error => "swat-message-error",
        }
    }
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageLevel::Info => write!(f, "info"),
            MessageLevel::Warning => write!(f, "warning"),
            MessageLevel::Error => write!(f, "error"),
        }
    }
}

/// A message with severity level. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    primary_content: String,
    #[serde(default)]
    content_type: ContentType,
    #[serde(default)]
    level: MessageLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_content: Option<String>,
}

impl Message {
    /// Create a new plain-text message.
    pub fn new(level: MessageLevel, primary_content: impl Into<String>) -> Self {
        Self {
            primary_content: primary_content.into(),
            content_type: ContentType::Plain,
            level,
            secondary_content: None,
        }
    }

    /// Create an info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    /// Create a warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    /// Create an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }

    /// Returns a copy with the given content type.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Returns a copy with secondary content.
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_content = Some(secondary.into());
        self
    }

    pub fn primary_content(&self) -> &str {
        &self.primary_content
    }

    pub fn secondary_content(&self) -> Option<&str> {
        self.secondary_content.as_deref()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn level(&self) -> MessageLevel {
        self.level
    }

    /// CSS classes for displaying this message.
    pub fn css_class(&self) -> &'static str {
        self.level.css_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_level() {
        assert_eq!(Message::info("a").level(), MessageLevel::Info);
        assert_eq!(Message::warning("a").level(), MessageLevel::Warning);
        assert_eq!(Message::error("a").level(), MessageLevel::Error);
    }

    #[test]
    fn css_class_follows_level() {
        assert_eq!(Message::error("x").css_class(), "swat-message-error");
    }

    #[test]
    fn serializes_without_empty_secondary() {
        let json = serde_json::to_value(Message::warning("low stock")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "primary_content": "low stock",
                "content_type": "plain",
                "level": "warning"
            })
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let msg: Message =
            serde_json::from_str(r#"{"primary_content": "<b>saved</b>", "content_type": "html"}"#)
                .unwrap();
        assert_eq!(msg.level(), MessageLevel::Info);
        assert_eq!(msg.content_type(), ContentType::Html);
        assert_eq!(msg.secondary_content(), None);
    }
}
