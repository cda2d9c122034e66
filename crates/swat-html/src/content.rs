//! Content types for text placed inside tags.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::util::escape_html;

/// How a piece of content should be written into markup.
///
/// `Plain` content is escaped; `Html` content is trusted markup and written
/// verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain text (`text/plain`), escaped on output.
    #[default]
    Plain,
    /// A markup fragment (`text/xml`), written as-is.
    Html,
}

impl ContentType {
    /// Returns the MIME-style name for this content type.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Plain => "text/plain",
            ContentType::Html => "text/xml",
        }
    }

    /// Prepares `content` for output according to this content type.
    pub fn render<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match self {
            ContentType::Plain => Cow::Owned(escape_html(content)),
            ContentType::Html => Cow::Borrowed(content),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_content_is_escaped() {
        assert_eq!(ContentType::Plain.render("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn html_content_is_verbatim() {
        assert_eq!(ContentType::Html.render("<b>x</b>"), "<b>x</b>");
    }
}
