//! Toolkit configuration.
//!
//! Configuration is loaded from YAML. Every section and field is optional;
//! missing values fall back to the defaults below.
//!
//! ```yaml
//! errors:
//!   display: true
//!   log: true
//! table_view:
//!   no_records_message: "No invoices yet."
//!   no_records_content_type: plain
//!   invalid_tfoot_ordering: false
//! form:
//!   method: post
//!   action: "/invoices"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use swat_html::ContentType;

use crate::error::{Result, SwatError};
use crate::request::Method;
use crate::table_view::DEFAULT_NO_RECORDS_MESSAGE;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatConfig {
    pub errors: ErrorsConfig,
    pub table_view: TableViewConfig,
    pub form: FormConfig,
}

/// How failures reported through the UI are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorsConfig {
    /// Write an error block into the response.
    pub display: bool,
    /// Send the error to the logger.
    pub log: bool,
}

impl Default for ErrorsConfig {
    fn default() -> Self {
        ErrorsConfig {
            display: true,
            log: true,
        }
    }
}

/// Defaults for table views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableViewConfig {
    /// Placeholder for empty models; `null` renders an empty table instead.
    pub no_records_message: Option<String>,
    pub no_records_content_type: ContentType,
    /// Place the `tfoot` after the `tbody`.
    pub invalid_tfoot_ordering: bool,
}

impl Default for TableViewConfig {
    fn default() -> Self {
        TableViewConfig {
            no_records_message: Some(DEFAULT_NO_RECORDS_MESSAGE.to_string()),
            no_records_content_type: ContentType::Plain,
            invalid_tfoot_ordering: false,
        }
    }
}

/// Defaults for forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub method: Method,
    pub action: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            method: Method::Post,
            action: "#".to_string(),
        }
    }
}

impl SwatConfig {
    /// Parses configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(SwatConfig::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SwatError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded swat configuration");
        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(SwatConfig::from_yaml("").unwrap(), SwatConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = SwatConfig::from_yaml("table_view:\n  invalid_tfoot_ordering: true\n").unwrap();
        assert!(config.table_view.invalid_tfoot_ordering);
        assert_eq!(
            config.table_view.no_records_message.as_deref(),
            Some("<none>")
        );
        assert!(config.errors.display);
        assert_eq!(config.form.action, "#");
    }

    #[test]
    fn null_message_disables_placeholder() {
        let config = SwatConfig::from_yaml("table_view:\n  no_records_message: null\n").unwrap();
        assert_eq!(config.table_view.no_records_message, None);
    }

    #[test]
    fn method_and_content_type_parse() {
        let config = SwatConfig::from_yaml(
            "form:\n  method: get\ntable_view:\n  no_records_content_type: html\n",
        )
        .unwrap();
        assert_eq!(config.form.method, Method::Get);
        assert_eq!(config.table_view.no_records_content_type, ContentType::Html);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = SwatConfig::from_yaml("form: [").unwrap_err();
        assert!(matches!(err, SwatError::Config(_)));
    }
}
