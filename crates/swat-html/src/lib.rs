//! # swat-html - Markup primitives for the Swat widget toolkit
//!
//! This crate holds the small, dependency-light pieces every widget needs to
//! write markup:
//!
//! - [`HtmlTag`]: an element with ordered attributes and optional content
//! - [`Response`]: the per-response output buffer, including one-shot
//!   emission tracking and collected [`HtmlHeadEntrySet`] entries
//! - [`ContentType`]: whether text is written escaped or verbatim
//! - [`escape_html`] and [`escape_js_string`]
//!
//! The widget tree itself lives in the `swat` crate.

pub mod content;
pub mod head;
pub mod response;
pub mod tag;
pub mod util;

pub use content::ContentType;
pub use head::{HeadEntryKind, HtmlHeadEntry, HtmlHeadEntrySet};
pub use response::Response;
pub use tag::HtmlTag;
pub use util::{escape_html, escape_js_string};
