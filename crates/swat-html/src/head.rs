//! Head entries (stylesheets and scripts) requested by displayed widgets.

use std::collections::HashMap;

/// What kind of resource a head entry links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeadEntryKind {
    StyleSheet,
    JavaScript,
}

/// A resource that belongs in the document head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlHeadEntry {
    uri: String,
    kind: HeadEntryKind,
    display_order: i32,
}

impl HtmlHeadEntry {
    pub fn javascript(uri: impl Into<String>) -> Self {
        HtmlHeadEntry {
            uri: uri.into(),
            kind: HeadEntryKind::JavaScript,
            display_order: 0,
        }
    }

    pub fn stylesheet(uri: impl Into<String>) -> Self {
        HtmlHeadEntry {
            uri: uri.into(),
            kind: HeadEntryKind::StyleSheet,
            display_order: 0,
        }
    }

    /// Lower orders are written first.
    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn kind(&self) -> HeadEntryKind {
        self.kind
    }

    pub fn display_order(&self) -> i32 {
        self.display_order
    }

    /// Returns the markup for this entry with `prefix` prepended to the uri.
    pub fn to_html(&self, prefix: &str) -> String {
        let href = crate::util::escape_html(&format!("{}{}", prefix, self.uri));
        match self.kind {
            HeadEntryKind::StyleSheet => format!(
                r#"<link rel="stylesheet" type="text/css" href="{}" />"#,
                href
            ),
            HeadEntryKind::JavaScript => format!(
                r#"<script type="text/javascript" src="{}"></script>"#,
                href
            ),
        }
    }
}

/// An ordered set of head entries, unique by uri.
#[derive(Clone, Debug, Default)]
pub struct HtmlHeadEntrySet {
    entries: Vec<HtmlHeadEntry>,
    index: HashMap<String, usize>,
}

impl HtmlHeadEntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. An entry with the same uri is replaced where it stands.
    pub fn add_entry(&mut self, entry: HtmlHeadEntry) {
        match self.index.get(entry.uri()) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.uri.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Adds every entry of `other`.
    pub fn add_set(&mut self, other: &HtmlHeadEntrySet) {
        for entry in other.iter() {
            self.add_entry(entry.clone());
        }
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.index.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HtmlHeadEntry> {
        self.entries.iter()
    }

    /// Entries sorted by display order, ties keeping insertion order.
    pub fn sorted(&self) -> Vec<&HtmlHeadEntry> {
        let mut sorted: Vec<&HtmlHeadEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.display_order);
        sorted
    }

    /// Returns the markup for all entries, one per line.
    pub fn display(&self, prefix: &str) -> String {
        self.sorted()
            .into_iter()
            .map(|e| e.to_html(prefix))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
