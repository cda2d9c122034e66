use once_cell::sync::Lazy;
use regex::Regex;
use swat_html::Response;

use super::entry::Entry;
use crate::error::Result;
use crate::message::Message;
use crate::request::ProcessContext;
use crate::widget::{Widget, WidgetState};

/// Decides whether a trimmed, non-empty value is a usable address.
pub type AddressCheck = fn(&str) -> bool;

const ADDRESS_PATTERN: &str = concat!(
    r"(?i)^[-!#$%&'*+./0-9=?A-Z^_`{|}~]+",
    r"@[-!#$%&'*+/0-9=?A-Z^_`{|}~]+",
    r"(\.[-!#$%&'*+/0-9=?A-Z^_`{|}~]+)+$"
);

static ADDRESS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(ADDRESS_PATTERN).ok());

/// The stock [`AddressCheck`]: `local@domain.tld` with the characters mail
/// systems accept in each part.
pub fn is_well_formed_address(address: &str) -> bool {
    ADDRESS
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(address))
}

/// A text entry that expects an email address.
///
/// The value is trimmed and an empty submission clears it, exactly as in
/// [`Entry`]. A malformed address is kept as typed and an error message is
/// attached, so the form can redisplay it for correction.
#[derive(Debug, Clone)]
pub struct EmailEntry {
    entry: Entry,
    check: AddressCheck,
}

impl EmailEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut entry = Entry::new(id, title);
        entry.add_class("swat-email-entry");
        EmailEntry {
            entry,
            check: is_well_formed_address,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.entry = self.entry.required(required);
        self
    }

    /// Replaces the address check.
    pub fn with_check(mut self, check: AddressCheck) -> Self {
        self.check = check;
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.entry.value()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.entry.set_value(value);
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl Widget for EmailEntry {
    fn state(&self) -> &WidgetState {
        self.entry.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.entry.state_mut()
    }

    fn kind(&self) -> &'static str {
        "email entry"
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        self.entry.process(ctx)?;
        let malformed = self.entry.value().is_some_and(|value| !(self.check)(value));
        if malformed {
            self.entry.add_message(Message::error(
                "The email address you have entered is not properly formatted.",
            ));
        }
        Ok(())
    }

    fn display(&self, out: &mut Response) -> Result<()> {
        self.entry.display(out)
    }

    fn is_focusable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FormData, Request};

    fn process(entry: &mut EmailEntry, value: &str) {
        let request = Request::new().with_post(FormData::new().with("email", value));
        let mut ctx = ProcessContext::new(&request);
        entry.process(&mut ctx).unwrap();
    }

    #[test]
    fn stock_check_accepts_common_addresses() {
        assert!(is_well_formed_address("ada@example.com"));
        assert!(is_well_formed_address("first.last+tag@mail.example.co.uk"));
        assert!(!is_well_formed_address("ada@localhost"));
        assert!(!is_well_formed_address("ada example.com"));
        assert!(!is_well_formed_address("@example.com"));
    }

    #[test]
    fn valid_address_is_trimmed_without_message() {
        let mut entry = EmailEntry::new("email", "Email");
        process(&mut entry, "  ada@example.com ");
        assert_eq!(entry.value(), Some("ada@example.com"));
        assert!(!entry.has_message());
    }

    #[test]
    fn malformed_address_adds_message_and_keeps_value() {
        let mut entry = EmailEntry::new("email", "Email");
        process(&mut entry, "ada-at-example");
        assert_eq!(entry.value(), Some("ada-at-example"));
        let messages = entry.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].primary_content(),
            "The email address you have entered is not properly formatted."
        );

        let mut out = Response::new();
        entry.display(&mut out).unwrap();
        assert!(out.as_str().contains(r#"class="swat-entry swat-email-entry""#));
        assert!(out.as_str().contains("swat-message-error"));
    }

    #[test]
    fn empty_value_is_not_checked() {
        let mut entry = EmailEntry::new("email", "Email").with_check(|_| false);
        process(&mut entry, "   ");
        assert_eq!(entry.value(), None);
        assert!(!entry.has_message());
    }

    #[test]
    fn check_is_injectable() {
        let mut entry =
            EmailEntry::new("email", "Email").with_check(|address| address.ends_with("@corp.test"));
        process(&mut entry, "ada@example.com");
        assert!(entry.has_message());

        let mut entry =
            EmailEntry::new("email", "Email").with_check(|address| address.ends_with("@corp.test"));
        process(&mut entry, "ada@corp.test");
        assert!(!entry.has_message());
    }

    #[test]
    fn required_still_applies() {
        let mut entry = EmailEntry::new("email", "Email").required(true);
        process(&mut entry, "");
        assert_eq!(
            entry.messages()[0].primary_content(),
            "The Email field is required."
        );
    }
}
