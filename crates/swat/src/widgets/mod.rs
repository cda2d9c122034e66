//! Stock widgets.

mod actions;
mod button;
mod email_entry;
mod entry;
mod fieldset;
mod flydown;
mod form;
mod replicator;

pub use actions::{ActionItem, Actions};
pub use button::Button;
pub use email_entry::{is_well_formed_address, AddressCheck, EmailEntry};
pub use entry::Entry;
pub use fieldset::{DisplayableContainer, Fieldset};
pub use flydown::{Flydown, FlydownOption};
pub use form::{Form, HIDDEN_FIELD, PROCESS_FIELD};
pub use replicator::Replicator;

use swat_html::{HtmlTag, Response};

use crate::message::Message;

/// Writes a message list, or nothing when there are no messages.
pub(crate) fn display_messages(messages: &[Message], out: &mut Response) {
    if messages.is_empty() {
        return;
    }
    out.push_str(r#"<ul class="swat-messages">"#);
    for message in messages {
        HtmlTag::new("li")
            .attr("class", message.css_class())
            .content(message.primary_content(), message.content_type())
            .display(out);
    }
    out.push_str("</ul>");
}
