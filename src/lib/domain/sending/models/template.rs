//! Message template and placeholder rendering

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::sending::models::recipient::Recipient;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{\{(\w+)\}\}").unwrap();
}

/// A message template with `{{field}}` placeholders
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageTemplate {
    /// The subject line
    #[schema(example = "Hi {{name}}")]
    pub subject: String,

    /// The message body
    #[schema(example = "Hello {{name}}!")]
    pub body: String,
}

/// A template rendered for one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RenderedMessage {
    /// The personalized subject
    pub subject: String,

    /// The personalized body
    pub body: String,
}

impl MessageTemplate {
    /// Create a template from raw subject and body strings
    pub fn new(subject: &str, body: &str) -> Self {
        Self {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    /// Whether both subject and body are present
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Substitute every placeholder with the matching recipient field.
    ///
    /// `{{name}}` and `{{email}}` are replaced; placeholders with no
    /// matching field are left verbatim. Pure: no state, no side effects.
    pub fn render(&self, recipient: &Recipient) -> RenderedMessage {
        RenderedMessage {
            subject: substitute(&self.subject, recipient),
            body: substitute(&self.body, recipient),
        }
    }
}

fn substitute(text: &str, recipient: &Recipient) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures<'_>| match &caps[1] {
            "name" => recipient.name.clone(),
            "email" => recipient.email.as_str().to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
