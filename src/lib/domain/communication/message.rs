//! Outgoing email message

use crate::domain::sending::value_objects::email_address::EmailAddress;

/// A rendered message ready to hand to the mail transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// The recipient of the email
    pub to: EmailAddress,

    /// The personalized subject
    pub subject: String,

    /// The personalized HTML body
    pub body: String,
}
