//! Outbound SMTP credential

use std::fmt;

use crate::domain::sending::value_objects::email_address::EmailAddress;

/// The operator's outbound mail credential.
///
/// Only a verified credential may be attached to a send job; verification
/// happens against the live SMTP relay at capture time.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredential {
    /// The sender identity (also the `From` address)
    pub email: EmailAddress,

    /// The app password presented to the relay
    pub app_password: String,

    verified: bool,
}

impl SmtpCredential {
    /// Create an unverified credential
    pub fn new(email: EmailAddress, app_password: &str) -> Self {
        Self {
            email,
            app_password: app_password.to_string(),
            verified: false,
        }
    }

    /// Mark the credential as accepted by the relay
    pub fn into_verified(self) -> Self {
        Self {
            verified: true,
            ..self
        }
    }

    /// Whether the relay has accepted this credential
    pub fn is_verified(&self) -> bool {
        self.verified
    }
}

impl fmt::Debug for SmtpCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredential")
            .field("email", &self.email)
            .field("app_password", &"[redacted]")
            .field("verified", &self.verified)
            .finish()
    }
}
