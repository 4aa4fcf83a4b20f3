//! Mail transport capability

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::{
        errors::{DeliveryError, TransportError},
        message::OutgoingEmail,
    },
    sending::models::credential::SmtpCredential,
};

/// The abstract capability that hands rendered messages to the outside
/// mail-delivery system.
///
/// The trait is intentionally minimal: it accepts a credential and a
/// message value, and reports delivery failures without deciding whether a
/// message *should* be sent. Implementations must be shareable across the
/// background dispatch task and request handlers via `Arc`.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Establish the sending capability for a credential.
    ///
    /// Called once when the operator captures the credential and once more
    /// by the dispatcher before its first recipient.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] when the relay accepts the credential,
    /// or an [`Err`] containing a [`TransportError`] otherwise.
    async fn verify(&self, credential: &SmtpCredential) -> Result<(), TransportError>;

    /// Deliver one message.
    ///
    /// # Arguments
    /// * `credential` - The verified sender credential.
    /// * `email` - The rendered [`OutgoingEmail`] for one recipient.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] when the relay accepts the message, or
    /// an [`Err`] containing a [`DeliveryError`] for this recipient only.
    async fn send(
        &self,
        credential: &SmtpCredential,
        email: &OutgoingEmail,
    ) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn verify(&self, credential: &SmtpCredential) -> Result<(), TransportError>;
        async fn send(&self, credential: &SmtpCredential, email: &OutgoingEmail) -> Result<(), DeliveryError>;
    }
}
