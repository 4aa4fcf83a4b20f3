//! Error types for the mail transport

use lettre::{address::AddressError, error::Error, transport::smtp};
use thiserror::Error;

/// Failure to establish the sending capability itself.
///
/// The only job-fatal error class: a send job hitting this before its first
/// recipient ends in `error` status with no dispatch attempted.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The relay rejected the credentials
    #[error("the SMTP relay rejected the credentials")]
    CredentialsRejected,

    /// The relay could not be reached
    #[error("could not reach the SMTP relay: {0}")]
    Connection(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

/// Failure to deliver to a single recipient.
///
/// Recorded in the job's error list and counted; never fatal to the job.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The recipient address could not be used as an SMTP mailbox
    #[error("invalid recipient address")]
    InvalidAddress,

    /// The relay rejected the message
    #[error("{0}")]
    Rejected(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<smtp::Error> for TransportError {
    fn from(err: smtp::Error) -> Self {
        if err.is_permanent() {
            TransportError::CredentialsRejected
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

impl From<smtp::Error> for DeliveryError {
    fn from(err: smtp::Error) -> Self {
        DeliveryError::Rejected(err.to_string())
    }
}

impl From<AddressError> for DeliveryError {
    fn from(_err: AddressError) -> Self {
        DeliveryError::InvalidAddress
    }
}

impl From<Error> for DeliveryError {
    fn from(err: Error) -> Self {
        DeliveryError::UnknownError(err.into())
    }
}
