//! Error types for the send-job subsystem

use thiserror::Error;
use uuid::Uuid;

/// The referenced session does not exist (never created, or cleared)
#[derive(Debug, Error, PartialEq, Eq)]
#[error("session {0} not found")]
pub struct SessionNotFound(pub Uuid);

/// Errors that can occur when starting a send job
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartSendError {
    /// A job is already dispatching for this session
    #[error("a send job is already running")]
    AlreadySending,

    /// No verified credential is attached to the session
    #[error("no verified sender credential")]
    MissingCredential,

    /// The recipient list is empty
    #[error("the recipient list is empty")]
    NoRecipients,

    /// Subject or body is missing
    #[error("the message template is incomplete")]
    MissingTemplate,

    /// The session does not exist
    #[error(transparent)]
    SessionNotFound(#[from] SessionNotFound),
}
