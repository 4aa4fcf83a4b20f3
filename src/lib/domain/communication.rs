//! Mail transport capability and its message/error types

pub mod errors;
pub mod mailer;
pub mod message;
