//! Session-scoped handlers: the operator's send workflow

pub mod clear_session;
pub mod create_session;
pub mod import_recipients;
pub mod preview_template;
pub mod progress;
pub mod save_template;
pub mod start_send;
pub mod update_recipients;
pub mod verify_credential;
