#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Bulk mail-merge service: sends a personalized message to a recipient
//! list through one operator credential, with live send progress streamed
//! to observers.

pub mod domain;
pub mod infrastructure;
