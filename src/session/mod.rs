//! Session lifecycle management.
//!
//! This module owns the session state machine (`draft` -> `uploaded` ->
//! `summarized`), orchestrates the summarize-and-repair pipeline, and keeps
//! the database row and the on-disk session directory in agreement when a
//! session is linked to a case or unlinked.

mod service;
mod view;

pub use service::SessionService;
pub use view::{SessionStatus, SessionView};
