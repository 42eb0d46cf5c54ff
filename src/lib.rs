//! # Userpanel
//!
//! `userpanel` is a small user management system in two halves:
//!
//! - [`api`]: an HTTP service holding `{id, name}` user records in memory and
//!   exposing them under `/api/users` (list, create, read, replace, patch, delete).
//! - [`panel`]: the UserPanel controller. It renders the user list, tracks at
//!   most one selected user, and dispatches create/update/delete requests,
//!   refreshing the list after every mutation.
//!
//! ## Panel state machine
//!
//! ```text
//!   NoSelection  --select-->  Selected  --delete (response)-->  NoSelection
//!                              |    ^
//!                         begin_edit |  save (response) / cancel
//!                              v    |
//!                           Selected + EditFormOpen
//! ```
//!
//! The backend is authoritative. The panel never patches its list in place; a
//! full refresh is the only way rendered rows change.

pub mod api;
pub mod cli;
pub mod model;
pub mod panel;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
