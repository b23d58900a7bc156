//! Client-side state that outlives a single API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! `board` keeps the engine's note collection consistent with the server and
//! `dashboard` holds the per-user dashboard title.

pub mod board;
pub mod dashboard;

#[cfg(test)]
pub(crate) mod fake_api;
