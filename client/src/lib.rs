//! Board client: REST access to the persistence API and the synchronisation
//! layer that keeps the canvas engine's notes consistent with it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `canvas` crate owns geometry and gestures and reports committed edits as
//! [`canvas::engine::Action`]s. This crate turns those actions into API calls
//! (`net`) and reconciles the local note collection with the server's answers
//! (`state`), rolling optimistic edits back when a call fails.

pub mod net;
pub mod state;
