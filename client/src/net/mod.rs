//! Networking modules for the persistence REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs authenticated HTTP calls and classifies failures, and
//! `types` defines the wire schema that is not already owned by `canvas::doc`.

pub mod api;
pub mod types;
