//! Domain services over the Postgres store.
//!
//! Each service owns its SQL and error type. Route handlers translate those
//! errors into status codes.

pub mod dashboard;
pub mod note;
pub mod session;
