//! Canvas interaction engine for the sticky-notes board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! board's interaction model: translating raw DOM input events into note
//! mutations, maintaining the pan/zoom transform, hit-testing notes, snapping
//! to the grid, and drawing the background grid. The host layer is responsible
//! only for wiring DOM events to the engine, rendering note cards at the
//! geometry the engine reports, and persisting the resulting
//! [`engine::Action`]s to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | In-memory note store and wire types |
//! | [`camera`] | Screen/world coordinate transform |
//! | [`viewport`] | Pan and zoom controller |
//! | [`snap`] | Grid snapping and alignment guides |
//! | [`gesture`] | Drag/resize state machine for a single note |
//! | [`input`] | Input event types and interaction state |
//! | [`hit`] | Hit-testing against notes and resize handles |
//! | [`render`] | Background grid and guide rendering |
//! | [`consts`] | Shared constants (zoom limits, grid pitch, note defaults) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod render;
pub mod snap;
pub mod viewport;
