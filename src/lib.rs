//! Azimuth measurement and annotation engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser on top of a
//! geo-referenced imagery view. It owns the full lifecycle of the measurement
//! overlay: translating raw DOM input events into measurements, keeping an
//! undo/redo log, positioning a precision compass, rendering everything onto
//! a 2D canvas, and packaging the annotated map for upload. The host layer is
//! responsible only for wiring DOM events to the engine, reacting to the
//! returned [`engine::Action`]s, and supplying the network collaborators used
//! by [`capture`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editing session ([`engine::EngineCore`]) and input handlers |
//! | [`web`] | Browser bindings: canvas-backed engine, compositor, console logging |
//! | [`geometry`] | Points, bearings, cardinal directions, segment distance |
//! | [`doc`] | Measurement records and the in-memory store |
//! | [`history`] | Linear undo/redo log of store snapshots |
//! | [`compass`] | Precision compass overlay configuration |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against drawn measurements |
//! | [`render`] | Scene rendering onto a [`surface::Surface`] |
//! | [`surface`] | The 2D drawing surface the renderer targets |
//! | [`capture`] | Save transaction: composite, upload, register |
//! | [`config`] | Tunable engine settings |
//! | [`consts`] | Shared numeric constants (thresholds, marker sizes, etc.) |

pub mod capture;
pub mod compass;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod surface;
pub mod web;
