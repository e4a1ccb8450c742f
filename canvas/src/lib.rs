//! Page editor engine for the resume builder.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing surface: a fixed A4 page on a canvas, the resume elements placed on
//! it, and the gesture machinery that drags new elements in from the palette,
//! moves, resizes and rotates them, and snaps them to the grid and to each
//! other. The host JavaScript layer wires DOM events to the engine, shows the
//! content editor, and persists the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`session`] | Open document, load/save through a [`session::Persistence`] backend |
//! | [`doc`] | Elements and the ordered in-memory store |
//! | [`content`] | Per-kind element payloads, defaults and validation |
//! | [`templates`] | Built-in starter resumes |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against placed elements and their handles |
//! | [`geometry`] | Points, boxes, handles, resize and rotation math |
//! | [`snap`] | Grid snapping and element alignment guides |
//! | [`page`] | Page frame and screen/page coordinate conversion |
//! | [`surface`] | Renderer-agnostic scene composition |
//! | [`render`] | `Canvas2D` drawing of a composed scene |
//! | [`config`] | Editor settings |
//! | [`consts`] | Shared numeric constants (page size, grid, thresholds) |

pub mod config;
pub mod consts;
pub mod content;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod page;
pub mod render;
pub mod session;
pub mod snap;
pub mod surface;
pub mod templates;
