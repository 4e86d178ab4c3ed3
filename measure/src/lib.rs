//! Measurement and material-estimation engine for surface surveys.
//!
//! The user marks the corners of a floor, wall or ceiling on a live camera
//! frame; this crate turns those capture-space pixels into real-world edge
//! lengths, polygon area and perimeter, and a materials list for the chosen
//! surface category. It also serves the manual length × width path.
//!
//! Everything except [`render`] and [`engine::Engine`] is plain Rust and runs
//! natively. The browser host wires camera, DOM and animation-frame callbacks
//! to the engine and presents the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`calibration`] | Pixels-per-meter model and auto-calibration strategies |
//! | [`points`] | Ordered point store and per-edge distances |
//! | [`geometry`] | Shoelace area, perimeter and the manual rectangle |
//! | [`materials`] | Surface categories, coefficient tables and estimates |
//! | [`session`] | One measurement session and its lifecycle |
//! | [`input`] | Tap-to-capture coordinate mapping |
//! | [`engine`] | Testable [`engine::EngineCore`] and the browser [`engine::Engine`] |
//! | [`render`] | Read-only overlay drawing on a 2D canvas |
//! | [`error`] | [`MeasureError`] |
//! | [`consts`] | Shared numeric constants (limits, calibration tiers, overlay sizes) |

pub mod calibration;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod materials;
pub mod points;
pub mod render;
pub mod session;

pub use error::MeasureError;
