//! Engine for the 3D text screensaver.
//!
//! This crate is compiled to WebAssembly and runs in the browser alongside a
//! WebGL scene owned by the page script. It owns everything except drawing:
//! the configuration model and its URL/storage codec, the bounce and float
//! motion, the rotation styles, the live clock text, and the desktop dialog
//! state. The page script wires DOM events and animation frames to the engine
//! and applies the resulting [`engine::Action`]s to its scene.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] and the action queue |
//! | [`host`] | `wasm-bindgen` exports wrapping the core |
//! | [`config`] | Typed configuration, defaults, and validation |
//! | [`codec`] | Query-string and stored-JSON encode/decode |
//! | [`camera`] | Perspective camera and visible-bounds math |
//! | [`motion`] | Bounce and float motion |
//! | [`rotation`] | Rotation styles and random resolution |
//! | [`clock`] | Clock text and once-per-second regeneration |
//! | [`limiter`] | Frame-rate cap |
//! | [`form`] | Desktop dialog projection |
//! | [`color`] | Hex colors and gradient presets |
//! | [`storage`] | `localStorage` and page location |
//! | [`consts`] | Shared numeric constants (defaults, ratios, camera) |

pub mod camera;
pub mod clock;
pub mod codec;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod form;
pub mod host;
pub mod limiter;
pub mod motion;
pub mod rotation;
pub mod storage;
