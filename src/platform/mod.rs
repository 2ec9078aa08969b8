//! Platform abstraction layer
//!
//! Browser event wiring lives in the wasm entry point; this module holds
//! the platform-independent part: mapping raw events to game commands.

pub mod input;

pub use input::Command;
