//! Electronic component inventory with datasheet and substitute-part lookup.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! together behind a CLI and an HTTP API.

pub mod app;
pub mod cli;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod server;

pub use crate::app::AppState;
