//! API Module
//!
//! Structure:
//! - commands.rs: predict / train / config / health and their DTOs
//! - engine_status.rs: feature layout + loaded-model introspection
//!
//! Usage:
//! - `api::predict(&service, &request)`
//! - `api::engine_status(&service)`

pub mod commands;
pub mod engine_status;

pub use commands::*;
pub use engine_status::{engine_status, EngineStatus, ModelStatus};
