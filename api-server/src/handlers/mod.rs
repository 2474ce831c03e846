//! HTTP handlers

pub mod health;
pub mod config;
pub mod predict;
pub mod train;
