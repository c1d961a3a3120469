//! Common utilities shared across the marketplace crates.
//!
//! This crate provides:
//! - The error taxonomy and its HTTP mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt, ResultExt};
