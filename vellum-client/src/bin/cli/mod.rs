//! CLI module for the Vellum CLI tool
//!
//! Organizes command handlers by command category.

pub mod commands;

pub use commands::{handle_cache_command, handle_template_command};
