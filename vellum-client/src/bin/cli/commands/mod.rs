//! Command handlers for the Vellum CLI

pub mod cache;
pub mod template;

pub use cache::handle_cache_command;
pub use template::handle_template_command;
