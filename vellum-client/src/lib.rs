//! # Vellum Client Library
//!
//! Error types and shared plumbing for the Vellum CMS administration CLI.

pub mod error;

pub use error::{ClientError, ClientResult};
