//! # Cache administration module
//!
//! Coordinates invalidation across the heterogeneous cache backends the CMS
//! can be deployed with.
//!
//! ## Architecture
//!
//! ```text
//! CacheClearer                 <- orchestrator, picks the terminal path
//!   ├── registry::validate       <- closed driver set, canonical ordering
//!   ├── CacheFactory             <- builds drivers, skips the unavailable
//!   │     └── Driver (enum)      <- zero-cost dispatch over the backends
//!   └── CacheBreaker             <- selective item/tag invalidation
//! ```
//!
//! ## Design decisions
//!
//! - **Enum dispatch**: the factory returns `Driver` values, no vtable.
//! - **Graceful degradation**: an unreachable or unconfigured backend is
//!   logged and skipped, never a user-facing error.
//! - **Best-effort clearing**: per-driver failures are reported and the loop
//!   continues; only driver validation aborts the command.
//! - **Explicit collaborators**: the orchestrator receives its factory,
//!   catalog, and reporter instead of reaching into process-wide state.

pub mod breaker;
pub mod clear;
pub mod driver;
pub mod drivers;
pub mod errors;
pub mod factory;
pub mod registry;
pub mod traits;

pub use breaker::{CacheBreaker, Target};
pub use clear::{CacheClearer, ClearOutcome, ClearRequest, DriverReport};
pub use driver::Driver;
pub use errors::{CacheError, CacheResult};
pub use factory::{CacheFactory, DriverFactory};
pub use registry::DriverKind;
pub use traits::CacheDriver;
