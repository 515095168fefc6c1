//! Clear-cache orchestrator
//!
//! Two terminal paths, never mixed in one invocation: with no targets the
//! whole active driver set is wiped through the factory; with targets each
//! one is selectively invalidated through the breaker. Driver validation is
//! the only fatal error and happens before any backend is touched; per-driver
//! clear failures are reported and the loop continues, and the closing
//! aggregate line is emitted either way.

use tracing::warn;

use super::breaker::{CacheBreaker, Target};
use super::errors::CacheResult;
use super::factory::DriverFactory;
use super::registry::{self, DriverKind};
use super::traits::CacheDriver;
use crate::catalog::Catalog;
use crate::report::Reporter;

/// Everything the orchestrator needs to know about one invocation
#[derive(Debug, Clone, Default)]
pub struct ClearRequest {
    /// What to invalidate; empty means clear everything
    pub targets: Vec<Target>,
    /// Driver tokens to restrict the operation to; empty means all drivers
    pub drivers: Vec<String>,
}

/// Per-driver outcome of a full clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverReport {
    pub kind: DriverKind,
    pub cleared: bool,
}

/// Aggregate result of one invocation
#[derive(Debug, Default)]
pub struct ClearOutcome {
    /// One entry per attempted driver (full-clear path only)
    pub reports: Vec<DriverReport>,
    /// Number of targets processed (selective path only)
    pub targets_processed: usize,
}

/// Top-level entry point for cache clearing
#[derive(Debug)]
pub struct CacheClearer<F> {
    factory: F,
    catalog: Catalog,
}

impl<F: DriverFactory> CacheClearer<F> {
    pub fn new(factory: F, catalog: Catalog) -> Self {
        Self { factory, catalog }
    }

    pub async fn run<R: Reporter>(
        &self,
        request: &ClearRequest,
        reporter: &mut R,
    ) -> CacheResult<ClearOutcome> {
        let kinds = registry::validate(&request.drivers)?;

        let mut outcome = ClearOutcome::default();

        if request.targets.is_empty() {
            let drivers = self.factory.build(&kinds).await;
            for driver in &drivers {
                let kind = driver.kind();
                let display = self.catalog.driver_name(kind);
                match driver.clear_all().await {
                    Ok(()) => {
                        reporter.comment(&format!("{display} cache cleared."));
                        outcome.reports.push(DriverReport {
                            kind,
                            cleared: true,
                        });
                    }
                    Err(error) => {
                        warn!(driver = kind.as_str(), %error, "Full clear failed");
                        reporter.error(&format!("Failed to clear the {display} cache."));
                        outcome.reports.push(DriverReport {
                            kind,
                            cleared: false,
                        });
                    }
                }
            }
        } else {
            let breaker = CacheBreaker::new(self.factory.build(&kinds).await);
            for target in &request.targets {
                breaker.invalidate(target).await;
                reporter.comment(&format!("{target} cleared."));
                outcome.targets_processed += 1;
            }
        }

        reporter.info(self.catalog.lookup("cache.cleared"));
        Ok(outcome)
    }
}
