//! Cache breaker
//!
//! Selective invalidation across the active driver set. Each call handles
//! exactly one target; a failure or no-match on one driver never stops the
//! remaining drivers, and callers process their targets independently.

use std::fmt;

use tracing::warn;

use super::traits::CacheDriver;

/// One thing to invalidate: either a single item path or every entry
/// carrying a tag. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Item(String),
    Tag(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Item(path) => write!(f, "Item {path}"),
            Target::Tag(tag) => write!(f, "Tag {tag}"),
        }
    }
}

/// Applies selective invalidation to every active driver
#[derive(Debug)]
pub struct CacheBreaker<D> {
    drivers: Vec<D>,
}

impl<D: CacheDriver> CacheBreaker<D> {
    pub fn new(drivers: Vec<D>) -> Self {
        Self { drivers }
    }

    /// Invalidate `target` on every driver, best effort.
    pub async fn invalidate(&self, target: &Target) {
        for driver in &self.drivers {
            let result = match target {
                Target::Item(path) => driver.clear_item(path).await,
                Target::Tag(tag) => driver.clear_tag(tag).await,
            };
            if let Err(error) = result {
                warn!(
                    driver = driver.kind().as_str(),
                    %error,
                    "Selective invalidation failed, continuing with remaining drivers"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::registry::DriverKind;
    use crate::cache::test_support::RecordingDriver;

    #[tokio::test]
    async fn test_item_target_reaches_every_driver() {
        let first = RecordingDriver::new(DriverKind::File);
        let second = RecordingDriver::new(DriverKind::Redis);
        let breaker = CacheBreaker::new(vec![first.clone(), second.clone()]);

        breaker.invalidate(&Target::Item("local/foo".into())).await;

        assert_eq!(first.calls(), vec!["item:local/foo"]);
        assert_eq!(second.calls(), vec!["item:local/foo"]);
    }

    #[tokio::test]
    async fn test_failure_on_one_driver_does_not_stop_the_rest() {
        let failing = RecordingDriver::failing(DriverKind::Db);
        let healthy = RecordingDriver::new(DriverKind::File);
        let breaker = CacheBreaker::new(vec![failing.clone(), healthy.clone()]);

        breaker.invalidate(&Target::Tag("news".into())).await;

        assert_eq!(failing.calls(), vec!["tag:news"]);
        assert_eq!(healthy.calls(), vec!["tag:news"]);
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Item("a/b".into()).to_string(), "Item a/b");
        assert_eq!(Target::Tag("foo".into()).to_string(), "Tag foo");
    }
}
