//! Template administration
//!
//! Bulk deletion of CMS templates by `group/name`. The name shape is
//! enforced here because the template store keys on it; item paths in the
//! cache module carry no such structure. Per-template problems (malformed
//! name, missing template, store error) are reported and the loop continues,
//! so one bad name never blocks the rest of the batch.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::report::Reporter;

static TEMPLATE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$").expect("valid pattern"));

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template {0} must be in <template_group>/<template_name> format")]
    InvalidName(String),

    #[error("Template database error: {0}")]
    Database(String),
}

pub type TemplateResult<T> = Result<T, TemplateError>;

pub type TemplateId = i64;

/// A template addressed as `group/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    pub group: String,
    pub name: String,
}

impl FromStr for TemplateRef {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !TEMPLATE_NAME.is_match(s) {
            return Err(TemplateError::InvalidName(s.to_string()));
        }
        let (group, name) = s.split_once('/').expect("pattern guarantees a separator");
        Ok(Self {
            group: group.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

/// Lookup/delete seam over the CMS template storage
pub trait TemplateStore: Send + Sync {
    fn find(
        &self,
        template: &TemplateRef,
    ) -> impl Future<Output = TemplateResult<Option<TemplateId>>> + Send;

    fn delete(&self, id: TemplateId) -> impl Future<Output = TemplateResult<()>> + Send;
}

/// Template store over the CMS Postgres schema
#[derive(Debug, Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub async fn connect(config: &DatabaseConfig) -> TemplateResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| TemplateError::Database(format!("Failed to connect: {}", e)))?;

        debug!("Template store connected");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by embedding applications and tests)
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TemplateStore for PgTemplateStore {
    async fn find(&self, template: &TemplateRef) -> TemplateResult<Option<TemplateId>> {
        sqlx::query_scalar(
            "SELECT t.template_id FROM templates t \
             JOIN template_groups g ON g.group_id = t.group_id \
             WHERE g.group_name = $1 AND t.template_name = $2",
        )
        .bind(&template.group)
        .bind(&template.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TemplateError::Database(e.to_string()))
    }

    async fn delete(&self, id: TemplateId) -> TemplateResult<()> {
        sqlx::query("DELETE FROM templates WHERE template_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| TemplateError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Per-batch tally of what happened
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: usize,
    pub missing: usize,
    pub invalid: usize,
    pub failed: usize,
}

/// Delete each named template, reporting one line per template.
pub async fn delete_templates<S: TemplateStore, R: Reporter>(
    store: &S,
    names: &[String],
    reporter: &mut R,
) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();

    for raw in names {
        let template = match raw.parse::<TemplateRef>() {
            Ok(template) => template,
            Err(_) => {
                reporter.error(&format!(
                    "Template {raw} must be in <template_group>/<template_name> format."
                ));
                outcome.invalid += 1;
                continue;
            }
        };

        let id = match store.find(&template).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                reporter.error(&format!("Template {template} not found."));
                outcome.missing += 1;
                continue;
            }
            Err(error) => {
                reporter.error(&format!("Failed to look up template {template}: {error}"));
                outcome.failed += 1;
                continue;
            }
        };

        match store.delete(id).await {
            Ok(()) => {
                reporter.info(&format!("Template {template} deleted."));
                outcome.deleted += 1;
            }
            Err(error) => {
                reporter.error(&format!("Failed to delete template {template}: {error}"));
                outcome.failed += 1;
            }
        }
    }

    outcome
}
