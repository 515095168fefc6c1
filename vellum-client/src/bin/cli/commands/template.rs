//! Template command handlers for the Vellum CLI

use tracing::debug;
use vellum_client::{ClientError, ClientResult};
use vellum_shared::templates::{delete_templates, PgTemplateStore};
use vellum_shared::{AdminConfig, ConsoleReporter};

use crate::TemplateCommands;

pub async fn handle_template_command(
    cmd: TemplateCommands,
    config: &AdminConfig,
) -> ClientResult<()> {
    match cmd {
        TemplateCommands::Delete { templates } => {
            let database = config.database.as_ref().ok_or_else(|| {
                ClientError::InvalidInput(
                    "template deletion requires a [database] section in the configuration"
                        .to_string(),
                )
            })?;

            let store = PgTemplateStore::connect(database).await?;
            let mut reporter = ConsoleReporter;
            let outcome = delete_templates(&store, &templates, &mut reporter).await;
            debug!(?outcome, "Template deletion finished");
            Ok(())
        }
    }
}
