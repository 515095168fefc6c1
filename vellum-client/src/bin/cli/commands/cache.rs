//! Cache command handlers for the Vellum CLI

use vellum_client::ClientResult;
use vellum_shared::cache::{CacheClearer, CacheFactory, ClearRequest, Target};
use vellum_shared::{AdminConfig, Catalog, ConsoleReporter};

use crate::CacheCommands;

pub async fn handle_cache_command(cmd: CacheCommands, config: &AdminConfig) -> ClientResult<()> {
    match cmd {
        CacheCommands::Clear {
            items,
            tags,
            drivers,
        } => {
            // The surface takes a flat list plus a flag; everything past this
            // boundary works with explicit targets.
            let targets = items
                .into_iter()
                .map(|raw| {
                    if tags {
                        Target::Tag(raw)
                    } else {
                        Target::Item(raw)
                    }
                })
                .collect();
            let request = ClearRequest { targets, drivers };

            let clearer = CacheClearer::new(
                CacheFactory::new(config.cache.clone()),
                Catalog::default(),
            );
            let mut reporter = ConsoleReporter;
            clearer.run(&request, &mut reporter).await?;
            Ok(())
        }
    }
}
