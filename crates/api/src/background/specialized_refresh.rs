//! One-shot specialized-playlist seeding and refresh, awaited at server
//! startup before the listener is bound.
//!
//! Seeds every template by name, then regenerates cached tracks for
//! templates that are new, empty, or were last refreshed before today.

use std::sync::Arc;

use chrono::Local;
use moodtunes_db::DbPool;
use moodtunes_llm::ChatModel;
use moodtunes_pipeline::specialized::SpecializedRefresher;
use moodtunes_pipeline::store::PgTemplateStore;
use tokio_util::sync::CancellationToken;

/// Run the startup refresh unless `cancel` fires first.
pub async fn run(pool: DbPool, llm: Arc<dyn ChatModel>, cancel: CancellationToken) {
    let refresher = SpecializedRefresher::new(llm, Arc::new(PgTemplateStore::new(pool)));
    let today = Local::now().date_naive();

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!("Specialized playlist refresh cancelled");
        }
        result = refresher.run_startup(today) => match result {
            Ok(report) if report.failed > 0 => {
                tracing::warn!(failed = report.failed, "Some specialized playlists could not be refreshed");
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Specialized playlist refresh aborted"),
        }
    }
}
