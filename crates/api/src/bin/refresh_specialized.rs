//! Regenerate cached tracks for every stored specialized playlist,
//! regardless of when each was last refreshed.
//!
//! Templates are seeded by the server's startup refresh; this tool only
//! touches rows that already exist. Exits non-zero if any template failed.

use std::sync::Arc;

use chrono::Local;
use moodtunes_llm::{ChatModel, LlmConfig, OpenAiClient};
use moodtunes_pipeline::specialized::SpecializedRefresher;
use moodtunes_pipeline::store::PgTemplateStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refresh_specialized=info,moodtunes_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = moodtunes_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    moodtunes_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let llm: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(LlmConfig::from_env()));
    let refresher = SpecializedRefresher::new(llm, Arc::new(PgTemplateStore::new(pool)));

    match refresher.refresh_all(Local::now().date_naive()).await {
        Ok(report) => {
            println!("refreshed={} failed={}", report.refreshed, report.failed);
            if report.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Specialized playlist refresh failed");
            std::process::exit(1);
        }
    }
}
