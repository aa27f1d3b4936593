use std::sync::Arc;

use moodtunes_catalog::{CatalogLookup, MarketResolver};
use moodtunes_llm::ChatModel;
use moodtunes_pipeline::emotion::EmotionAnalyzer;
use moodtunes_pipeline::replacement::TrackReplacer;
use moodtunes_pipeline::service::MoodPlaylistService;
use moodtunes_pipeline::store::PgPlaylistStore;

use crate::config::ServerConfig;
use crate::mail::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: moodtunes_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub playlists: Arc<MoodPlaylistService>,
    pub replacer: TrackReplacer,
    pub emotion: EmotionAnalyzer,
    pub catalog: CatalogLookup,
    pub markets: Arc<MarketResolver>,
    /// `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    /// Wire the pipeline components around one LLM client and catalog.
    pub fn new(
        pool: moodtunes_db::DbPool,
        config: ServerConfig,
        llm: Arc<dyn ChatModel>,
        catalog: CatalogLookup,
        markets: MarketResolver,
        mailer: Option<Mailer>,
    ) -> Self {
        let markets = Arc::new(markets);
        let store = Arc::new(PgPlaylistStore::new(pool.clone()));
        let playlists =
            MoodPlaylistService::new(llm.clone(), catalog.clone(), markets.clone(), store);

        Self {
            pool,
            config: Arc::new(config),
            playlists: Arc::new(playlists),
            replacer: TrackReplacer::new(llm.clone()),
            emotion: EmotionAnalyzer::new(llm),
            catalog,
            markets,
            mailer: mailer.map(Arc::new),
        }
    }
}
