//! Seeding and daily refresh of specialized (template) playlists.

use std::sync::Arc;

use chrono::NaiveDate;
use moodtunes_core::templates::{PlaylistTemplate, SEED_TEMPLATES};
use moodtunes_db::models::specialized_playlist::{CreateSpecializedPlaylist, SpecializedPlaylist};
use moodtunes_llm::ChatModel;

use crate::generator::PlaylistGenerator;
use crate::store::TemplateStore;
use crate::PipelineError;

/// Counters for one refresh run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub created: usize,
    pub refreshed: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

fn seed_row(template: &PlaylistTemplate) -> CreateSpecializedPlaylist {
    CreateSpecializedPlaylist {
        name: template.name.to_string(),
        description: template.description.to_string(),
        keywords: template.keywords.to_string(),
        target_song_count: template.target_song_count as i32,
    }
}

pub struct SpecializedRefresher {
    generator: PlaylistGenerator,
    store: Arc<dyn TemplateStore>,
}

impl SpecializedRefresher {
    pub fn new(llm: Arc<dyn ChatModel>, store: Arc<dyn TemplateStore>) -> Self {
        Self {
            generator: PlaylistGenerator::new(llm),
            store,
        }
    }

    /// Seed every template by name, then regenerate any that are new,
    /// empty, or last refreshed before `today`.
    pub async fn run_startup(&self, today: NaiveDate) -> Result<RefreshReport, PipelineError> {
        tracing::info!(%today, templates = SEED_TEMPLATES.len(), "Running specialized playlist startup refresh");
        let mut report = RefreshReport::default();

        for template in SEED_TEMPLATES {
            let (row, created) = self.store.ensure_template(&seed_row(template)).await?;
            if created {
                tracing::info!(playlist = %row.name, "Created specialized playlist");
                report.created += 1;
            }

            if created || row.needs_refresh(today) {
                self.refresh_one(&row, today, &mut report).await?;
            } else {
                tracing::debug!(playlist = %row.name, "Specialized playlist already fresh");
                report.up_to_date += 1;
            }
        }

        tracing::info!(?report, "Specialized playlist startup refresh finished");
        Ok(report)
    }

    /// Regenerate every stored template regardless of its refresh date.
    pub async fn refresh_all(&self, today: NaiveDate) -> Result<RefreshReport, PipelineError> {
        let rows = self.store.list_templates().await?;
        let mut report = RefreshReport::default();
        if rows.is_empty() {
            tracing::warn!("No specialized playlists stored; run the startup refresh to seed them");
            return Ok(report);
        }

        for row in &rows {
            self.refresh_one(row, today, &mut report).await?;
        }

        tracing::info!(?report, "Specialized playlist refresh finished");
        Ok(report)
    }

    async fn refresh_one(
        &self,
        row: &SpecializedPlaylist,
        today: NaiveDate,
        report: &mut RefreshReport,
    ) -> Result<(), PipelineError> {
        let song_count = u32::try_from(row.target_song_count).unwrap_or(0);
        match self
            .generator
            .generate_template_tracks(&row.name, &row.keywords, song_count)
            .await
        {
            Some(tracks) => {
                self.store.save_tracks(row.id, &tracks, today).await?;
                tracing::info!(playlist = %row.name, tracks = tracks.len(), "Specialized playlist refreshed");
                report.refreshed += 1;
            }
            None => {
                tracing::error!(playlist = %row.name, "Failed to generate specialized playlist tracks");
                report.failed += 1;
            }
        }
        Ok(())
    }
}
