//! Catalog verification of a drafted playlist.

use moodtunes_catalog::CatalogLookup;
use moodtunes_core::duration::normalize_duration;
use moodtunes_db::models::track::NewTrack;

use crate::generator::DraftTrack;

/// Tracks ready to persist, in draft order, with verification counters.
///
/// `verified + fallback == tracks.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledTracks {
    pub tracks: Vec<NewTrack>,
    pub verified: usize,
    pub fallback: usize,
}

/// Check every draft against the catalog, one lookup at a time.
///
/// Verified tracks take the catalog's title, artist, album, duration and
/// URI. Unverified tracks keep the LLM text with a normalized duration and
/// no album or URI.
pub async fn verify_tracks(
    lookup: &CatalogLookup,
    drafts: &[DraftTrack],
    market: Option<&str>,
) -> AssembledTracks {
    let mut assembled = AssembledTracks {
        tracks: Vec::with_capacity(drafts.len()),
        verified: 0,
        fallback: 0,
    };

    for draft in drafts {
        match lookup.lookup(&draft.title, &draft.artist, market).await {
            Some(hit) => {
                assembled.verified += 1;
                assembled.tracks.push(NewTrack {
                    title: hit.title,
                    artist: hit.artist,
                    album: hit.album,
                    duration: Some(hit.duration),
                    catalog_uri: Some(hit.uri),
                });
            }
            None => {
                assembled.fallback += 1;
                assembled.tracks.push(unverified(draft));
            }
        }
    }

    tracing::debug!(
        verified = assembled.verified,
        fallback = assembled.fallback,
        market,
        "Catalog verification finished",
    );
    assembled
}

fn unverified(draft: &DraftTrack) -> NewTrack {
    NewTrack {
        title: draft.title.clone(),
        artist: draft.artist.clone(),
        album: None,
        duration: draft.duration.as_deref().and_then(normalize_duration),
        catalog_uri: None,
    }
}
