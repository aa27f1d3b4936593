//! Repository integration tests against a real Postgres.
//!
//! Each test gets a fresh database from `DATABASE_URL` via `sqlx::test`.

use chrono::{Duration, Utc};
use moodtunes_db::models::mood_entry::CreateMoodEntry;
use moodtunes_db::models::password_reset::CreatePasswordResetToken;
use moodtunes_db::models::session::CreateSession;
use moodtunes_db::models::playlist::{CreatePlaylist, PlaylistWithTracks};
use moodtunes_db::models::specialized_playlist::{CachedTrack, CreateSpecializedPlaylist};
use moodtunes_db::models::track::NewTrack;
use moodtunes_db::models::user::{CreateUser, User};
use moodtunes_db::repositories::{
    MoodEntryRepo, PasswordResetRepo, PlaylistRepo, SessionRepo, SpecializedPlaylistRepo,
    TrackRepo, UserPreferenceRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn user(pool: &PgPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

fn track(title: &str) -> NewTrack {
    NewTrack {
        title: title.to_string(),
        artist: "Artist".to_string(),
        ..Default::default()
    }
}

async fn playlist_for(pool: &PgPool, user_id: i64, titles: &[&str]) -> PlaylistWithTracks {
    let entry = MoodEntryRepo::create(
        pool,
        &CreateMoodEntry {
            user_id,
            mood_text: "exhausted after finals".to_string(),
            energy_level: 3,
            season: "Spring".to_string(),
            category: "Sad".to_string(),
        },
    )
    .await
    .unwrap();

    let tracks: Vec<NewTrack> = titles.iter().map(|t| track(t)).collect();
    PlaylistRepo::create_with_tracks(
        pool,
        &CreatePlaylist {
            mood_entry_id: entry.id,
            name: "Finals Recovery".to_string(),
            prompt_used: "prompt".to_string(),
            llm_fallback_count: 1,
        },
        &tracks,
    )
    .await
    .unwrap()
}

async fn positions(pool: &PgPool, playlist_id: i64) -> Vec<(i64, i32)> {
    let mut rows: Vec<(i64, i32)> = TrackRepo::list_for_playlist(pool, playlist_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.id, t.position))
        .collect();
    rows.sort();
    rows
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_violates_named_constraint(pool: PgPool) {
    user(&pool, "alice").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "./migrations")]
async fn email_lookup_ignores_case(pool: PgPool) {
    let created = user(&pool, "bob").await;
    let found = UserRepo::find_active_by_email(&pool, "BOB@Example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn favorite_genre_upsert_overwrites(pool: PgPool) {
    let u = user(&pool, "carol").await;
    UserPreferenceRepo::upsert_favorite_genre(&pool, u.id, "Pop")
        .await
        .unwrap();
    let pref = UserPreferenceRepo::upsert_favorite_genre(&pool, u.id, "lofi")
        .await
        .unwrap();
    assert_eq!(pref.favorite_genre, "lofi");
}

#[sqlx::test(migrations = "./migrations")]
async fn reset_tokens_are_single_use_and_superseded(pool: PgPool) {
    let u = user(&pool, "dave").await;
    let expires_at = Utc::now() + Duration::minutes(30);
    let first = PasswordResetRepo::create(
        &pool,
        &CreatePasswordResetToken {
            user_id: u.id,
            token_hash: "first".to_string(),
            expires_at,
        },
    )
    .await
    .unwrap();
    PasswordResetRepo::create(
        &pool,
        &CreatePasswordResetToken {
            user_id: u.id,
            token_hash: "second".to_string(),
            expires_at,
        },
    )
    .await
    .unwrap();

    assert!(PasswordResetRepo::find_valid(&pool, u.id, "first")
        .await
        .unwrap()
        .is_none());
    assert!(!PasswordResetRepo::mark_used(&pool, first.id).await.unwrap());

    let second = PasswordResetRepo::find_valid(&pool, u.id, "second")
        .await
        .unwrap()
        .unwrap();
    assert!(PasswordResetRepo::mark_used(&pool, second.id).await.unwrap());
    assert!(PasswordResetRepo::find_valid(&pool, u.id, "second")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_session_redeems_once(pool: PgPool) {
    let u = user(&pool, "erin").await;
    let session = |hash: &str, expires_at| CreateSession {
        user_id: u.id,
        refresh_token_hash: hash.to_string(),
        expires_at,
        user_agent: Some("test".to_string()),
        ip_address: None,
    };
    SessionRepo::create(&pool, &session("live", Utc::now() + Duration::days(1)))
        .await
        .unwrap();
    SessionRepo::create(&pool, &session("stale", Utc::now() - Duration::minutes(1)))
        .await
        .unwrap();
    assert_eq!(SessionRepo::count_active(&pool, u.id).await.unwrap(), 1);

    let redeemed = SessionRepo::redeem(&pool, "live").await.unwrap().unwrap();
    assert_eq!(redeemed.user_id, u.id);
    assert!(redeemed.is_revoked);
    assert!(SessionRepo::redeem(&pool, "live").await.unwrap().is_none());
    assert!(SessionRepo::redeem(&pool, "stale").await.unwrap().is_none());
    assert_eq!(SessionRepo::count_active(&pool, u.id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Playlists and tracks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn playlist_counts_match_persisted_tracks(pool: PgPool) {
    let u = user(&pool, "erin").await;
    let created = playlist_for(&pool, u.id, &["a", "b", "c", "d", "e", "f"]).await;

    assert_eq!(created.playlist.total_tracks_generated, 6);
    assert_eq!(created.playlist.llm_fallback_count, 1);
    let stored = TrackRepo::list_for_playlist(&pool, created.playlist.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 6);
    let order: Vec<i32> = stored.iter().map(|t| t.position).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_mood_entry_cascades(pool: PgPool) {
    let u = user(&pool, "frank").await;
    let created = playlist_for(&pool, u.id, &["a", "b"]).await;

    assert!(MoodEntryRepo::delete(&pool, created.playlist.mood_entry_id)
        .await
        .unwrap());
    assert!(PlaylistRepo::find_owned(&pool, created.playlist.id, u.id)
        .await
        .unwrap()
        .is_none());
    assert!(TrackRepo::list_for_playlist(&pool, created.playlist.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn ownership_is_enforced(pool: PgPool) {
    let owner = user(&pool, "gina").await;
    let stranger = user(&pool, "hank").await;
    let created = playlist_for(&pool, owner.id, &["a"]).await;

    assert!(PlaylistRepo::find_owned(&pool, created.playlist.id, stranger.id)
        .await
        .unwrap()
        .is_none());
    let history = PlaylistRepo::list_for_user_with_tracks(&pool, stranger.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn append_uses_next_position(pool: PgPool) {
    let u = user(&pool, "ivy").await;
    let created = playlist_for(&pool, u.id, &["a", "b"]).await;

    let added = TrackRepo::append(&pool, created.playlist.id, &track("c"))
        .await
        .unwrap();
    assert_eq!(added.position, 2);

    let empty = playlist_for(&pool, u.id, &[]).await;
    let first = TrackRepo::append(&pool, empty.playlist.id, &track("solo"))
        .await
        .unwrap();
    assert_eq!(first.position, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn reorder_assigns_index_positions(pool: PgPool) {
    let u = user(&pool, "jack").await;
    let created = playlist_for(&pool, u.id, &["a", "b", "c"]).await;
    let ids: Vec<i64> = created.tracks.iter().map(|t| t.id).collect();
    let new_order = vec![ids[2], ids[0], ids[1]];

    assert!(TrackRepo::reorder(&pool, created.playlist.id, &new_order)
        .await
        .unwrap());

    let stored = TrackRepo::list_for_playlist(&pool, created.playlist.id)
        .await
        .unwrap();
    let listed: Vec<i64> = stored.iter().map(|t| t.id).collect();
    assert_eq!(listed, new_order);
}

#[sqlx::test(migrations = "./migrations")]
async fn reorder_with_foreign_id_changes_nothing(pool: PgPool) {
    let u = user(&pool, "kate").await;
    let mine = playlist_for(&pool, u.id, &["a", "b", "c"]).await;
    let other = playlist_for(&pool, u.id, &["x"]).await;
    let before = positions(&pool, mine.playlist.id).await;

    let ids: Vec<i64> = mine.tracks.iter().map(|t| t.id).collect();
    let bad = vec![ids[2], ids[1], other.tracks[0].id];
    assert!(!TrackRepo::reorder(&pool, mine.playlist.id, &bad)
        .await
        .unwrap());

    assert_eq!(positions(&pool, mine.playlist.id).await, before);
}

#[sqlx::test(migrations = "./migrations")]
async fn mood_history_groups_playlists(pool: PgPool) {
    let u = user(&pool, "liam").await;
    let first = playlist_for(&pool, u.id, &["a"]).await;
    let second = playlist_for(&pool, u.id, &["b", "c"]).await;

    let history = MoodEntryRepo::list_for_user_with_playlists(&pool, u.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].entry.id, second.playlist.mood_entry_id);
    assert_eq!(history[0].playlists[0].tracks.len(), 2);
    assert_eq!(history[1].entry.id, first.playlist.mood_entry_id);
}

// ---------------------------------------------------------------------------
// Specialized playlists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn specialized_seed_is_idempotent(pool: PgPool) {
    let input = CreateSpecializedPlaylist {
        name: "Party Starter".to_string(),
        description: "Anthems".to_string(),
        keywords: "party, dance".to_string(),
        target_song_count: 15,
    };
    let (first, created) = SpecializedPlaylistRepo::get_or_create(&pool, &input)
        .await
        .unwrap();
    assert!(created);
    let today = Utc::now().date_naive();
    assert!(first.needs_refresh(today));

    let cached = vec![CachedTrack {
        id: 0,
        title: "Song".to_string(),
        artist: "Band".to_string(),
        duration: Some("3:30".to_string()),
        spotify_track_id: None,
    }];
    SpecializedPlaylistRepo::update_cache(&pool, first.id, &cached, today)
        .await
        .unwrap();

    let (again, created) = SpecializedPlaylistRepo::get_or_create(&pool, &input)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(again.id, first.id);
    assert!(!again.needs_refresh(today));
    assert_eq!(again.cached_tracks.unwrap().0, cached);
}
