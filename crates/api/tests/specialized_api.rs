//! Startup refresh followed by the specialized playlist listing.
//!
//! Each test gets a fresh database from `DATABASE_URL` via `sqlx::test`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, register_and_login};
use moodtunes_api::background::specialized_refresh;
use moodtunes_core::templates::SEED_TEMPLATES;
use serde_json::json;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

#[sqlx::test(migrations = "../db/migrations")]
async fn startup_refresh_caches_every_template_before_listing(pool: PgPool) {
    // Two tracks for every template, whatever count it targets.
    let reply = json!({"tracks": [
        {"title": "Weightless", "artist": "Marconi Union", "duration": "8:09", "spotify_track_id": null},
        {"title": "Nuvole Bianche", "artist": "Ludovico Einaudi", "duration": null}
    ]})
    .to_string();
    let llm = common::fixed_llm(&reply);

    specialized_refresh::run(pool.clone(), llm.clone(), CancellationToken::new()).await;

    let app = common::build_test_app_with(pool, llm);
    let token = register_and_login(&app, "curator").await;
    let response = get(&app, "/api/v1/specialized-playlists", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), SEED_TEMPLATES.len());
    for row in rows {
        let tracks = row["cached_tracks"].as_array().unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0]["duration"], "8:09");
        assert!(tracks[1]["duration"].is_null());
        assert!(row["last_refreshed_date"].is_string());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cancelled_startup_refresh_does_nothing(pool: PgPool) {
    let cancel = CancellationToken::new();
    cancel.cancel();

    specialized_refresh::run(pool.clone(), common::unconfigured_llm(), cancel).await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM specialized_playlists")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/specialized-playlists", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
