//! HTTP-level integration tests for registration, tokens, account and
//! password reset.
//!
//! Each test gets a fresh database from `DATABASE_URL` via `sqlx::test`.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{body_json, get, post_json, register_and_login, send, TEST_PASSWORD};
use moodtunes_api::auth::reset::{encode_uid, hash_reset_token};
use moodtunes_db::models::password_reset::CreatePasswordResetToken;
use moodtunes_db::repositories::{PasswordResetRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_reports_every_password_rule(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        json!({ "username": "weak", "email": "not-an-email", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["email"].is_array());
    // Too short, no uppercase, no digit, no special character.
    assert_eq!(json["fields"]["password"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "dup").await;

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        None,
        json!({ "username": "dup", "email": "other@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "sam").await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "username": "sam", "password": "Wrong-Pass-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "rotator").await;

    let login = body_json(
        post_json(
            &app,
            "/api/v1/auth/login",
            None,
            json!({ "username": "rotator", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let first = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let reused = post_json(
        &app,
        "/api/v1/auth/refresh",
        None,
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_need_a_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/account/profile", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/v1/account/profile", Some("garbage")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn profile_update_and_read(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "profiled").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/v1/account/profile",
        Some(&token),
        Some(json!({ "email": "new@example.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(&app, "/api/v1/account/profile", Some(&token)).await).await;
    assert_eq!(json["data"]["username"], "profiled");
    assert_eq!(json["data"]["email"], "new@example.com");
    assert!(json["data"]["favorite_genre"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn change_password_checks_old_and_confirmation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "changer").await;

    let response = post_json(
        &app,
        "/api/v1/account/change-password",
        Some(&token),
        json!({
            "old_password": "Not-The-Old-1",
            "new_password1": "Brand-New-42",
            "new_password2": "Brand-New-42",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["old_password"][0],
        "Your old password was entered incorrectly. Please enter it again."
    );

    let response = post_json(
        &app,
        "/api/v1/account/change-password",
        Some(&token),
        json!({
            "old_password": TEST_PASSWORD,
            "new_password1": "Brand-New-42",
            "new_password2": "Brand-New-43",
        }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["new_password2"][0],
        "The two password fields didn't match."
    );

    let response = post_json(
        &app,
        "/api/v1/account/change-password",
        Some(&token),
        json!({
            "old_password": TEST_PASSWORD,
            "new_password1": "Brand-New-42",
            "new_password2": "Brand-New-42",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Password updated successfully");
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_request_does_not_reveal_accounts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "known").await;

    for email in ["known@example.com", "nobody@example.com"] {
        let response = post_json(
            &app,
            "/api/v1/auth/password-reset",
            None,
            json!({ "email": email }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Password reset email has been sent if an account with this email exists."
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_confirm_sets_new_password_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    register_and_login(&app, "forgetful").await;
    let user = UserRepo::find_by_username(&pool, "forgetful")
        .await
        .unwrap()
        .unwrap();

    PasswordResetRepo::create(
        &pool,
        &CreatePasswordResetToken {
            user_id: user.id,
            token_hash: hash_reset_token("known-token"),
            expires_at: Utc::now() + Duration::minutes(30),
        },
    )
    .await
    .unwrap();

    let confirm = json!({
        "uidb64": encode_uid(user.id),
        "token": "known-token",
        "new_password1": "Fresh-Start-7",
        "new_password2": "Fresh-Start-7",
    });

    let response = post_json(&app, "/api/v1/auth/password-reset/confirm", None, confirm.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "username": "forgetful", "password": "Fresh-Start-7" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Tokens are single-use.
    let response = post_json(&app, "/api/v1/auth/password-reset/confirm", None, confirm).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["fields"]["token"][0],
        "Invalid or expired token."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_confirm_rejects_unknown_uid(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/password-reset/confirm",
        None,
        json!({
            "uidb64": encode_uid(999_999),
            "token": "whatever",
            "new_password1": "Fresh-Start-7",
            "new_password2": "Fresh-Start-7",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["fields"]["uidb64"][0], "Invalid user ID.");
}
