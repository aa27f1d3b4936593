//! Password-reset link material.
//!
//! A reset link carries the user id encoded as URL-safe base64 (`uidb64`)
//! and a random single-use token. Only the token's SHA-256 is stored.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use moodtunes_core::types::DbId;

use crate::auth::jwt::{sha256_hex, OpaqueToken};

/// Encode a user id for a reset link.
pub fn encode_uid(user_id: DbId) -> String {
    URL_SAFE_NO_PAD.encode(user_id.to_string())
}

/// Decode a `uidb64` value. Padding is tolerated.
pub fn decode_uid(uidb64: &str) -> Option<DbId> {
    let bytes = URL_SAFE_NO_PAD
        .decode(uidb64.trim().trim_end_matches('='))
        .ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// A new single-use reset token (32 hex chars).
pub fn generate_reset_token() -> OpaqueToken {
    OpaqueToken::from_plaintext(uuid::Uuid::new_v4().simple().to_string())
}

pub fn hash_reset_token(token: &str) -> String {
    sha256_hex(token.trim())
}

/// `{frontend_url}/reset-password/{uidb64}/{token}`.
pub fn reset_link(frontend_url: &str, user_id: DbId, token: &str) -> String {
    format!(
        "{}/reset-password/{}/{}",
        frontend_url.trim_end_matches('/'),
        encode_uid(user_id),
        token
    )
}
