//! Access and refresh tokens.
//!
//! Access tokens are HS256 JWTs carrying the user id and username. Refresh
//! tokens are opaque; the session table keeps only their SHA-256.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use moodtunes_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: DbId,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or an expiry is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 60),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access-token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    pub fn refresh_expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.refresh_token_expiry_days)
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be an integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Sign an access token for `user_id`.
pub fn issue_access_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat,
        exp: iat + config.access_ttl_secs(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// An opaque token handed to the client, with the digest that is stored.
#[derive(Debug, Clone)]
pub struct OpaqueToken {
    pub plaintext: String,
    pub hash: String,
}

impl OpaqueToken {
    pub fn from_plaintext(plaintext: String) -> Self {
        let hash = sha256_hex(&plaintext);
        Self { plaintext, hash }
    }

    /// A fresh refresh token.
    pub fn refresh() -> Self {
        Self::from_plaintext(Uuid::new_v4().to_string())
    }
}

pub fn sha256_hex(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "moodtunes-test-secret-0123456789abcdef".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_carries_user() {
        let cfg = config();
        let token = issue_access_token(42, "listener", &cfg).unwrap();
        let claims = decode_access_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "listener");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = config();
        // Past the default 60 s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "late".into(),
            iat: now - 900,
            exp: now - 300,
            jti: "x".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .unwrap();

        assert!(decode_access_token(&token, &cfg).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = issue_access_token(1, "a", &config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".into(),
            ..config()
        };
        assert!(decode_access_token(&token, &other).is_err());
    }

    #[test]
    fn opaque_token_hash_is_sha256_of_plaintext() {
        let token = OpaqueToken::refresh();
        assert_eq!(token.hash, sha256_hex(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert_ne!(OpaqueToken::refresh().plaintext, token.plaintext);
    }

    #[test]
    fn refresh_expiry_counts_days() {
        let now = Utc::now();
        assert_eq!(config().refresh_expires_at(now) - now, Duration::days(7));
        assert_eq!(config().access_ttl_secs(), 900);
    }
}
