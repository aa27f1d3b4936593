//! Argon2id password hashing, verification, and composition rules.
//!
//! Hashes use Argon2id with a random salt from [`OsRng`], stored in PHC
//! string format.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use regex::Regex;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("valid regex"));
static LOWERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").expect("valid regex"));
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check a new password against the composition rules.
///
/// Returns every violated rule's message; empty means the password is
/// acceptable.
pub fn validate_password_rules(password: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
    if !UPPERCASE_RE.is_match(password) {
        problems.push("Password must contain at least one uppercase letter.".to_string());
    }
    if !LOWERCASE_RE.is_match(password) {
        problems.push("Password must contain at least one lowercase letter.".to_string());
    }
    if !DIGIT_RE.is_match(password) {
        problems.push("Password must contain at least one number.".to_string());
    }
    if !SPECIAL_RE.is_match(password) {
        problems.push(
            "Password must contain at least one special character (!@#$%^&*(),.?\":{}|<>)."
                .to_string(),
        );
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "Correct-Horse-9";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("Real-Password-1").expect("hashing should succeed");
        assert!(!verify_password("Wrong-Password-1", &hash).expect("verify should succeed"));
    }

    #[test]
    fn strong_password_passes() {
        assert!(validate_password_rules("Sunny-Day-42").is_empty());
        assert!(validate_password_rules("Ab1!efgh").is_empty());
    }

    #[test]
    fn each_missing_class_is_reported() {
        let problems = validate_password_rules("alllowercase");
        assert_eq!(
            problems,
            vec![
                "Password must contain at least one uppercase letter.".to_string(),
                "Password must contain at least one number.".to_string(),
                "Password must contain at least one special character (!@#$%^&*(),.?\":{}|<>)."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn short_password_reports_length() {
        let problems = validate_password_rules("Ab1!");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("at least 8 characters"));
    }

    #[test]
    fn underscore_is_not_a_special_character() {
        let problems = validate_password_rules("Under_score1");
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("special character"));
    }
}
