//! Request bounds for playlist generation and track feedback.

use crate::error::CoreError;

/// Fewest tracks a generated playlist may request.
pub const MIN_SONG_COUNT: i64 = 5;
/// Most tracks a generated playlist may request.
pub const MAX_SONG_COUNT: i64 = 15;
/// Song count used when the request omits one.
pub const DEFAULT_SONG_COUNT: i64 = 7;

pub const MIN_ENERGY_LEVEL: i32 = 1;
pub const MAX_ENERGY_LEVEL: i32 = 10;
pub const DEFAULT_ENERGY_LEVEL: i32 = 5;

pub const DEFAULT_FAVORITE_GENRE: &str = "Pop";

/// Clamp a requested song count into `[MIN_SONG_COUNT, MAX_SONG_COUNT]`.
pub fn clamp_song_count(requested: Option<i64>) -> u32 {
    requested
        .unwrap_or(DEFAULT_SONG_COUNT)
        .clamp(MIN_SONG_COUNT, MAX_SONG_COUNT) as u32
}

/// Validate an energy level, defaulting when absent.
pub fn validate_energy_level(energy: Option<i32>) -> Result<i32, CoreError> {
    let energy = energy.unwrap_or(DEFAULT_ENERGY_LEVEL);
    if !(MIN_ENERGY_LEVEL..=MAX_ENERGY_LEVEL).contains(&energy) {
        return Err(CoreError::field(
            "energy_level",
            format!("Energy level must be between {MIN_ENERGY_LEVEL} and {MAX_ENERGY_LEVEL}."),
        ));
    }
    Ok(energy)
}

/// Parse a 1-5 star rating from a loosely typed JSON value.
///
/// Accepts integers and integer strings (`4`, `"4"`). Missing ratings and
/// anything outside the range are rejected with a field error.
pub fn parse_rating(raw: Option<&serde_json::Value>) -> Result<i32, CoreError> {
    let value = match raw {
        None | Some(serde_json::Value::Null) => {
            return Err(CoreError::field("rating", "Rating is required."));
        }
        Some(v) => v,
    };

    let parsed = match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(r) if (1..=5).contains(&r) => Ok(r as i32),
        Some(_) => Err(CoreError::field("rating", "Rating must be between 1 and 5.")),
        None => Err(CoreError::field("rating", "Rating must be an integer.")),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn song_count_is_clamped() {
        assert_eq!(clamp_song_count(None), 7);
        assert_eq!(clamp_song_count(Some(1)), 5);
        assert_eq!(clamp_song_count(Some(6)), 6);
        assert_eq!(clamp_song_count(Some(99)), 15);
        assert_eq!(clamp_song_count(Some(-3)), 5);
    }

    #[test]
    fn energy_level_bounds() {
        assert_eq!(validate_energy_level(None).unwrap(), 5);
        assert_eq!(validate_energy_level(Some(1)).unwrap(), 1);
        assert_eq!(validate_energy_level(Some(10)).unwrap(), 10);
        assert_matches!(validate_energy_level(Some(0)), Err(CoreError::InvalidFields(_)));
        assert_matches!(validate_energy_level(Some(11)), Err(CoreError::InvalidFields(_)));
    }

    #[test]
    fn rating_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_rating(Some(&json!(3))).unwrap(), 3);
        assert_eq!(parse_rating(Some(&json!("5"))).unwrap(), 5);
    }

    #[test]
    fn rating_rejects_missing_out_of_range_and_garbage() {
        assert_matches!(parse_rating(None), Err(CoreError::InvalidFields(f)) if f.contains_key("rating"));
        assert_matches!(parse_rating(Some(&json!(null))), Err(CoreError::InvalidFields(_)));
        assert_matches!(parse_rating(Some(&json!(0))), Err(CoreError::InvalidFields(_)));
        assert_matches!(parse_rating(Some(&json!(6))), Err(CoreError::InvalidFields(_)));
        assert_matches!(parse_rating(Some(&json!("great"))), Err(CoreError::InvalidFields(_)));
        assert_matches!(parse_rating(Some(&json!(4.5))), Err(CoreError::InvalidFields(_)));
    }
}
