//! Catalog market codes inferred from a user's favorite genre.
//!
//! A market is an ISO 3166-1 alpha-2 code that biases catalog search toward
//! one country's releases. Genre keywords win over IP geolocation, which
//! lives in the catalog crate.

/// Keyword table checked in order; the first keyword contained in the
/// lowercased genre picks the market.
const GENRE_MARKETS: &[(&str, &str)] = &[
    ("k-pop", "KR"),
    ("kpop", "KR"),
    ("korean", "KR"),
    ("j-pop", "JP"),
    ("jpop", "JP"),
    ("japanese", "JP"),
    ("anime", "JP"),
    ("c-pop", "TW"),
    ("mandopop", "TW"),
    ("reggaeton", "MX"),
    ("latin", "MX"),
    ("mexican", "MX"),
    ("spanish", "ES"),
    ("flamenco", "ES"),
    ("french", "FR"),
    ("chanson", "FR"),
    ("german", "DE"),
    ("italian", "IT"),
    ("brazil", "BR"),
    ("bossa", "BR"),
    ("mpb", "BR"),
    ("sertanejo", "BR"),
    ("portuguese", "PT"),
    ("fado", "PT"),
    ("bollywood", "IN"),
    ("hindi", "IN"),
    ("indian", "IN"),
    ("turkish", "TR"),
    ("romanian", "RO"),
    ("manele", "RO"),
    ("afrobeat", "NG"),
    ("nigerian", "NG"),
    ("swedish", "SE"),
    ("greek", "GR"),
];

/// Market implied by a genre string, if any regional keyword appears in it.
pub fn market_from_genre(genre: &str) -> Option<&'static str> {
    let genre = genre.to_lowercase();
    GENRE_MARKETS
        .iter()
        .find(|(keyword, _)| genre.contains(keyword))
        .map(|(_, market)| *market)
}

/// Whether `code` looks like a two-letter uppercase market code.
pub fn is_market_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}
