//! Market code resolution: genre keywords first, then offline IP geolocation.

use std::net::IpAddr;
use std::path::Path;

use maxminddb::{geoip2, Reader};
use moodtunes_core::market::{is_market_code, market_from_genre};

/// Resolves the catalog market for a request.
///
/// The geo database is opened once; when it is missing the resolver keeps
/// working on genre keywords alone. Resolution never fails, it only
/// returns `None` for "no market restriction".
pub struct MarketResolver {
    geo: Option<Reader<Vec<u8>>>,
}

impl MarketResolver {
    /// Open the MaxMind country database at `path`, disabling geolocation
    /// if it cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Reader::open_readfile(path) {
            Ok(reader) => {
                tracing::info!(path = %path.display(), "GeoIP database loaded");
                Self { geo: Some(reader) }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "GeoIP database unavailable; IP market lookup disabled");
                Self { geo: None }
            }
        }
    }

    /// Genre keywords only.
    pub fn without_geo() -> Self {
        Self { geo: None }
    }

    pub fn has_geo(&self) -> bool {
        self.geo.is_some()
    }

    pub fn resolve(&self, favorite_genre: Option<&str>, client_ip: Option<IpAddr>) -> Option<String> {
        if let Some(market) = favorite_genre.and_then(market_from_genre) {
            tracing::debug!(market, "Market derived from genre");
            return Some(market.to_string());
        }
        client_ip.and_then(|ip| self.country_for_ip(ip))
    }

    fn country_for_ip(&self, ip: IpAddr) -> Option<String> {
        let reader = self.geo.as_ref()?;
        match reader.lookup::<geoip2::Country>(ip) {
            Ok(record) => record
                .country
                .and_then(|c| c.iso_code)
                .filter(|code| is_market_code(code))
                .map(str::to_string),
            Err(e) => {
                tracing::debug!(%ip, error = %e, "IP not resolvable to a market");
                None
            }
        }
    }
}
