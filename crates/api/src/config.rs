use crate::auth::jwt::JwtConfig;

/// Default GeoLite2 country database location.
const DEFAULT_GEOIP_DB_PATH: &str = "/usr/share/GeoIP/GeoLite2-Country.mmdb";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret, which must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Base URL of the web client; password reset links point here.
    pub frontend_url: String,
    pub password_reset_expiry_mins: i64,
    pub geoip_db_path: String,
    /// Seed and refresh specialized playlists in the background on startup.
    pub run_startup_refresh: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                   |
    /// |------------------------------|-------------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                                 |
    /// | `PORT`                       | `8000`                                    |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`                   |
    /// | `REQUEST_TIMEOUT_SECS`       | `60`                                      |
    /// | `FRONTEND_URL`               | `http://localhost:5173`                   |
    /// | `PASSWORD_RESET_EXPIRY_MINS` | `60`                                      |
    /// | `GEOIP_DB_PATH`              | `/usr/share/GeoIP/GeoLite2-Country.mmdb`  |
    /// | `RUN_STARTUP_REFRESH`        | `true`                                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let password_reset_expiry_mins: i64 = std::env::var("PASSWORD_RESET_EXPIRY_MINS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("PASSWORD_RESET_EXPIRY_MINS must be a valid i64");

        let geoip_db_path =
            std::env::var("GEOIP_DB_PATH").unwrap_or_else(|_| DEFAULT_GEOIP_DB_PATH.into());

        let run_startup_refresh = std::env::var("RUN_STARTUP_REFRESH")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            frontend_url,
            password_reset_expiry_mins,
            geoip_db_path,
            run_startup_refresh,
        }
    }
}
