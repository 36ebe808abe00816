use std::env;
use std::str::FromStr;

use log::warn;

/// Runtime settings, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    /// Lifetime of a login, enforced by the session store.
    pub session_ttl_secs: u64,
    pub session_cookie: String,
    pub cookie_secure: bool,
    /// `username:password` pairs inserted at startup when missing.
    pub seed_users: Vec<(String, String)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: "mongodb://127.0.0.1:27017".to_string(),
            database_name: "todoapp".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            session_ttl_secs: 24 * 60 * 60,
            session_cookie: "sid".to_string(),
            cookie_secure: false,
            seed_users: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            mongodb_uri: env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri),
            database_name: env::var("DATABASE_NAME").unwrap_or(defaults.database_name),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port),
            session_ttl_secs: parse_or("SESSION_TTL_SECS", defaults.session_ttl_secs),
            session_cookie: env::var("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            cookie_secure: parse_or("COOKIE_SECURE", defaults.cookie_secure),
            seed_users: env::var("SEED_USERS")
                .map(|raw| parse_seed_users(&raw))
                .unwrap_or_default(),
        }
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparsable {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Parses `alice:pw1,bob:pw2`. Entries without a `:` or with an empty
/// username are skipped.
pub fn parse_seed_users(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once(':') {
            Some((username, password)) if !username.is_empty() => {
                Some((username.to_string(), password.to_string()))
            }
            _ => {
                warn!("Skipping malformed SEED_USERS entry {entry:?}");
                None
            }
        })
        .collect()
}
