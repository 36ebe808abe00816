use std::collections::HashMap;
use std::time::{Duration, Instant};

use actix_web::cookie::{Cookie, SameSite, time};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::utils::error::CustomError;

/// Opaque session id carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        SessionToken(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        SessionToken(value)
    }
}

/// Server-side session storage. A session maps a token to the hex id of the
/// logged-in user and nothing else. Expiry belongs to the store: once the
/// TTL passes, `validate_session` must behave as if the token never existed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn store_session(
        &self,
        token: &SessionToken,
        user_id: &str,
        expiry_seconds: u64,
    ) -> Result<(), CustomError>;

    async fn validate_session(&self, token: &SessionToken) -> Result<Option<String>, CustomError>;

    /// Removing an unknown token is not an error.
    async fn invalidate_session(&self, token: &SessionToken) -> Result<(), CustomError>;
}

/// In-process session store, used when Redis is unreachable.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, (String, Instant)>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn store_session(
        &self,
        token: &SessionToken,
        user_id: &str,
        expiry_seconds: u64,
    ) -> Result<(), CustomError> {
        let expires_at = Instant::now() + Duration::from_secs(expiry_seconds);
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, at)| *at > Instant::now());
        sessions.insert(token.clone(), (user_id.to_string(), expires_at));
        Ok(())
    }

    async fn validate_session(&self, token: &SessionToken) -> Result<Option<String>, CustomError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(user_id, _)| user_id.clone()))
    }

    async fn invalidate_session(&self, token: &SessionToken) -> Result<(), CustomError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

/// Cookie and lifetime settings shared by login, logout and the guard.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_secs: u64,
    pub secure: bool,
}

impl From<&AppConfig> for SessionSettings {
    fn from(config: &AppConfig) -> Self {
        SessionSettings {
            cookie_name: config.session_cookie.clone(),
            ttl_secs: config.session_ttl_secs,
            secure: config.cookie_secure,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings::from(&AppConfig::default())
    }
}

impl SessionSettings {
    pub fn cookie(&self, token: &SessionToken) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token.as_str().to_string())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(
                i64::try_from(self.ttl_secs).unwrap_or(i64::MAX),
            ))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .finish();
        cookie.make_removal();
        cookie
    }
}
