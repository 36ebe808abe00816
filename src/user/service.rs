use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::session::{SessionSettings, SessionStore, SessionToken};
use crate::user::model::User;
use crate::user::repository::UserRepository;
use crate::utils::error::CustomError;
use crate::utils::model::LoginRequests;

/// Why a login attempt was refused. Only ever logged: clients see the same
/// redirect whichever variant occurred.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("no such user")]
    NoSuchUser,

    #[error("bad password")]
    BadPassword,

    #[error(transparent)]
    Store(#[from] CustomError),
}

/// Credential verification plus the session lifecycle around it.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    settings: SessionSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        settings: SessionSettings,
    ) -> Self {
        AuthService {
            users,
            sessions,
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthFailure> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthFailure::NoSuchUser)?;

        // Plaintext comparison. Passwords are not hashed in this system.
        if user.password != password {
            return Err(AuthFailure::BadPassword);
        }

        Ok(user)
    }

    /// Opens a session holding only the user's id.
    pub async fn serialize(&self, user: &User) -> Result<SessionToken, CustomError> {
        let token = SessionToken::generate();
        self.sessions
            .store_session(&token, &user.id.to_hex(), self.settings.ttl_secs)
            .await?;
        Ok(token)
    }

    /// Resolves a session back to the full user record. An unknown or
    /// expired token, a corrupt stored id and a since-removed user all come
    /// back as `None`.
    pub async fn deserialize(&self, token: &SessionToken) -> Result<Option<User>, CustomError> {
        let Some(user_id) = self.sessions.validate_session(token).await? else {
            return Ok(None);
        };

        let Ok(user_id) = ObjectId::parse_str(&user_id) else {
            warn!("Session holds a malformed user id {user_id:?}");
            return Ok(None);
        };

        self.users.find_by_id(&user_id).await
    }

    pub async fn login_fn(&self, login_data: LoginRequests) -> Result<SessionToken, AuthFailure> {
        let user = self
            .authenticate(&login_data.username, &login_data.password)
            .await?;
        let token = self.serialize(&user).await?;

        info!("User {} logged in", user.username);
        Ok(token)
    }

    pub async fn logout(&self, token: &SessionToken) -> Result<(), CustomError> {
        self.sessions.invalidate_session(token).await
    }

    /// Inserts each `(username, password)` pair whose username is not taken
    /// yet. Returns how many users were created.
    pub async fn seed_users(&self, seeds: &[(String, String)]) -> Result<usize, CustomError> {
        let mut created = 0;
        for (username, password) in seeds {
            if self.users.find_by_username(username).await?.is_some() {
                continue;
            }
            self.users.insert(&User::new(username, password)).await?;
            info!("Seeded user {username}");
            created += 1;
        }
        Ok(created)
    }
}
