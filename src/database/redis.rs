use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use crate::session::{SessionStore, SessionToken};
use crate::utils::error::CustomError;

/// Redis connection wrapper
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    pub async fn init(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;

        log::info!("Connected successfully to Redis");

        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }
}

/// Session storage on Redis. Each session is a single `session:{token}` key
/// holding the user id, written with `SETEX` so Redis drops it on expiry.
#[derive(Clone)]
pub struct RedisService {
    connection: MultiplexedConnection,
}

impl RedisService {
    pub fn new(client: &RedisClient) -> Self {
        Self {
            connection: client.get_connection(),
        }
    }
}

fn session_key(token: &SessionToken) -> String {
    format!("session:{}", token.as_str())
}

#[async_trait]
impl SessionStore for RedisService {
    async fn store_session(
        &self,
        token: &SessionToken,
        user_id: &str,
        expiry_seconds: u64,
    ) -> Result<(), CustomError> {
        let mut conn = self.connection.clone();

        conn.set_ex::<_, _, ()>(session_key(token), user_id, expiry_seconds)
            .await
            .map_err(|e| CustomError::internal("Failed to store session", e))
    }

    async fn validate_session(&self, token: &SessionToken) -> Result<Option<String>, CustomError> {
        let mut conn = self.connection.clone();

        conn.get(session_key(token))
            .await
            .map_err(|e| CustomError::internal("Failed to validate session", e))
    }

    async fn invalidate_session(&self, token: &SessionToken) -> Result<(), CustomError> {
        let mut conn = self.connection.clone();

        conn.del::<_, ()>(session_key(token))
            .await
            .map_err(|e| CustomError::internal("Failed to delete session", e))
    }
}

pub async fn connect_to_redis(redis_url: &str) -> Result<RedisClient, redis::RedisError> {
    RedisClient::init(redis_url).await
}
