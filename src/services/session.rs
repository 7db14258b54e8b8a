//! Session service backed by Redis.
//!
//! The only session-scoped state in the system is the home page visit
//! counter, keyed per session identifier. INCR is atomic so concurrent
//! requests from the same session never lose a count.

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionService {
    client: Client,
}

impl SessionService {
    /// Create a new session service and verify the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Increment and return the visit count for a session.
    /// Missing keys start at 0, so the first visit returns 1.
    pub async fn increment_visits(&self, session_id: &str) -> AppResult<i64> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("visits:{}", session_id);
        let count: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to increment visit count: {}", e)))?;

        Ok(count)
    }
}
