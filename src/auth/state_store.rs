//! Narrow key/value view of the visitor's session.

use async_trait::async_trait;
use tower_sessions::Session;

use crate::error::AuthError;

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Removes the key and returns what it held.
    async fn remove(&self, key: &str) -> Result<Option<String>, AuthError>;

    async fn clear_all(&self, keys: &[&str]) -> Result<(), AuthError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for Session {
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(Session::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.insert(key, value).await?;
        // Persist before the browser leaves for Foursquare.
        self.save().await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(Session::remove::<String>(self, key).await?)
    }
}

#[cfg(test)]
pub(crate) fn memory_session() -> Session {
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    Session::new(None, Arc::new(MemoryStore::default()), None)
}
