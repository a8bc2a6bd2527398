//! Flash messages carried across the redirect to the login page.

use serde::{Deserialize, Serialize};

use crate::auth::StateStore;
use crate::error::AuthError;

pub const MESSAGES_KEY: &str = "messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

pub async fn add(store: &dyn StateStore, level: Level, text: &str) -> Result<(), AuthError> {
    let mut messages = read(store).await?;
    messages.push(Message {
        level,
        text: text.to_string(),
    });
    let encoded = serde_json::to_string(&messages)
        .map_err(|e| AuthError::Session(format!("Failed to encode messages: {e}")))?;
    store.set(MESSAGES_KEY, &encoded).await
}

pub async fn add_error(store: &dyn StateStore, text: &str) -> Result<(), AuthError> {
    add(store, Level::Error, text).await
}

/// Returns and clears all pending messages.
pub async fn drain(store: &dyn StateStore) -> Result<Vec<Message>, AuthError> {
    let messages = read(store).await?;
    store.remove(MESSAGES_KEY).await?;
    Ok(messages)
}

async fn read(store: &dyn StateStore) -> Result<Vec<Message>, AuthError> {
    match store.get(MESSAGES_KEY).await? {
        // A garbled list is dropped rather than blocking the login page.
        Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::state_store::memory_session;

    #[tokio::test]
    async fn messages_accumulate_and_drain() {
        let session = memory_session();
        add_error(&session, "first").await.unwrap();
        add(&session, Level::Status, "second").await.unwrap();

        let messages = drain(&session).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, Level::Error);
        assert_eq!(messages[1].text, "second");

        assert!(drain(&session).await.unwrap().is_empty());
    }
}
