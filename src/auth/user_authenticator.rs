use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::info;

use crate::models::profile::SocialLogin;

/// Local account side of the login: linking, registration and session login.
#[async_trait]
pub trait UserAuthenticator: Send + Sync {
    async fn check_provider_is_associated(&self, provider_user_id: &str) -> bool;

    /// Logs the user in (registering first if needed) and returns the response
    /// to send back to the browser.
    async fn authenticate_user(&self, login: SocialLogin) -> Response;
}

#[derive(Debug, Clone)]
pub struct LocalUser {
    pub uid: u64,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub additional_data: String,
}

#[derive(Default)]
struct Accounts {
    next_uid: u64,
    by_provider_id: HashMap<String, LocalUser>,
}

/// Process-local user manager used by the bundled server.
#[derive(Default)]
pub struct InMemoryUserManager {
    accounts: RwLock<Accounts>,
}

impl InMemoryUserManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, provider_user_id: &str) -> Option<LocalUser> {
        self.accounts
            .read()
            .ok()
            .and_then(|accounts| accounts.by_provider_id.get(provider_user_id).cloned())
    }
}

#[async_trait]
impl UserAuthenticator for InMemoryUserManager {
    async fn check_provider_is_associated(&self, provider_user_id: &str) -> bool {
        self.user(provider_user_id).is_some()
    }

    async fn authenticate_user(&self, login: SocialLogin) -> Response {
        let Ok(mut accounts) = self.accounts.write() else {
            return Redirect::to("/user/login").into_response();
        };

        let existing_uid = accounts
            .by_provider_id
            .get(&login.provider_user_id)
            .map(|user| user.uid);

        let uid = match existing_uid {
            Some(uid) => uid,
            None => {
                accounts.next_uid += 1;
                let user = LocalUser {
                    uid: accounts.next_uid,
                    name: login.name.clone(),
                    email: login.email.clone(),
                    avatar_url: login.avatar_url.clone(),
                    additional_data: login.extra_data.encode(),
                };
                info!("Registered new user {} for Foursquare id {}", user.uid, login.provider_user_id);
                accounts.by_provider_id.insert(login.provider_user_id.clone(), user.clone());
                user.uid
            }
        };

        info!("Foursquare user {} logged in as uid {}", login.provider_user_id, uid);
        let target = login.destination.unwrap_or_else(|| format!("/user/{uid}"));
        Redirect::to(&target).into_response()
    }
}
