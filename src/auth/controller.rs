//! Two-phase Foursquare login: redirect to the provider, then handle its callback.

use std::sync::Arc;

use axum::response::{IntoResponse, Redirect, Response};
use oauth2::AccessToken;
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use super::profile_mapper::map_profile;
use super::provider::{ProviderClient, ProviderFactory};
use super::state_store::StateStore;
use super::user_authenticator::UserAuthenticator;
use crate::error::AuthError;
use crate::messages;
use crate::models::SettingsProvider;
use crate::models::oauth::{
    ACCESS_TOKEN_KEY, CallbackParams, DESTINATION_KEY, OAUTH_STATE_KEY, SESSION_KEYS_TO_NULLIFY,
};
use crate::models::profile::{ExtraProfileData, SocialLogin};

pub const PLUGIN_ID: &str = "social_auth_foursquare";
pub const LOGIN_PATH: &str = "/user/login";

pub struct AuthFlowController {
    network: Arc<dyn ProviderFactory>,
    settings: Arc<dyn SettingsProvider>,
    users: Arc<dyn UserAuthenticator>,
}

impl AuthFlowController {
    pub fn new(
        network: Arc<dyn ProviderFactory>,
        settings: Arc<dyn SettingsProvider>,
        users: Arc<dyn UserAuthenticator>,
    ) -> Self {
        Self {
            network,
            settings,
            users,
        }
    }

    /// Sends the browser to Foursquare. Failures land on the login page.
    pub async fn start(&self, store: &dyn StateStore, destination: Option<&str>) -> Response {
        match self.redirect_to_provider(store, destination).await {
            Ok(redirect) => redirect.into_response(),
            Err(e) => self.fail(store, e).await,
        }
    }

    /// Handles the return trip from Foursquare.
    pub async fn callback(&self, store: &dyn StateStore, params: CallbackParams) -> Response {
        match self.handle_callback(store, params).await {
            Ok(response) => response,
            Err(e) => self.fail(store, e).await,
        }
    }

    async fn redirect_to_provider(
        &self,
        store: &dyn StateStore,
        destination: Option<&str>,
    ) -> Result<Redirect, AuthError> {
        let client = self.network.create_client()?;

        // A destination only lives for the attempt that supplied it.
        match destination.filter(|d| !d.is_empty()) {
            Some(d) if is_local_path(d) => store.set(DESTINATION_KEY, d).await?,
            rejected => {
                if let Some(d) = rejected {
                    warn!("Ignoring non-local login destination {:?}", d);
                }
                store.remove(DESTINATION_KEY).await?;
            }
        }

        let request = client.authorization_request(&self.settings.scopes());
        store.set(OAUTH_STATE_KEY, request.state.secret()).await?;

        info!("{}: redirecting to Foursquare for authorization", PLUGIN_ID);
        Ok(Redirect::to(request.url.as_str()))
    }

    async fn handle_callback(
        &self,
        store: &dyn StateStore,
        params: CallbackParams,
    ) -> Result<Response, AuthError> {
        if let Some(error) = params.error {
            return Err(AuthError::UserDenied(error));
        }

        let client = self.network.create_client()?;

        // Single use: the stored state is gone whether or not it matches.
        let stored_state = store.remove(OAUTH_STATE_KEY).await?;
        match (params.state.as_deref(), stored_state.as_deref()) {
            (Some(received), Some(stored))
                if !received.is_empty() && state_matches(received, stored) => {}
            _ => return Err(AuthError::InvalidState),
        }

        let code = params
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AuthError::TokenExchange("Callback carried no code".to_string()))?;

        let access_token = client.exchange_code(&code).await?;
        store.set(ACCESS_TOKEN_KEY, access_token.secret()).await?;

        let raw_profile = client.fetch_profile(&access_token).await?;
        let profile = map_profile(&raw_profile, self.settings.name_field())?;

        let extra_data = if self
            .users
            .check_provider_is_associated(&profile.provider_user_id)
            .await
        {
            ExtraProfileData::default()
        } else {
            self.collect_extra_data(client.as_ref(), &access_token).await
        };

        let destination = store.remove(DESTINATION_KEY).await?;

        info!(
            "{}: Foursquare user {} authenticated",
            PLUGIN_ID, profile.provider_user_id
        );

        Ok(self
            .users
            .authenticate_user(SocialLogin {
                name: profile.display_name,
                email: profile.email,
                provider_user_id: profile.provider_user_id,
                access_token,
                avatar_url: profile.avatar_url,
                extra_data,
                destination,
            })
            .await)
    }

    async fn collect_extra_data(
        &self,
        client: &dyn ProviderClient,
        access_token: &AccessToken,
    ) -> ExtraProfileData {
        let mut data = ExtraProfileData::default();
        for call in self.settings.api_calls() {
            match client.fetch_extra_api_call(access_token, &call).await {
                Ok(value) => data.push(value),
                Err(e) => warn!("{}: {}", PLUGIN_ID, e),
            }
        }
        data
    }

    async fn fail(&self, store: &dyn StateStore, error: AuthError) -> Response {
        match &error {
            AuthError::UserDenied(_) => info!("{}: {}", PLUGIN_ID, error),
            AuthError::InvalidState => warn!("{}: {}", PLUGIN_ID, error),
            _ => error!("{}: {}", PLUGIN_ID, error),
        }

        if let Err(e) = store.clear_all(&SESSION_KEYS_TO_NULLIFY).await {
            error!("{}: failed to clear session keys: {}", PLUGIN_ID, e);
        }
        if let Err(e) = store.remove(DESTINATION_KEY).await {
            error!("{}: failed to clear destination: {}", PLUGIN_ID, e);
        }
        if let Err(e) = messages::add_error(store, error.user_message()).await {
            error!("{}: failed to queue message: {}", PLUGIN_ID, e);
        }

        Redirect::to(LOGIN_PATH).into_response()
    }
}

fn state_matches(received: &str, stored: &str) -> bool {
    received.as_bytes().ct_eq(stored.as_bytes()).into()
}

fn is_local_path(destination: &str) -> bool {
    destination.starts_with('/') && !destination.starts_with("//") && !destination.contains('\\')
}
