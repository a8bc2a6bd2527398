//! Foursquare OAuth2 client.
//!
//! The authorization URL is built with the `oauth2` crate. The code exchange
//! is a plain form post because Foursquare answers with a bare
//! `{"access_token": ".."}` body that lacks the `token_type` member the
//! standard token response requires.

use std::sync::Arc;

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{AccessToken, AuthUrl, ClientId, CsrfToken, EndpointNotSet, EndpointSet, RedirectUrl, Scope};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AuthError;
use crate::models::SettingsProvider;
use crate::models::oauth::AuthorizationRequest;

pub const AUTHORIZE_URL: &str = "https://foursquare.com/oauth2/authenticate";
pub const TOKEN_URL: &str = "https://foursquare.com/oauth2/access_token";
pub const API_BASE_URL: &str = "https://api.foursquare.com/v2";
/// Foursquare v2 requires every API request to carry a version date.
pub const API_VERSION: &str = "20231010";

type AuthorizeClient = BasicClient<
    EndpointSet,    // HasAuthUrl
    EndpointNotSet, // HasDeviceAuthUrl
    EndpointNotSet, // HasIntrospectionUrl
    EndpointNotSet, // HasRevocationUrl
    EndpointNotSet, // HasTokenUrl
>;

/// Operations the login flow needs from the identity provider.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Builds the URL the browser is sent to, with a fresh random state.
    fn authorization_request(&self, scopes: &[String]) -> AuthorizationRequest;

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError>;

    /// Returns the raw provider user object.
    async fn fetch_profile(&self, access_token: &AccessToken) -> Result<Value, AuthError>;

    async fn fetch_extra_api_call(
        &self,
        access_token: &AccessToken,
        call: &str,
    ) -> Result<Value, AuthError>;
}

/// Hands out configured provider clients.
pub trait ProviderFactory: Send + Sync {
    fn create_client(&self) -> Result<Arc<dyn ProviderClient>, AuthError>;
}

#[derive(Debug, Clone)]
pub struct FoursquareEndpoints {
    pub authorize: String,
    pub token: String,
    pub api_base: String,
}

impl Default for FoursquareEndpoints {
    fn default() -> Self {
        Self {
            authorize: AUTHORIZE_URL.to_string(),
            token: TOKEN_URL.to_string(),
            api_base: API_BASE_URL.to_string(),
        }
    }
}

/// Builds [`FoursquareClient`]s from the current settings.
pub struct FoursquareNetwork {
    settings: Arc<dyn SettingsProvider>,
    endpoints: FoursquareEndpoints,
    http_client: reqwest::Client,
}

impl FoursquareNetwork {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::with_endpoints(settings, FoursquareEndpoints::default())
    }

    pub fn with_endpoints(settings: Arc<dyn SettingsProvider>, endpoints: FoursquareEndpoints) -> Self {
        Self {
            settings,
            endpoints,
            http_client: reqwest::Client::new(),
        }
    }
}

impl ProviderFactory for FoursquareNetwork {
    fn create_client(&self) -> Result<Arc<dyn ProviderClient>, AuthError> {
        let client = FoursquareClient::new(
            self.settings.client_id(),
            self.settings.client_secret(),
            self.settings.redirect_url(),
            self.endpoints.clone(),
            self.http_client.clone(),
        )?;
        Ok(Arc::new(client))
    }
}

pub struct FoursquareClient {
    oauth_client: AuthorizeClient,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    endpoints: FoursquareEndpoints,
    http_client: reqwest::Client,
}

impl FoursquareClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        redirect_url: String,
        endpoints: FoursquareEndpoints,
        http_client: reqwest::Client,
    ) -> Result<Self, AuthError> {
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "Define the client id and client secret for Foursquare".to_string(),
            ));
        }

        let oauth_client = BasicClient::new(ClientId::new(client_id.clone()))
            .set_auth_uri(
                AuthUrl::new(endpoints.authorize.clone())
                    .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {e}")))?,
            )
            .set_redirect_uri(
                RedirectUrl::new(redirect_url.clone())
                    .map_err(|e| AuthError::Configuration(format!("Invalid redirect URL: {e}")))?,
            );

        Ok(Self {
            oauth_client,
            client_id,
            client_secret,
            redirect_url,
            endpoints,
            http_client,
        })
    }

    fn api_url(&self, call: &str) -> String {
        if call.starts_with("http://") || call.starts_with("https://") {
            call.to_string()
        } else {
            format!(
                "{}/{}",
                self.endpoints.api_base.trim_end_matches('/'),
                call.trim_start_matches('/')
            )
        }
    }

    async fn api_get(&self, url: &str, access_token: &AccessToken) -> Result<Value, String> {
        let response = self
            .http_client
            .get(url)
            .query(&[("oauth_token", access_token.secret().as_str()), ("v", API_VERSION)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(format!("HTTP {status}: {error_text}"));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| format!("Failed to parse JSON: {e}"))
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Meta {
    code: u16,
    #[serde(rename = "errorDetail")]
    error_detail: Option<String>,
}

#[derive(Deserialize)]
struct ApiEnvelope {
    meta: Option<Meta>,
    response: Option<Value>,
}

#[async_trait]
impl ProviderClient for FoursquareClient {
    fn authorization_request(&self, scopes: &[String]) -> AuthorizationRequest {
        let (url, state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes.iter().cloned().map(Scope::new))
            .url();

        AuthorizationRequest {
            url,
            state,
            redirect_uri: self.redirect_url.clone(),
            scopes: scopes.to_vec(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessToken, AuthError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_url.as_str()),
            ("code", code),
        ];

        let response = self
            .http_client
            .post(&self.endpoints.token)
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(AuthError::TokenExchange(format!("HTTP {status}: {error_text}")));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("Failed to parse token response: {e}")))?;

        match (token.access_token, token.error) {
            (_, Some(error)) => Err(AuthError::TokenExchange(format!("Provider error: {error}"))),
            (Some(access_token), None) if !access_token.is_empty() => Ok(AccessToken::new(access_token)),
            _ => Err(AuthError::TokenExchange(
                "Token response carried no access_token".to_string(),
            )),
        }
    }

    async fn fetch_profile(&self, access_token: &AccessToken) -> Result<Value, AuthError> {
        let url = self.api_url("users/self");
        let body = self
            .api_get(&url, access_token)
            .await
            .map_err(AuthError::ProfileFetch)?;

        let envelope: ApiEnvelope = serde_json::from_value(body)
            .map_err(|e| AuthError::ProfileFetch(format!("Unexpected response shape: {e}")))?;

        if let Some(meta) = envelope.meta {
            if meta.code != 200 {
                return Err(AuthError::ProfileFetch(format!(
                    "meta.code {}: {}",
                    meta.code,
                    meta.error_detail.unwrap_or_default()
                )));
            }
        }

        envelope
            .response
            .and_then(|mut response| response.get_mut("user").map(Value::take))
            .filter(|user| user.is_object())
            .ok_or_else(|| AuthError::ProfileFetch("Response carried no user".to_string()))
    }

    async fn fetch_extra_api_call(
        &self,
        access_token: &AccessToken,
        call: &str,
    ) -> Result<Value, AuthError> {
        let url = self.api_url(call);
        let value = self
            .api_get(&url, access_token)
            .await
            .map_err(|reason| AuthError::ExtraApiCall {
                call: call.to_string(),
                reason,
            })?;
        debug!("Extra API call {} succeeded", call);
        Ok(value)
    }
}
