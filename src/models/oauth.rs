use oauth2::CsrfToken;
use serde::Deserialize;

/// Session key holding the anti-forgery token of the pending login.
pub const OAUTH_STATE_KEY: &str = "oauth_state";
/// Session key holding the Foursquare access token of the current login.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Session key holding the post-login destination.
pub const DESTINATION_KEY: &str = "destination";

/// Keys wiped whenever an authentication attempt fails.
pub const SESSION_KEYS_TO_NULLIFY: [&str; 2] = [ACCESS_TOKEN_KEY, OAUTH_STATE_KEY];

#[derive(Debug)]
pub struct AuthorizationRequest {
    pub url: oauth2::url::Url,
    pub state: CsrfToken,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub destination: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
