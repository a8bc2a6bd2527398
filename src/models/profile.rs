use oauth2::AccessToken;
use serde::Serialize;
use serde_json::Value;

/// Foursquare user, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfile {
    pub provider_user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Results of the configured extra API calls, in configuration order.
/// Failed calls are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtraProfileData(pub Vec<Value>);

impl ExtraProfileData {
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON array encoding handed to the user manager.
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Everything the user manager needs to log in or register a Foursquare user.
#[derive(Debug, Clone)]
pub struct SocialLogin {
    pub name: String,
    pub email: Option<String>,
    pub provider_user_id: String,
    pub access_token: AccessToken,
    pub avatar_url: Option<String>,
    pub extra_data: ExtraProfileData,
    pub destination: Option<String>,
}
