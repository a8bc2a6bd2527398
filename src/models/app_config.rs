use std::str::FromStr;
use std::sync::Arc;

use crate::auth::AuthFlowController;
use crate::error::AuthError;

pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:10000/user/login/foursquare/callback";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:10000";

/// Which profile field becomes the local account name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameField {
    #[default]
    FirstName,
    FullName,
}

impl FromStr for NameField {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "first_name" => Ok(Self::FirstName),
            "full_name" => Ok(Self::FullName),
            other => Err(AuthError::Configuration(format!(
                "FOURSQUARE_NAME_FIELD must be first_name or full_name, got {other}"
            ))),
        }
    }
}

/// Read access to the module settings. Values are read on every request so
/// that an unconfigured install fails per attempt instead of at startup.
pub trait SettingsProvider: Send + Sync {
    fn client_id(&self) -> String;
    fn client_secret(&self) -> String;
    fn redirect_url(&self) -> String;

    fn api_calls(&self) -> Vec<String> {
        Vec::new()
    }

    fn name_field(&self) -> NameField {
        NameField::FirstName
    }

    fn scopes(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub api_calls: Vec<String>,
    pub name_field: NameField,
    pub scopes: Vec<String>,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AuthError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        let var = |key: &str| env::var(key).unwrap_or_default();

        let redirect_url = env::var("REDIRECT_URL").unwrap_or_else(|_| DEFAULT_REDIRECT_URL.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            client_id: var("FOURSQUARE_CLIENT_ID").trim().to_string(),
            client_secret: var("FOURSQUARE_CLIENT_SECRET").trim().to_string(),
            redirect_url,
            api_calls: parse_api_calls(&var("FOURSQUARE_API_CALLS")),
            name_field: var("FOURSQUARE_NAME_FIELD").parse()?,
            scopes: var("FOURSQUARE_SCOPES")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            bind_addr,
        })
    }
}

/// One call per line; blank lines are skipped.
pub fn parse_api_calls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl SettingsProvider for AppConfig {
    fn client_id(&self) -> String {
        self.client_id.clone()
    }

    fn client_secret(&self) -> String {
        self.client_secret.clone()
    }

    fn redirect_url(&self) -> String {
        self.redirect_url.clone()
    }

    fn api_calls(&self) -> Vec<String> {
        self.api_calls.clone()
    }

    fn name_field(&self) -> NameField {
        self.name_field
    }

    fn scopes(&self) -> Vec<String> {
        self.scopes.clone()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<AuthFlowController>,
}
