use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("User denied authorization: {0}")]
    UserDenied(String),

    #[error("Invalid OAuth2 state")]
    InvalidState,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Profile fetch failed: {0}")]
    ProfileFetch(String),

    #[error("Malformed profile: {0}")]
    MalformedProfile(String),

    #[error("Extra API call '{call}' failed: {reason}")]
    ExtraApiCall { call: String, reason: String },

    #[error("Session error: {0}")]
    Session(String),
}

impl AuthError {
    /// Text that is safe to show to the end user. Internal detail stays in `Display`.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Configuration(_) => {
                "Social Auth Foursquare not configured properly. Contact site administrator."
            }
            AuthError::UserDenied(_) => "You could not be authenticated.",
            AuthError::InvalidState => "Foursquare login failed. Invalid OAuth2 state.",
            AuthError::ProfileFetch(_) | AuthError::MalformedProfile(_) => {
                "Foursquare login failed, could not load Foursquare profile. Contact site administrator."
            }
            AuthError::TokenExchange(_)
            | AuthError::ExtraApiCall { .. }
            | AuthError::Session(_) => "Foursquare login failed. Please try again.",
        }
    }
}

impl From<tower_sessions::session::Error> for AuthError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AuthError::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_internal_detail() {
        let err = AuthError::TokenExchange("invalid_grant: code=abc123".to_string());
        assert!(err.to_string().contains("abc123"));
        assert!(!err.user_message().contains("abc123"));
    }

    #[test]
    fn profile_errors_share_message() {
        assert_eq!(
            AuthError::ProfileFetch("x".into()).user_message(),
            AuthError::MalformedProfile("y".into()).user_message()
        );
    }
}
